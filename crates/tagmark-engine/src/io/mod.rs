use crate::models::NoteFile;
use crate::scan::extract::ExtractOptions;
use crate::scan::index::Index;
use crate::scan::indexer::extract_from_document;
use relative_path::{RelativePath, RelativePathBuf};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid notes directory: {0}")]
    InvalidNotesDir(String),
}

/// Read a note and return its content
pub fn read_file(relative_path: &RelativePath, notes_root: &Path) -> Result<String, IoError> {
    let absolute_path = relative_path.to_path(notes_root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    fs::read_to_string(&absolute_path).map_err(IoError::Io)
}

/// Scan for markdown files in the notes directory, sorted by path
pub fn scan_markdown_files(notes_root: &Path) -> Result<Vec<PathBuf>, IoError> {
    if !notes_root.exists() {
        return Err(IoError::InvalidNotesDir(
            "notes directory not found".to_string(),
        ));
    }

    let mut files = Vec::new();
    scan_directory_recursive(notes_root, &mut files)?;
    files.sort();
    Ok(files)
}

/// The vault's notes as [`NoteFile`]s, in lexicographic identifier order.
///
/// Files whose paths cannot be expressed vault-relative (non-UTF-8 names)
/// are skipped.
pub fn note_files(notes_root: &Path) -> Result<Vec<NoteFile>, IoError> {
    let mut notes: Vec<NoteFile> = scan_markdown_files(notes_root)?
        .into_iter()
        .filter_map(|path| {
            let relative = path.strip_prefix(notes_root).ok()?;
            let relative = RelativePathBuf::from_path(relative).ok()?;
            Some(NoteFile::new(relative))
        })
        .collect();
    notes.sort();
    Ok(notes)
}

/// Full index rebuild over every note in the vault.
///
/// Notes are processed in lexicographic identifier order so repeated
/// rebuilds over an unchanged vault export byte-identically.
pub fn index_vault(notes_root: &Path, opts: ExtractOptions) -> Result<Index, IoError> {
    let mut index = Index::new();
    for note in note_files(notes_root)? {
        let content = read_file(note.relative_path(), notes_root)?;
        for record in extract_from_document(note.id(), &content, opts) {
            index.append(record);
        }
    }
    Ok(index)
}

fn scan_directory_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), IoError> {
    let entries = fs::read_dir(dir).map_err(IoError::Io)?;

    for entry in entries {
        let entry = entry.map_err(IoError::Io)?;
        let path = entry.path();

        if path.is_dir() {
            scan_directory_recursive(&path, files)?;
        } else if let Some(ext) = path.extension()
            && ext == "md"
        {
            files.push(path);
        }
    }

    Ok(())
}

pub fn validate_notes_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidNotesDir(
            "Directory does not exist".to_string(),
        ));
    }

    Ok(())
}
