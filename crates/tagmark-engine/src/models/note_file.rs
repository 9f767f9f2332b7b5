use relative_path::{RelativePath, RelativePathBuf};

/// A note in the vault, identified by its vault-relative path.
///
/// The relative-path string doubles as the document identifier carried in
/// [`SpanRecord::file`](crate::models::record::SpanRecord); the display
/// name drops the `.md` extension for listings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct NoteFile {
    relative_path: RelativePathBuf,
    display_name: String,
}

impl NoteFile {
    pub fn new(relative_path: RelativePathBuf) -> Self {
        let display_name = relative_path
            .file_name()
            .map(|name| name.strip_suffix(".md").unwrap_or(name))
            .unwrap_or("Untitled")
            .to_string();
        Self {
            relative_path,
            display_name,
        }
    }

    pub fn from_relative_str(path: &str) -> Self {
        Self::new(RelativePathBuf::from(path))
    }

    pub fn relative_path(&self) -> &RelativePath {
        &self.relative_path
    }

    /// The opaque document identifier used in index records.
    pub fn id(&self) -> &str {
        self.relative_path.as_str()
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

impl From<&str> for NoteFile {
    fn from(path: &str) -> Self {
        Self::from_relative_str(path)
    }
}
