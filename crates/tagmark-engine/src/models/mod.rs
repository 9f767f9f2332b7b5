pub mod note_file;
pub mod record;

pub use note_file::NoteFile;
pub use record::{SpanKind, SpanRecord};
