pub mod io;
pub mod models;
pub mod scan;


// Re-export key types for easier usage
pub use models::{note_file::*, record::*};
pub use scan::{
    extract::{ExtractOptions, Extraction},
    index::Index,
    indexer::{extract_from_document, extract_from_rendered_span, index_documents},
    tags::TagSequence,
};
