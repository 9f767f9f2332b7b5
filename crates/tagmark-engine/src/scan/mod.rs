//! # Span Scanning
//!
//! Tag extraction from inline spans, split into small testable stages.
//!
//! ## Architecture
//!
//! Scanning is line-oriented: spans never cross line boundaries. Each line
//! is walked twice, once per span kind, and every located span is handed to
//! the extractor which decides whether it carries a tag sequence.
//!
//! - **`cursor`**: byte cursor over one line with delimiter search
//! - **`kinds`**: delimiter constants owned by each span kind
//! - **`tags`**: the tag-sequence tokenizer (names + merged attribute map)
//! - **`locator`**: finds delimiter pairs, yielding interiors and offsets
//! - **`extract`**: inner/outer tagging rules over a located span
//! - **`indexer`**: batch (raw text) and live (rendered span) entry points
//! - **`index`**: the ordered record store
//!
//! ## Grammar sharing
//!
//! Both the batch and live paths call the same tokenizer and the same
//! inner/outer matching rules, so the two can never drift apart on which
//! tags a given span carries.

pub mod cursor;
pub mod extract;
pub mod index;
pub mod indexer;
pub mod kinds;
pub mod locator;
pub mod tags;

pub use extract::{ExtractOptions, Extraction};
pub use index::Index;
pub use indexer::extract_from_document;
