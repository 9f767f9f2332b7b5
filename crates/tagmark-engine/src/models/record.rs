use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which delimiter form a span used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanKind {
    /// Emphasis span: `==text==`.
    Mark,
    /// Custom span: `{{text}}`.
    Custom,
}

/// One indexed, tagged span occurrence.
///
/// Records are immutable once created and live until the owning
/// [`Index`](crate::scan::index::Index) is cleared. A record exists only if
/// its tag sequence yielded at least one name, and `text` never contains
/// the tag-sequence substring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanRecord {
    /// Document identifier (opaque; vault-relative path in practice).
    pub file: String,
    /// Zero-based line number within the document.
    pub line: usize,
    /// Character offset of the opening delimiter, 0 when unknown
    /// (live-rendered extraction).
    pub from: usize,
    /// Exclusive character offset past the closing delimiter, 0 when
    /// unknown.
    pub to: usize,
    /// Display text with the tag sequence removed, whitespace-trimmed.
    pub text: String,
    /// Tag names in source order, duplicates preserved, marker stripped.
    pub tags: Vec<String>,
    /// The span-level merged attribute map.
    pub attrs: BTreeMap<String, String>,
    pub kind: SpanKind,
}
