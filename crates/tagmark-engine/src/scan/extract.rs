use super::tags::{self, TagSequence};
use crate::models::record::SpanKind;

/// Host-supplied toggles gating the two tagging rules.
///
/// The host owns these as configuration; the engine only reads them. Both
/// the batch and live extraction paths must be given the same options for
/// their outputs to agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Match tag sequences inside the span, at its end.
    pub inner: bool,
    /// Fall back to tag sequences just after a mark span's closing
    /// delimiter.
    pub outer: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            inner: true,
            outer: false,
        }
    }
}

/// A successfully classified tagged span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Display text, trimmed, tag sequence removed.
    pub text: String,
    pub tags: TagSequence,
    /// Byte length of trailing text consumed by an outer match; 0 for an
    /// inner match. The caller must remove this prefix from the
    /// surrounding text.
    pub consumed_trailing: usize,
}

/// Decides whether a located span is tagged and splits it into display
/// text and tag sequence.
///
/// Inner tagging wins over outer: when the interior ends in a tag
/// sequence, the trailing text is never consulted. Outer tagging applies
/// to mark spans only, since custom spans have no meaningful outer
/// position. A span with neither rule matching yields `None`, which is an
/// expected outcome, not an error.
pub fn extract(
    kind: SpanKind,
    interior: &str,
    trailing: Option<&str>,
    opts: ExtractOptions,
) -> Option<Extraction> {
    if opts.inner
        && let Some((text_end, seq)) = tags::match_trailing(interior)
    {
        return Some(Extraction {
            text: interior[..text_end].trim().to_string(),
            tags: seq,
            consumed_trailing: 0,
        });
    }
    if opts.outer
        && kind == SpanKind::Mark
        && let Some(trailing) = trailing
        && let Some((consumed, seq)) = tags::match_leading(trailing)
    {
        return Some(Extraction {
            text: interior.trim().to_string(),
            tags: seq,
            consumed_trailing: consumed,
        });
    }
    None
}
