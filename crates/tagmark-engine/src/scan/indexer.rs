use super::extract::{ExtractOptions, Extraction, extract};
use super::index::Index;
use super::locator::SpanLocator;
use crate::models::record::{SpanKind, SpanRecord};

/// Batch path: produces the complete ordered record set for one document.
///
/// Lines are scanned independently; spans never cross line boundaries.
/// Each line gets one mark pass and one custom pass, and the two passes'
/// records are merged into left-to-right order before moving on, so the
/// result is ordered by line ascending, then by start offset.
pub fn extract_from_document(file: &str, text: &str, opts: ExtractOptions) -> Vec<SpanRecord> {
    let mut records = Vec::new();
    for (line_no, line) in split_lines(text).enumerate() {
        let mut found = Vec::new();
        scan_line(file, line_no, line, SpanKind::Mark, opts, &mut found);
        scan_line(file, line_no, line, SpanKind::Custom, opts, &mut found);
        found.sort_by_key(|r| r.from);
        records.append(&mut found);
    }
    records
}

/// Live path: applies the shared grammar to one already-rendered span.
///
/// The rendering collaborator decides which elements are candidates and
/// calls this once per candidate, passing the text after the closing
/// delimiter when it has one. Offsets are not recoverable here; use
/// [`record_from_rendered_span`] to build a record with zeroed offsets.
pub fn extract_from_rendered_span(
    kind: SpanKind,
    interior: &str,
    trailing: Option<&str>,
    opts: ExtractOptions,
) -> Option<Extraction> {
    extract(kind, interior, trailing, opts)
}

/// Builds an index record from a live extraction, with `from`/`to` zeroed
/// since character offsets are unavailable in rendered markup.
pub fn record_from_rendered_span(
    file: &str,
    line: usize,
    kind: SpanKind,
    interior: &str,
    trailing: Option<&str>,
    opts: ExtractOptions,
) -> Option<SpanRecord> {
    let ex = extract_from_rendered_span(kind, interior, trailing, opts)?;
    Some(SpanRecord {
        file: file.to_string(),
        line,
        from: 0,
        to: 0,
        text: ex.text,
        tags: ex.tags.names,
        attrs: ex.tags.attrs,
        kind,
    })
}

/// Full rebuild over a corpus of `(identifier, text)` documents.
///
/// Documents are indexed in lexicographic identifier order regardless of
/// input order, so repeated rebuilds over an unchanged corpus serialize
/// byte-identically.
pub fn index_documents<'a, I>(docs: I, opts: ExtractOptions) -> Index
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut docs: Vec<_> = docs.into_iter().collect();
    docs.sort_by(|a, b| a.0.cmp(b.0));

    let mut index = Index::new();
    for (file, text) in docs {
        for record in extract_from_document(file, text, opts) {
            index.append(record);
        }
    }
    index
}

/// One locator pass over a line for a single span kind.
fn scan_line(
    file: &str,
    line_no: usize,
    line: &str,
    kind: SpanKind,
    opts: ExtractOptions,
    out: &mut Vec<SpanRecord>,
) {
    let mut loc = SpanLocator::new(line);
    loop {
        let span = match kind {
            SpanKind::Mark => loc.next_mark(),
            SpanKind::Custom => loc.next_custom(),
        };
        let Some(span) = span else { break };

        // Only mark spans see their trailing text; custom spans have no
        // outer position in the batch path.
        let trailing = match kind {
            SpanKind::Mark => Some(&line[span.after..]),
            SpanKind::Custom => None,
        };
        let Some(ex) = extract(kind, span.inner, trailing, opts) else {
            continue;
        };
        if ex.consumed_trailing > 0 {
            loc.consume(ex.consumed_trailing);
        }
        out.push(SpanRecord {
            file: file.to_string(),
            line: line_no,
            from: span.from,
            to: span.to,
            text: ex.text,
            tags: ex.tags.names,
            attrs: ex.tags.attrs,
            kind,
        });
    }
}

/// Splits on `\n`, tolerating a carriage return before the terminator.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l))
}
