use super::cursor::Cursor;
use super::kinds::{Custom, Mark};

/// One located span occurrence on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Located<'a> {
    /// Interior text between the delimiters.
    pub inner: &'a str,
    /// Character offset of the opening delimiter.
    pub from: usize,
    /// Exclusive character offset past the closing delimiter.
    pub to: usize,
    /// Byte offset just past the closing delimiter, where trailing text
    /// begins.
    pub after: usize,
}

/// Scans one line for span delimiter pairs of a single kind.
///
/// The locator owns its cursor and advances past each span it yields, so
/// repeated spans on a line are each found exactly once, left to right,
/// non-overlapping. An unmatched delimiter ends the pass for the rest of
/// the line.
pub struct SpanLocator<'a> {
    cur: Cursor<'a>,
}

impl<'a> SpanLocator<'a> {
    pub fn new(line: &'a str) -> Self {
        Self {
            cur: Cursor::new(line),
        }
    }

    /// Finds the next `==…==` span at or after the cursor.
    pub fn next_mark(&mut self) -> Option<Located<'a>> {
        let open = match self.cur.find(Mark::MARKER) {
            Some(open) => open,
            None => return self.exhaust(),
        };
        let inner_start = open + Mark::MARKER.len();
        let close = match find_from(self.cur.s, inner_start, Mark::MARKER) {
            Some(close) => close,
            None => return self.exhaust(),
        };
        Some(self.yield_span(open, inner_start, close, Mark::MARKER.len()))
    }

    /// Finds the next `{{…}}` span at or after the cursor.
    ///
    /// Non-greedy and non-nested: if the candidate interior contains
    /// another `{{`, scanning re-enters at that inner opener so the
    /// innermost pair wins.
    pub fn next_custom(&mut self) -> Option<Located<'a>> {
        let mut open = match self.cur.find(Custom::OPEN) {
            Some(open) => open,
            None => return self.exhaust(),
        };
        let close = match find_from(self.cur.s, open + Custom::OPEN.len(), Custom::CLOSE) {
            Some(close) => close,
            None => return self.exhaust(),
        };
        while let Some(inner_open) =
            find_from(self.cur.s, open + Custom::OPEN.len(), Custom::OPEN)
        {
            if inner_open >= close {
                break;
            }
            open = inner_open;
        }
        Some(self.yield_span(open, open + Custom::OPEN.len(), close, Custom::CLOSE.len()))
    }

    /// Marks extra bytes after the last yielded span as consumed, so an
    /// outer tag sequence is not rescanned.
    pub fn consume(&mut self, extra: usize) {
        self.cur.bump_n(extra);
    }

    fn yield_span(
        &mut self,
        open: usize,
        inner_start: usize,
        close: usize,
        close_len: usize,
    ) -> Located<'a> {
        let after = close + close_len;
        let located = Located {
            inner: &self.cur.s[inner_start..close],
            from: char_offset(self.cur.s, open),
            to: char_offset(self.cur.s, after),
            after,
        };
        self.cur.seek(after);
        located
    }

    fn exhaust(&mut self) -> Option<Located<'a>> {
        self.cur.seek(self.cur.s.len().max(self.cur.i));
        None
    }
}

/// Byte index of the next occurrence of `pat` at or after `from`.
fn find_from(s: &str, from: usize, pat: &str) -> Option<usize> {
    s.get(from..)?.find(pat).map(|off| from + off)
}

/// Converts a byte offset into a character offset.
fn char_offset(s: &str, byte: usize) -> usize {
    s[..byte].chars().count()
}
