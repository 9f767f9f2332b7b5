/// A byte cursor over one line of text for delimiter scanning.
///
/// Delimiters are ASCII, so scanning works on bytes; positions are byte
/// offsets into `s` and always land on character boundaries when they come
/// from [`Cursor::find`] with an ASCII pattern.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The line being scanned.
    pub s: &'a str,
    /// Current byte index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a new cursor at the start of `s`.
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    /// Returns true if at end of line.
    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// Checks if the remaining input starts with the given byte pattern.
    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.s.as_bytes()[self.i.min(self.s.len())..].starts_with(pat)
    }

    /// Returns the byte index of the next occurrence of `pat` at or after
    /// the current position, without advancing.
    pub fn find(&self, pat: &str) -> Option<usize> {
        if self.i > self.s.len() {
            return None;
        }
        self.s[self.i..].find(pat).map(|off| self.i + off)
    }

    /// Advances to the given byte index.
    ///
    /// Caller must ensure `to` is a character boundary at or after the
    /// current position.
    pub fn seek(&mut self, to: usize) {
        debug_assert!(to >= self.i);
        self.i = to;
    }

    /// Advances by `n` bytes.
    pub fn bump_n(&mut self, n: usize) {
        self.i += n;
    }

    /// The unscanned remainder of the line.
    pub fn rest(&self) -> &'a str {
        &self.s[self.i.min(self.s.len())..]
    }
}
