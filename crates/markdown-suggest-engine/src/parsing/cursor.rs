/// A byte cursor over the document text used by the markup scanner.
///
/// Delimiters are all ASCII, so every position the cursor reports after a
/// successful `find` lies on a char boundary.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The text being scanned.
    pub s: &'a str,
    /// Current byte index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    /// Returns the current byte position.
    pub fn pos(&self) -> usize {
        self.i
    }

    /// Moves the cursor to an absolute position.
    pub fn seek(&mut self, pos: usize) {
        self.i = pos;
    }

    /// Finds the next occurrence of `pat` at or after the cursor without
    /// advancing. Returns its absolute start position.
    pub fn find(&self, pat: &[u8]) -> Option<usize> {
        let rest = self.s.as_bytes().get(self.i..)?;
        if pat.is_empty() || rest.len() < pat.len() {
            return None;
        }
        rest.windows(pat.len())
            .position(|w| w == pat)
            .map(|off| self.i + off)
    }
}
