/// A byte cursor over one line of text. Positions are line-local.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The line being scanned.
    pub s: &'a str,
    pub i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    pub fn pos(&self) -> usize {
        self.i
    }

    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    /// The byte just before the current position, if any.
    pub fn prev(&self) -> Option<u8> {
        self.i
            .checked_sub(1)
            .and_then(|j| self.s.as_bytes().get(j).copied())
    }

    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.s
            .as_bytes()
            .get(self.i..)
            .is_some_and(|rest| rest.starts_with(pat))
    }

    pub fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.i += 1;
        Some(b)
    }

    /// Advances by `n` bytes. The caller must keep the cursor in bounds.
    pub fn bump_n(&mut self, n: usize) {
        self.i += n;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_tracks_position() {
        let mut cur = Cursor::new("[[a]]");
        assert_eq!(cur.pos(), 0);
        assert!(cur.starts_with(b"[["));
        cur.bump_n(2);
        assert_eq!(cur.pos(), 2);
        assert_eq!(cur.peek(), Some(b'a'));
        assert_eq!(cur.prev(), Some(b'['));
    }

    #[test]
    fn prev_at_start_is_none() {
        let cur = Cursor::new("x");
        assert_eq!(cur.prev(), None);
    }

    #[test]
    fn starts_with_past_end_is_false() {
        let mut cur = Cursor::new("ab");
        cur.bump_n(5);
        assert!(cur.eof());
        assert!(!cur.starts_with(b"a"));
        assert_eq!(cur.bump(), None);
    }
}
