use serde::{Deserialize, Serialize};

/// A byte range `[start, end)` into the document.
///
/// Used for whole-link extents (e.g. a force-shown link) where the
/// leading/trailing split of [`HiddenRange`](crate::ranges::HiddenRange)
/// does not matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the length in bytes. Uses saturating subtraction for safety.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span is empty (start >= end).
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// True if `[from, to)` lies entirely within this span.
    #[must_use]
    pub fn encloses(self, from: usize, to: usize) -> bool {
        from >= self.start && to <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn len_saturates_on_inverted_span() {
        assert_eq!(Span::new(5, 3).len(), 0);
        assert!(Span::new(5, 3).is_empty());
    }

    #[test]
    fn encloses_is_inclusive_of_both_edges() {
        let sp = Span::new(4, 12);
        assert!(sp.encloses(4, 6));
        assert!(sp.encloses(10, 12));
        assert!(!sp.encloses(3, 6));
        assert!(!sp.encloses(10, 13));
    }
}
