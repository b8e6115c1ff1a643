//! # Hidden Ranges
//!
//! A [`HiddenRange`] is a span of link syntax that collapses to a zero-width
//! marker in live preview. Each link yields one leading range (the opener,
//! plus `dest|` for aliased wiki links) and one trailing range (`]]` or
//! `](dest)`).
//!
//! - **`scanner`**: ranges for one line of text
//! - **`index`**: the working set for the lines the selection touches

pub mod index;
pub mod scanner;

use serde::{Deserialize, Serialize};

pub use index::{HiddenRangeIndex, compute_hidden_ranges};
pub use scanner::{find_markdown_link_syntax_ranges, find_wiki_link_syntax_ranges, scan_line};

/// Which end of a link a hidden range belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Side {
    Leading,
    Trailing,
}

/// A contiguous span of syntax characters belonging to one link. `from < to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HiddenRange {
    pub from: usize,
    pub to: usize,
    pub side: Side,
}

impl HiddenRange {
    pub fn leading(from: usize, to: usize) -> Self {
        Self {
            from,
            to,
            side: Side::Leading,
        }
    }

    pub fn trailing(from: usize, to: usize) -> Self {
        Self {
            from,
            to,
            side: Side::Trailing,
        }
    }

    pub fn is_leading(&self) -> bool {
        self.side == Side::Leading
    }

    /// True if `pos` is in `[from, to)`.
    pub fn contains(&self, pos: usize) -> bool {
        self.from <= pos && pos < self.to
    }

    /// True if `pos` is strictly between the ends.
    pub fn strictly_contains(&self, pos: usize) -> bool {
        self.from < pos && pos < self.to
    }

    /// True if `[from, to)` overlaps this range by at least one byte.
    pub fn overlaps(&self, from: usize, to: usize) -> bool {
        from < self.to && to > self.from
    }
}

/// Sorts by `from`, then `to`.
pub fn sort_ranges(ranges: &mut [HiddenRange]) {
    ranges.sort_by_key(|r| (r.from, r.to));
}
