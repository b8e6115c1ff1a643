use serde::{Deserialize, Serialize};

/// One selection range. `head` is the moving end (where the caret is drawn).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRange {
    pub anchor: usize,
    pub head: usize,
}

impl SelectionRange {
    pub fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    /// A collapsed range (plain caret).
    pub fn cursor(pos: usize) -> Self {
        Self {
            anchor: pos,
            head: pos,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }

    pub fn from(&self) -> usize {
        self.anchor.min(self.head)
    }

    pub fn to(&self) -> usize {
        self.anchor.max(self.head)
    }
}

/// The full selection of a surface: one or more ranges plus the index of the main one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub ranges: Vec<SelectionRange>,
    pub main: usize,
}

impl Selection {
    pub fn single(anchor: usize, head: usize) -> Self {
        Self {
            ranges: vec![SelectionRange::new(anchor, head)],
            main: 0,
        }
    }

    pub fn cursor(pos: usize) -> Self {
        Self::single(pos, pos)
    }

    /// Builds a multi-range selection. An empty list becomes a caret at 0.
    pub fn with_ranges(ranges: Vec<SelectionRange>, main: usize) -> Self {
        if ranges.is_empty() {
            return Self::cursor(0);
        }
        let main = main.min(ranges.len() - 1);
        Self { ranges, main }
    }

    pub fn main_range(&self) -> SelectionRange {
        self.ranges[self.main]
    }

    /// Every anchor and head, in range order.
    pub fn positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.ranges.iter().flat_map(|r| [r.anchor, r.head])
    }
}
