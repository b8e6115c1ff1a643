//! Zero-width replace markers for hidden ranges.
//!
//! Ranges are replaced outright rather than styled invisible: a hidden text
//! node would still take part in offset-to-pixel mapping and could offer the
//! caret a zero-width slot inside the link.

use serde::{Deserialize, Serialize};

use crate::ranges::HiddenRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decoration {
    /// Replace `[from, to)` with a zero-width, non-text marker.
    Replace { from: usize, to: usize },
}

impl Decoration {
    pub fn from(&self) -> usize {
        match self {
            Decoration::Replace { from, .. } => *from,
        }
    }

    pub fn to(&self) -> usize {
        match self {
            Decoration::Replace { to, .. } => *to,
        }
    }
}

/// Sorted decorations for one surface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecorationSet {
    pub items: Vec<Decoration>,
}

impl DecorationSet {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// `text` as displayed, where `text` starts at document offset `base`.
    ///
    /// Decorations not fully inside the text are ignored.
    pub fn render(&self, text: &str, base: usize) -> String {
        let end = base + text.len();
        let mut out = String::with_capacity(text.len());
        let mut pos = base;
        for d in &self.items {
            if d.from() < pos || d.to() > end {
                continue;
            }
            out.push_str(&text[pos - base..d.from() - base]);
            pos = d.to();
        }
        out.push_str(&text[pos - base..]);
        out
    }
}

/// Builds the decoration set. Nothing is emitted while hiding is disabled.
pub fn build_decorations(enabled: bool, ranges: &[HiddenRange]) -> DecorationSet {
    if !enabled {
        return DecorationSet::default();
    }
    DecorationSet {
        items: ranges
            .iter()
            .filter(|r| r.from < r.to)
            .map(|r| Decoration::Replace {
                from: r.from,
                to: r.to,
            })
            .collect(),
    }
}
