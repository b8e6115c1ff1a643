//! Caret placement after the command layer rewrites or skips a link.
//!
//! Everything here works on line numbers and columns only, so it can be used
//! without a live editor.

use serde::{Deserialize, Serialize};

use crate::grammar::DisplayedTextRange;

/// A zero-based line and byte column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinePosition {
    pub line: usize,
    pub ch: usize,
}

impl LinePosition {
    pub fn new(line: usize, ch: usize) -> Self {
        Self { line, ch }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

/// Where a link sits on its line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkPlacement {
    pub line: usize,
    pub line_count: usize,
    pub line_length: usize,
    /// Length of the previous line; `None` on the first line.
    pub prev_line_length: Option<usize>,
    pub link_start: usize,
    pub link_end: usize,
}

impl LinkPlacement {
    fn right_of_link(&self) -> Option<LinePosition> {
        (self.link_end < self.line_length).then(|| LinePosition::new(self.line, self.link_end + 1))
    }

    fn left_of_link(&self) -> Option<LinePosition> {
        (self.link_start > 0).then(|| LinePosition::new(self.line, self.link_start - 1))
    }

    /// For a link filling its whole line: next line start, else previous line end.
    fn off_the_line(&self) -> LinePosition {
        if self.line + 1 < self.line_count {
            LinePosition::new(self.line + 1, 0)
        } else if let Some(len) = self.prev_line_length.filter(|_| self.line > 0) {
            LinePosition::new(self.line - 1, len)
        } else {
            LinePosition::new(self.line, self.link_end)
        }
    }
}

/// Puts the caret just outside a freshly edited link so it closes.
///
/// The preferred side is used when there is room on it, otherwise the other
/// side. A link filling its whole line sends the caret to a neighbouring line.
pub fn compute_close_cursor_position(link: &LinkPlacement, prefer_right: bool) -> LinePosition {
    let (first, second) = if prefer_right {
        (link.right_of_link(), link.left_of_link())
    } else {
        (link.left_of_link(), link.right_of_link())
    };
    first.or(second).unwrap_or_else(|| link.off_the_line())
}

/// Like [`compute_close_cursor_position`], but leaves on the side of the
/// link the caret was nearer to. The midpoint counts as the left half.
pub fn compute_skip_cursor_position(link: &LinkPlacement, cursor_ch: usize) -> LinePosition {
    let from_left = cursor_ch.saturating_sub(link.link_start) * 2
        <= link.link_end.saturating_sub(link.link_start);
    compute_close_cursor_position(link, !from_left)
}

/// Target for the "skip link" command.
///
/// With hiding active the caret goes to the edge of the displayed text (or
/// one step into the opening syntax when moving left) and cursor correction
/// carries it over the collapsed syntax. Otherwise it goes straight to the
/// edge of the full link.
pub fn compute_skip_link_position(
    line: usize,
    link: &DisplayedTextRange,
    direction: Direction,
    hiding_active: bool,
) -> LinePosition {
    let ch = match (hiding_active, direction) {
        (true, Direction::Right) => link.displayed_text_end,
        (true, Direction::Left) => link
            .displayed_text_start
            .saturating_sub(1)
            .max(link.link_start),
        (false, Direction::Right) => link.link_end,
        (false, Direction::Left) => link.link_start,
    };
    LinePosition::new(line, ch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{LinkInfo, compute_displayed_text_range};
    use rstest::rstest;

    fn placement(line_length: usize, link_start: usize, link_end: usize) -> LinkPlacement {
        LinkPlacement {
            line: 3,
            line_count: 10,
            line_length,
            prev_line_length: Some(7),
            link_start,
            link_end,
        }
    }

    #[rstest]
    #[case::right(placement(20, 4, 12), true, LinePosition::new(3, 13))]
    #[case::left(placement(20, 4, 12), false, LinePosition::new(3, 3))]
    #[case::right_blocked_at_line_end(placement(12, 4, 12), true, LinePosition::new(3, 3))]
    #[case::left_blocked_at_line_start(placement(20, 0, 8), false, LinePosition::new(3, 9))]
    fn close_prefers_requested_side(
        #[case] link: LinkPlacement,
        #[case] prefer_right: bool,
        #[case] expected: LinePosition,
    ) {
        assert_eq!(compute_close_cursor_position(&link, prefer_right), expected);
    }

    #[rstest]
    #[case(true)]
    #[case(false)]
    fn whole_line_link_moves_to_next_line(#[case] prefer_right: bool) {
        let link = placement(8, 0, 8);
        assert_eq!(
            compute_close_cursor_position(&link, prefer_right),
            LinePosition::new(4, 0)
        );
        assert_eq!(compute_skip_cursor_position(&link, 2), LinePosition::new(4, 0));
    }

    #[test]
    fn whole_last_line_link_moves_to_previous_line_end() {
        let link = LinkPlacement {
            line: 9,
            ..placement(8, 0, 8)
        };
        assert_eq!(compute_close_cursor_position(&link, true), LinePosition::new(8, 7));
    }

    #[test]
    fn only_line_stays_put() {
        let link = LinkPlacement {
            line: 0,
            line_count: 1,
            prev_line_length: None,
            ..placement(8, 0, 8)
        };
        assert_eq!(compute_close_cursor_position(&link, true), LinePosition::new(0, 8));
    }

    #[rstest]
    #[case(5, LinePosition::new(3, 3))]
    #[case(8, LinePosition::new(3, 3))]
    #[case(9, LinePosition::new(3, 13))]
    fn skip_follows_nearer_half(#[case] cursor: usize, #[case] expected: LinePosition) {
        assert_eq!(compute_skip_cursor_position(&placement(20, 4, 12), cursor), expected);
    }

    #[test]
    fn skip_link_targets_displayed_text_when_hiding() {
        // "See [[Note]] here"
        let link = compute_displayed_text_range(&LinkInfo::wiki("Note", "Note"), 4);
        assert_eq!(
            compute_skip_link_position(0, &link, Direction::Right, true),
            LinePosition::new(0, 10)
        );
        assert_eq!(
            compute_skip_link_position(0, &link, Direction::Left, true),
            LinePosition::new(0, 5)
        );
        assert_eq!(
            compute_skip_link_position(0, &link, Direction::Right, false),
            LinePosition::new(0, 12)
        );
        assert_eq!(
            compute_skip_link_position(0, &link, Direction::Left, false),
            LinePosition::new(0, 4)
        );
    }
}
