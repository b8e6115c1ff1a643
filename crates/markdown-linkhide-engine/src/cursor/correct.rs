use xi_rope::Rope;

use crate::{
    editing::lines,
    ranges::{HiddenRange, Side},
};

/// Correction passes per selection head. A correction can land inside an
/// adjacent range (e.g. `[](x)`), so one pass is not always enough; more than
/// three means the ranges are inconsistent.
pub const MAX_CORRECTION_PASSES: usize = 3;

/// Where the caret should go instead of `pos`, or `None` if `pos` is fine.
///
/// `old_pos` gives the direction of travel (`pos >= old_pos` is rightward).
/// Ranges are tried in order and the first one that applies decides.
pub fn correct_cursor_pos(
    pos: usize,
    old_pos: usize,
    ranges: &[HiddenRange],
    doc: &Rope,
    is_pointer: bool,
) -> Option<usize> {
    let moving_right = pos >= old_pos;

    for r in ranges {
        let target = match r.side {
            Side::Leading => {
                if !r.contains(pos) {
                    continue;
                }
                if is_pointer {
                    r.from
                } else if moving_right {
                    r.to
                } else if pos == r.from {
                    // Already on the boundary (possibly the line start); don't bounce.
                    return None;
                } else {
                    r.from
                }
            }
            Side::Trailing => {
                if r.contains(pos) {
                    if is_pointer || !moving_right {
                        r.from
                    } else if reaches_line_end(doc, r) {
                        r.to
                    } else {
                        step_past(doc, r.to)
                    }
                } else if pos == r.to && (!moving_right || is_pointer) {
                    r.from
                } else {
                    continue;
                }
            }
        };
        let target = target.min(doc.len());
        return (target != pos).then_some(target);
    }
    None
}

/// Runs [`correct_cursor_pos`] until it settles, at most [`MAX_CORRECTION_PASSES`] times.
///
/// Returns the final position if it differs from `head`. If the passes run out
/// the last computed position is kept.
pub fn correct_head(
    head: usize,
    old_head: usize,
    ranges: &[HiddenRange],
    doc: &Rope,
    is_pointer: bool,
) -> Option<usize> {
    let mut pos = head;
    let mut prev = old_head;
    for _ in 0..MAX_CORRECTION_PASSES {
        match correct_cursor_pos(pos, prev, ranges, doc, is_pointer) {
            Some(next) => {
                prev = pos;
                pos = next;
            }
            None => return (pos != head).then_some(pos),
        }
    }
    if let Some(next) = correct_cursor_pos(pos, prev, ranges, doc, is_pointer) {
        log::warn!(
            "cursor correction did not settle after {MAX_CORRECTION_PASSES} passes \
             (head {head}, stopped at {pos}, wanted {next})"
        );
    }
    (pos != head).then_some(pos)
}

fn reaches_line_end(doc: &Rope, r: &HiddenRange) -> bool {
    lines::line_at(doc, r.from).to == r.to
}

/// One character past `pos` on its line.
fn step_past(doc: &Rope, pos: usize) -> usize {
    let line = lines::line_at(doc, pos);
    let width = line.text[pos - line.from..]
        .chars()
        .next()
        .map_or(0, char::len_utf8);
    pos + width
}
