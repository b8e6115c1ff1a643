use crate::{
    editing::{EditorState, Transaction, UserEvent},
    ranges::Side,
};

use super::{GuardContext, newline_after};

/// Enter-key handler, consulted before any default binding.
///
/// When the main caret is inside or on either edge of a trailing range that
/// ends its line, the new line goes after the link (with list continuation)
/// instead of splitting it. Returns the transaction to dispatch if the key is
/// consumed.
pub fn handle_enter(state: &EditorState, ctx: &GuardContext<'_>) -> Option<Transaction> {
    if !ctx.enabled {
        return None;
    }
    let main = state.selection().main_range();
    if !main.is_empty() {
        return None;
    }

    let pos = main.head;
    let line = state.line_at(pos);
    ctx.ranges
        .iter()
        .find(|r| r.side == Side::Trailing && r.from <= pos && pos <= r.to && r.to == line.to)
        .map(|_| newline_after(&line, ctx.continue_lists, UserEvent::Input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        editing::{Change, Selection},
        ranges::{HiddenRange, scan_line},
    };
    use rstest::rstest;

    fn state_at(text: &str, caret: usize) -> (EditorState, Vec<HiddenRange>) {
        let mut state = EditorState::new(text);
        state
            .apply(&Transaction::select(Selection::cursor(caret)))
            .unwrap();
        let line = state.line_at(caret);
        let ranges = scan_line(&line.text, line.from);
        (state, ranges)
    }

    fn ctx<'a>(state: &'a EditorState, ranges: &'a [HiddenRange]) -> GuardContext<'a> {
        GuardContext {
            doc: state.doc(),
            ranges,
            enabled: true,
            continue_lists: true,
        }
    }

    #[rstest]
    #[case(10)]
    #[case(11)]
    #[case(12)]
    fn enter_near_line_ending_link_appends_line(#[case] caret: usize) {
        let (state, ranges) = state_at("- See [[No]]\nnext", caret);
        let tr = handle_enter(&state, &ctx(&state, &ranges)).unwrap();
        assert_eq!(tr.changes.changes, vec![Change::insert(12, "\n- ")]);
        assert_eq!(tr.selection, Some(Selection::cursor(15)));
    }

    #[test]
    fn enter_elsewhere_falls_through() {
        let (state, ranges) = state_at("See [[Note]] here", 10);
        assert_eq!(handle_enter(&state, &ctx(&state, &ranges)), None);

        let (state, ranges) = state_at("See [[Note]]", 3);
        assert_eq!(handle_enter(&state, &ctx(&state, &ranges)), None);
    }

    #[test]
    fn disabled_hiding_falls_through() {
        let (state, ranges) = state_at("See [[Note]]", 11);
        let c = GuardContext {
            enabled: false,
            ..ctx(&state, &ranges)
        };
        assert_eq!(handle_enter(&state, &c), None);
    }
}
