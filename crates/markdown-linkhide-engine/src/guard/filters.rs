use crate::{
    editing::{Change, Selection, Transaction, UserEvent, lines},
    ranges::{HiddenRange, Side},
};

use super::{GuardContext, GuardOutcome, newline_after};

/// True if `c` would change characters inside `r`.
///
/// Insertions only count when strictly inside; inserting at either edge
/// leaves the syntax intact.
fn touches(c: &Change, r: &HiddenRange) -> bool {
    if c.from == c.to {
        r.strictly_contains(c.from)
    } else {
        r.overlaps(c.from, c.to)
    }
}

/// Rejects user edits that would change hidden syntax.
///
/// A lone line break inside a hidden range is moved to the end of its line
/// instead, so an Enter keypress is never swallowed silently.
pub fn protect_syntax(tr: &Transaction, ctx: &GuardContext<'_>) -> GuardOutcome {
    if !ctx.guards(tr) {
        return GuardOutcome::Pass;
    }

    let hit = tr
        .changes
        .changes
        .iter()
        .find(|c| ctx.ranges.iter().any(|r| touches(c, r)));
    let Some(change) = hit else {
        return GuardOutcome::Pass;
    };

    match tr.single_change() {
        Some(single) if single.is_line_break() => {
            let line = lines::line_at(ctx.doc, change.from);
            GuardOutcome::Replace(newline_after(
                &line,
                ctx.continue_lists,
                tr.user_event.unwrap_or(UserEvent::Input),
            ))
        }
        _ => GuardOutcome::Reject,
    }
}

/// A lone insertion at the start of a link's text, where the link opens its
/// line, goes in front of the link instead.
pub fn insert_at_link_start_fix(tr: &Transaction, ctx: &GuardContext<'_>) -> GuardOutcome {
    if !ctx.guards(tr) {
        return GuardOutcome::Pass;
    }
    let Some(c) = tr.single_change().filter(|c| c.is_insertion() && !c.is_line_break()) else {
        return GuardOutcome::Pass;
    };

    let hit = ctx.ranges.iter().find(|r| {
        r.side == Side::Leading && c.from == r.to && lines::line_at(ctx.doc, r.from).from == r.from
    });
    match hit {
        Some(r) => GuardOutcome::Replace(redirect(tr, c, r.from)),
        None => GuardOutcome::Pass,
    }
}

/// A lone insertion at the end of a link's text, where the link closes its
/// line, goes after the link instead. Line breaks there get list continuation.
pub fn enter_at_link_end_fix(tr: &Transaction, ctx: &GuardContext<'_>) -> GuardOutcome {
    if !ctx.guards(tr) {
        return GuardOutcome::Pass;
    }
    let Some(c) = tr.single_change().filter(|c| c.is_insertion()) else {
        return GuardOutcome::Pass;
    };

    let line = lines::line_at(ctx.doc, c.from);
    let hit = ctx
        .ranges
        .iter()
        .find(|r| r.side == Side::Trailing && c.from == r.from && r.to == line.to);
    match hit {
        Some(_) if c.is_line_break() => GuardOutcome::Replace(newline_after(
            &line,
            ctx.continue_lists,
            tr.user_event.unwrap_or(UserEvent::Input),
        )),
        Some(r) => GuardOutcome::Replace(redirect(tr, c, r.to)),
        None => GuardOutcome::Pass,
    }
}

/// `tr` with its single insertion moved to `at` and the caret after the text.
fn redirect(tr: &Transaction, c: &Change, at: usize) -> Transaction {
    let mut out = Transaction::change(Change::insert(at, c.insert.clone()))
        .with_selection(Selection::cursor(at + c.insert.len()));
    out.user_event = tr.user_event;
    out.effects = tr.effects.clone();
    out
}
