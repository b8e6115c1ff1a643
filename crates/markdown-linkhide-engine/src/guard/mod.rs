//! # Edit Guard
//!
//! Transaction filters that protect hidden link syntax from accidental user
//! edits, plus the Enter-key handler for links that end a line.
//!
//! Filters run in a fixed order before commit. Each one either passes the
//! transaction on, rejects it, or replaces it with a redirected transaction;
//! the first non-pass result ends the run. All filters are no-ops while
//! hiding is disabled and for programmatic or privileged transactions.
//!
//! - **`filters`**: `protect_syntax`, `insert_at_link_start_fix`, `enter_at_link_end_fix`
//! - **`enter`**: the Enter key handler
//! - **`list`**: list continuation for inserted line breaks

pub mod enter;
pub mod filters;
pub mod list;

use xi_rope::Rope;

use crate::{
    editing::{Change, LineRef, Selection, Transaction, UserEvent},
    ranges::HiddenRange,
};

pub use enter::handle_enter;
pub use filters::{enter_at_link_end_fix, insert_at_link_start_fix, protect_syntax};
pub use list::list_continuation;

/// What the guard sees of the surface when filtering.
#[derive(Debug, Clone, Copy)]
pub struct GuardContext<'a> {
    pub doc: &'a Rope,
    pub ranges: &'a [HiddenRange],
    pub enabled: bool,
    pub continue_lists: bool,
}

impl GuardContext<'_> {
    /// True if filters should look at `tr` at all.
    pub fn guards(&self, tr: &Transaction) -> bool {
        self.enabled && tr.is_user_initiated() && !tr.privileged && tr.doc_changed()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    Pass,
    Reject,
    Replace(Transaction),
}

pub type Filter = fn(&Transaction, &GuardContext<'_>) -> GuardOutcome;

/// An ordered list of named filters.
pub struct EditGuard {
    filters: Vec<(&'static str, Filter)>,
}

impl Default for EditGuard {
    fn default() -> Self {
        Self {
            filters: vec![
                ("protect_syntax", protect_syntax),
                ("insert_at_link_start_fix", insert_at_link_start_fix),
                ("enter_at_link_end_fix", enter_at_link_end_fix),
            ],
        }
    }
}

impl EditGuard {
    pub fn new(filters: Vec<(&'static str, Filter)>) -> Self {
        Self { filters }
    }

    pub fn filter_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.filters.iter().map(|(name, _)| *name)
    }

    pub fn run(&self, tr: &Transaction, ctx: &GuardContext<'_>) -> GuardOutcome {
        for (name, filter) in &self.filters {
            match filter(tr, ctx) {
                GuardOutcome::Pass => continue,
                outcome => {
                    log::trace!(
                        "{name}: {}",
                        if outcome == GuardOutcome::Reject { "rejected" } else { "redirected" }
                    );
                    return outcome;
                }
            }
        }
        GuardOutcome::Pass
    }
}

/// Inserts a line break (plus list continuation) at the end of `line` and puts
/// the caret after it.
pub(crate) fn newline_after(line: &LineRef, continue_lists: bool, event: UserEvent) -> Transaction {
    let mut insert = String::from("\n");
    if continue_lists {
        insert.push_str(&list_continuation(&line.text));
    }
    let caret = line.to + insert.len();
    Transaction::change(Change::insert(line.to, insert))
        .with_selection(Selection::cursor(caret))
        .with_user_event(event)
}
