//! # Cursor Correction
//!
//! Keeps selection heads out of hidden ranges so a collapsed link does not
//! re-expand just because the caret passed through it.
//!
//! - **`correct`**: the pure geometry (`correct_cursor_pos`, `correct_head`)
//! - [`CursorCorrector`]: runs after each commit and produces at most one
//!   corrective selection, guarded by an explicit `Idle | Correcting` phase

pub mod correct;

use xi_rope::Rope;

use crate::{
    editing::{Assoc, ChangeSet, Selection, SelectionRange},
    ranges::HiddenRange,
};

pub use correct::{MAX_CORRECTION_PASSES, correct_cursor_pos, correct_head};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CorrectorPhase {
    #[default]
    Idle,
    /// A corrective transaction is being applied; further corrections are suppressed.
    Correcting,
}

#[derive(Debug, Default)]
pub struct CursorCorrector {
    phase: CorrectorPhase,
}

impl CursorCorrector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> CorrectorPhase {
        self.phase
    }

    /// The corrected selection after a commit, or `None` if every head is fine.
    ///
    /// `old` is the selection before the commit; its heads are mapped through
    /// `changes` to get each range's direction of travel. A head that only
    /// followed the text it sits in (typing, deleting) has not moved and is
    /// left alone. Collapsed ranges stay collapsed; otherwise only the head
    /// moves.
    pub fn plan(
        &self,
        old: &Selection,
        new: &Selection,
        changes: &ChangeSet,
        ranges: &[HiddenRange],
        doc: &Rope,
        is_pointer: bool,
    ) -> Option<Selection> {
        if self.phase == CorrectorPhase::Correcting || ranges.is_empty() {
            return None;
        }

        let mut changed = false;
        let corrected = new
            .ranges
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let old_head = match old.ranges.get(i) {
                    Some(o) if changes.map_pos(o.head, Assoc::After) == r.head => return *r,
                    Some(o) => changes.map_pos(o.head, Assoc::Before),
                    None => r.head,
                };
                match correct_head(r.head, old_head, ranges, doc, is_pointer) {
                    Some(head) => {
                        changed = true;
                        if r.is_empty() {
                            SelectionRange::cursor(head)
                        } else {
                            SelectionRange::new(r.anchor, head)
                        }
                    }
                    None => *r,
                }
            })
            .collect();

        changed.then(|| Selection::with_ranges(corrected, new.main))
    }

    pub fn begin(&mut self) {
        self.phase = CorrectorPhase::Correcting;
    }

    pub fn finish(&mut self) {
        self.phase = CorrectorPhase::Idle;
    }
}
