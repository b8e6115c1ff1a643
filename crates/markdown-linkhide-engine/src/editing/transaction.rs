use serde::{Deserialize, Serialize};
use xi_rope::{Delta, DeltaBuilder, Rope, RopeInfo};

use crate::editing::{EditError, Selection, Span};

/// What the user did to produce a transaction.
///
/// Transactions without a user event are programmatic and pass every edit
/// filter untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserEvent {
    /// Typed text (including Enter handled by the default keymap).
    Input,
    Paste,
    Delete,
    /// Keyboard-driven selection movement.
    Select,
    /// Selection set by a pointer click or drag.
    SelectPointer,
}

/// Typed state effects carried by a transaction.
///
/// These are the only way per-surface presentation state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// Turn link syntax hiding on or off for the surface.
    SetHidingEnabled(bool),
    /// Keep one link fully expanded (`Some`) or clear the marker (`None`).
    ForceShowLink(Option<Span>),
}

/// Which side of an insertion a mapped position sticks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assoc {
    Before,
    After,
}

/// Replace `[from, to)` of the pre-transaction document with `insert`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    pub from: usize,
    pub to: usize,
    pub insert: String,
}

impl Change {
    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self {
            from: at,
            to: at,
            insert: text.into(),
        }
    }

    pub fn delete(from: usize, to: usize) -> Self {
        Self {
            from,
            to,
            insert: String::new(),
        }
    }

    pub fn replace(from: usize, to: usize, text: impl Into<String>) -> Self {
        Self {
            from,
            to,
            insert: text.into(),
        }
    }

    /// True for a pure insertion (nothing removed).
    pub fn is_insertion(&self) -> bool {
        self.from == self.to && !self.insert.is_empty()
    }

    /// True when the change inserts a single line break, optionally followed by
    /// indentation (what an Enter keypress produces).
    pub fn is_line_break(&self) -> bool {
        if !self.is_insertion() {
            return false;
        }
        let rest = self
            .insert
            .strip_prefix("\r\n")
            .or_else(|| self.insert.strip_prefix('\n'));
        match rest {
            Some(rest) => !rest.contains('\n') && rest.trim().is_empty(),
            None => false,
        }
    }

    fn is_noop(&self) -> bool {
        self.from == self.to && self.insert.is_empty()
    }
}

/// A sorted, non-overlapping set of changes against one document version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    pub changes: Vec<Change>,
}

impl ChangeSet {
    pub fn new(changes: Vec<Change>) -> Self {
        Self { changes }
    }

    pub fn is_empty(&self) -> bool {
        self.changes.iter().all(Change::is_noop)
    }

    /// Checks ordering and bounds against a document of length `len`.
    pub fn validate(&self, len: usize) -> Result<(), EditError> {
        let mut previous_end = 0;
        for c in &self.changes {
            if c.from > c.to || c.to > len {
                return Err(EditError::ChangeOutOfBounds {
                    from: c.from,
                    to: c.to,
                    len,
                });
            }
            if c.from < previous_end {
                return Err(EditError::UnorderedChanges {
                    from: c.from,
                    previous_end,
                });
            }
            previous_end = c.to;
        }
        Ok(())
    }

    /// Compiles the changes into an xi-rope delta over `doc`.
    pub fn to_delta(&self, doc: &Rope) -> Delta<RopeInfo> {
        let mut builder = DeltaBuilder::new(doc.len());
        for c in self.changes.iter().filter(|c| !c.is_noop()) {
            builder.replace(c.from..c.to, Rope::from(c.insert.as_str()));
        }
        builder.build()
    }

    /// Maps a pre-transaction offset to its post-transaction equivalent.
    pub fn map_pos(&self, pos: usize, assoc: Assoc) -> usize {
        let mut shift: isize = 0;
        for c in &self.changes {
            if c.from > pos {
                break;
            }
            let added = c.insert.len() as isize;
            let removed = (c.to - c.from) as isize;
            if c.from == pos && c.to == pos {
                if assoc == Assoc::After {
                    shift += added;
                }
                continue;
            }
            if c.to <= pos {
                shift += added - removed;
                continue;
            }
            // `pos` falls inside a replaced region.
            let base = (c.from as isize + shift) as usize;
            return if assoc == Assoc::After && c.from < pos {
                base + c.insert.len()
            } else {
                base
            };
        }
        (pos as isize + shift) as usize
    }
}

/// A candidate state update: document changes, a new selection, effects and
/// the metadata edit filters key off.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transaction {
    pub changes: ChangeSet,
    /// Explicit post-transaction selection. `None` maps the old one through the changes.
    pub selection: Option<Selection>,
    pub effects: Vec<Effect>,
    pub user_event: Option<UserEvent>,
    /// Programmatic link edits set this to bypass the syntax guard.
    pub privileged: bool,
}

impl Transaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn change(change: Change) -> Self {
        Self {
            changes: ChangeSet::new(vec![change]),
            ..Self::default()
        }
    }

    pub fn changes(changes: Vec<Change>) -> Self {
        Self {
            changes: ChangeSet::new(changes),
            ..Self::default()
        }
    }

    /// A selection-only transaction.
    pub fn select(selection: Selection) -> Self {
        Self {
            selection: Some(selection),
            ..Self::default()
        }
    }

    pub fn effect(effect: Effect) -> Self {
        Self {
            effects: vec![effect],
            ..Self::default()
        }
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = Some(selection);
        self
    }

    pub fn with_user_event(mut self, event: UserEvent) -> Self {
        self.user_event = Some(event);
        self
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn privileged(mut self) -> Self {
        self.privileged = true;
        self
    }

    pub fn doc_changed(&self) -> bool {
        !self.changes.is_empty()
    }

    pub fn is_user_initiated(&self) -> bool {
        self.user_event.is_some()
    }

    pub fn is_pointer(&self) -> bool {
        self.user_event == Some(UserEvent::SelectPointer)
    }

    /// The single non-empty change of this transaction, if it has exactly one.
    pub fn single_change(&self) -> Option<&Change> {
        let mut live = self.changes.changes.iter().filter(|c| !c.is_noop());
        let first = live.next()?;
        live.next().is_none().then_some(first)
    }
}
