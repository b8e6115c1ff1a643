use std::ops::Range;

use xi_rope::{Rope, delta::DeltaElement};

use crate::editing::{
    Assoc, EditError, Selection, SelectionRange, Transaction,
    lines::{self, LineRef},
};

/// Result of committing a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    /// Byte ranges of inserted text, in post-transaction offsets.
    pub changed: Vec<Range<usize>>,
    pub old_selection: Selection,
    pub new_selection: Selection,
    pub doc_changed: bool,
    pub version: u64,
}

impl Patch {
    pub fn selection_changed(&self) -> bool {
        self.old_selection != self.new_selection
    }
}

/// Document text plus selection for one editor surface.
///
/// The rope is the single source of truth; every mutation goes through
/// [`EditorState::apply`].
#[derive(Debug, Clone)]
pub struct EditorState {
    doc: Rope,
    selection: Selection,
    /// Incremented whenever the document text changes.
    version: u64,
}

impl EditorState {
    pub fn new(text: &str) -> Self {
        Self {
            doc: Rope::from(text),
            selection: Selection::cursor(0),
            version: 0,
        }
    }

    /// Create a state from raw bytes, which must be UTF-8.
    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let text = std::str::from_utf8(bytes)?;
        Ok(Self::new(text))
    }

    pub fn doc(&self) -> &Rope {
        &self.doc
    }

    pub fn text(&self) -> String {
        self.doc.to_string()
    }

    pub fn len(&self) -> usize {
        self.doc.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doc.len() == 0
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn line_count(&self) -> usize {
        lines::line_count(&self.doc)
    }

    pub fn line(&self, number: usize) -> Result<LineRef, EditError> {
        lines::line(&self.doc, number)
    }

    pub fn line_at(&self, offset: usize) -> LineRef {
        lines::line_at(&self.doc, offset)
    }

    /// Converts a line/column pair to an absolute offset.
    pub fn offset_of(&self, line: usize, ch: usize) -> Result<usize, EditError> {
        let l = self.line(line)?;
        if ch > l.len() {
            return Err(EditError::ColumnOutOfRange {
                line,
                ch,
                len: l.len(),
            });
        }
        Ok(l.from + ch)
    }

    /// Commits a transaction. Nothing is modified if it fails validation.
    pub fn apply(&mut self, tr: &Transaction) -> Result<Patch, EditError> {
        tr.changes.validate(self.doc.len())?;

        let doc_changed = tr.doc_changed();
        let delta = tr.changes.to_delta(&self.doc);

        let mut changed = Vec::new();
        let mut cursor = 0;
        for op in delta.els.iter() {
            match op {
                DeltaElement::Copy(from, to) => {
                    cursor += to - from;
                }
                DeltaElement::Insert(inserted) => {
                    let start = cursor;
                    let end = cursor + inserted.len();
                    changed.push(start..end);
                    cursor = end;
                }
            }
        }

        let new_doc = if doc_changed {
            delta.apply(&self.doc)
        } else {
            self.doc.clone()
        };

        let new_selection = match &tr.selection {
            Some(sel) => sel.clone(),
            None => self.map_selection(tr),
        };
        if let Some(pos) = new_selection.positions().find(|&p| p > new_doc.len()) {
            return Err(EditError::SelectionOutOfBounds {
                pos,
                len: new_doc.len(),
            });
        }

        let old_selection = std::mem::replace(&mut self.selection, new_selection.clone());
        self.doc = new_doc;
        if doc_changed {
            self.version += 1;
        }

        Ok(Patch {
            changed,
            old_selection,
            new_selection,
            doc_changed,
            version: self.version,
        })
    }

    fn map_selection(&self, tr: &Transaction) -> Selection {
        let ranges = self
            .selection
            .ranges
            .iter()
            .map(|r| {
                SelectionRange::new(
                    tr.changes.map_pos(r.anchor, Assoc::After),
                    tr.changes.map_pos(r.head, Assoc::After),
                )
            })
            .collect();
        Selection::with_ranges(ranges, self.selection.main)
    }
}
