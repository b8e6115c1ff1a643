use std::collections::BTreeSet;

use xi_rope::Rope;

use crate::editing::{Selection, Span, lines};

use super::{HiddenRange, scan_line, sort_ranges};

/// Hidden ranges for every line touched by a selection anchor or head.
///
/// Only those lines are scanned; links elsewhere are left to the renderer's
/// own "not near the cursor" handling.
pub fn compute_hidden_ranges(doc: &Rope, selection: &Selection) -> Vec<HiddenRange> {
    let line_numbers: BTreeSet<usize> = selection
        .positions()
        .map(|pos| doc.line_of_offset(pos.min(doc.len())))
        .collect();

    let mut out = vec![];
    for number in line_numbers {
        if let Ok(line) = lines::line(doc, number) {
            out.extend(scan_line(&line.text, line.from));
        }
    }
    sort_ranges(&mut out);
    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct IndexKey {
    version: u64,
    selection: Selection,
    force_visible: Option<Span>,
}

/// Cached working set of hidden ranges for one surface.
///
/// Recomputed only when the document version, the selection or the
/// force-shown link changes.
#[derive(Debug, Default)]
pub struct HiddenRangeIndex {
    key: Option<IndexKey>,
    ranges: Vec<HiddenRange>,
}

impl HiddenRangeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Brings the index up to date. Returns true if it was recomputed.
    pub fn refresh(
        &mut self,
        doc: &Rope,
        version: u64,
        selection: &Selection,
        force_visible: Option<Span>,
    ) -> bool {
        let key = IndexKey {
            version,
            selection: selection.clone(),
            force_visible,
        };
        if self.key.as_ref() == Some(&key) {
            return false;
        }

        let mut ranges = compute_hidden_ranges(doc, selection);
        if let Some(span) = force_visible {
            ranges.retain(|r| !span.encloses(r.from, r.to));
        }
        log::trace!("hidden ranges recomputed: {} ranges", ranges.len());
        self.ranges = ranges;
        self.key = Some(key);
        true
    }

    pub fn ranges(&self) -> &[HiddenRange] {
        &self.ranges
    }

    /// Drops the cache so the next refresh always recomputes.
    pub fn invalidate(&mut self) {
        self.key = None;
        self.ranges.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::SelectionRange;
    use pretty_assertions::assert_eq;

    const DOC: &str = "first [[a]]\nsecond [b](c)\nthird [[d]]";

    #[test]
    fn only_selected_lines_are_scanned() {
        let doc = Rope::from(DOC);
        let ranges = compute_hidden_ranges(&doc, &Selection::cursor(15));
        assert_eq!(
            ranges,
            vec![HiddenRange::leading(19, 20), HiddenRange::trailing(21, 25)]
        );
    }

    #[test]
    fn anchor_and_head_lines_are_both_scanned_once() {
        let doc = Rope::from(DOC);
        let sel = Selection::with_ranges(
            vec![SelectionRange::new(2, 30), SelectionRange::cursor(8)],
            0,
        );
        let ranges = compute_hidden_ranges(&doc, &sel);
        assert_eq!(
            ranges,
            vec![
                HiddenRange::leading(6, 8),
                HiddenRange::trailing(9, 11),
                HiddenRange::leading(32, 34),
                HiddenRange::trailing(35, 37),
            ]
        );
    }

    #[test]
    fn refresh_reuses_cache_until_inputs_change() {
        let doc = Rope::from(DOC);
        let mut index = HiddenRangeIndex::new();
        assert!(index.refresh(&doc, 0, &Selection::cursor(0), None));
        assert!(!index.refresh(&doc, 0, &Selection::cursor(0), None));
        assert!(index.refresh(&doc, 1, &Selection::cursor(0), None));
        assert!(index.refresh(&doc, 1, &Selection::cursor(3), None));
        assert_eq!(index.ranges().len(), 2);
    }

    #[test]
    fn force_visible_link_is_excluded() {
        let doc = Rope::from(DOC);
        let mut index = HiddenRangeIndex::new();
        index.refresh(&doc, 0, &Selection::cursor(0), Some(Span::new(6, 11)));
        assert!(index.ranges().is_empty());
    }
}
