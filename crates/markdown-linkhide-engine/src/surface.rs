//! # Editor Surface
//!
//! One editor surface and the link-hiding state that belongs to it. Every
//! state change runs through [`EditorSurface::dispatch`]:
//!
//! 1. the edit guard filters (or redirects, or rejects) the transaction
//! 2. the transaction commits and its effects are applied
//! 3. the hidden-range index and decorations are refreshed
//! 4. the host view is re-probed for mode changes
//! 5. the cursor corrector may dispatch one selection-only transaction
//!
//! Surfaces never share state, even when they show the same document.

use serde::{Deserialize, Serialize};

use crate::{
    cursor::{CorrectorPhase, CursorCorrector},
    decorations::{DecorationSet, build_decorations},
    editing::{
        Change, EditError, Effect, EditorState, LineRef, Patch, Selection, Span, Transaction,
        UserEvent,
    },
    grammar::{LinkAtCursor, LinkInfo, build_link_text, detect_link_at_cursor},
    guard::{self, EditGuard, GuardContext, GuardOutcome},
    mode::{Mode, ModeProbe, ModeTracker},
    planner::{
        Direction, LinePosition, LinkPlacement, compute_close_cursor_position,
        compute_skip_cursor_position, compute_skip_link_position,
    },
    ranges::{HiddenRange, HiddenRangeIndex},
};

/// Per-surface behaviour switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceSettings {
    /// Hide, guard and step over link syntax in live preview.
    pub keep_links_steady: bool,
    /// Continue list items when a line break is moved past a link.
    pub continue_lists: bool,
    /// After a link edit, leave the caret to the right of the link when possible.
    pub close_prefers_right: bool,
}

impl Default for SurfaceSettings {
    fn default() -> Self {
        Self {
            keep_links_steady: true,
            continue_lists: true,
            close_prefers_right: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Applied(Patch),
    /// The guard replaced the transaction; the patch is for the replacement.
    Redirected(Patch),
    /// The guard dropped the transaction; nothing changed.
    Rejected,
}

/// The link under the main caret, located on its line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkOnLine {
    pub line: usize,
    pub link: LinkAtCursor,
}

pub struct EditorSurface {
    state: EditorState,
    settings: SurfaceSettings,
    probe: Box<dyn ModeProbe>,
    mode: ModeTracker,
    force_visible: Option<Span>,
    index: HiddenRangeIndex,
    decorations: DecorationSet,
    guard: EditGuard,
    corrector: CursorCorrector,
}

impl EditorSurface {
    pub fn new(text: &str, settings: SurfaceSettings, probe: Box<dyn ModeProbe>) -> Self {
        let mode = ModeTracker::mounted(settings.keep_links_steady, probe.as_ref());
        let mut surface = Self {
            state: EditorState::new(text),
            settings,
            probe,
            mode,
            force_visible: None,
            index: HiddenRangeIndex::new(),
            decorations: DecorationSet::default(),
            guard: EditGuard::default(),
            corrector: CursorCorrector::new(),
        };
        surface.refresh();
        surface
    }

    pub fn from_bytes(
        bytes: &[u8],
        settings: SurfaceSettings,
        probe: Box<dyn ModeProbe>,
    ) -> anyhow::Result<Self> {
        let text = std::str::from_utf8(bytes)?;
        Ok(Self::new(text, settings, probe))
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn text(&self) -> String {
        self.state.text()
    }

    pub fn selection(&self) -> &Selection {
        self.state.selection()
    }

    pub fn settings(&self) -> SurfaceSettings {
        self.settings
    }

    pub fn mode(&self) -> Mode {
        self.mode.mode()
    }

    pub fn hiding_enabled(&self) -> bool {
        self.mode.enabled()
    }

    /// The ranges currently collapsed and protected; empty while hiding is off.
    pub fn hidden_ranges(&self) -> &[HiddenRange] {
        if self.mode.enabled() {
            self.index.ranges()
        } else {
            &[]
        }
    }

    pub fn decorations(&self) -> &DecorationSet {
        &self.decorations
    }

    pub fn force_visible(&self) -> Option<Span> {
        self.force_visible
    }

    /// Line `number` as it is currently displayed.
    pub fn rendered_line(&self, number: usize) -> Result<String, EditError> {
        let line = self.state.line(number)?;
        Ok(self.decorations.render(&line.text, line.from))
    }

    /// Filters and commits a transaction.
    pub fn dispatch(&mut self, tr: Transaction) -> Result<DispatchOutcome, EditError> {
        let outcome = self.guard.run(&tr, &self.guard_context());
        match outcome {
            GuardOutcome::Pass => Ok(DispatchOutcome::Applied(self.commit(tr)?)),
            GuardOutcome::Replace(redirected) => {
                Ok(DispatchOutcome::Redirected(self.commit(redirected)?))
            }
            GuardOutcome::Reject => {
                log::debug!("edit touching hidden link syntax dropped");
                Ok(DispatchOutcome::Rejected)
            }
        }
    }

    /// Applies a state effect through the normal dispatch path.
    pub fn dispatch_effect(&mut self, effect: Effect) -> Result<Patch, EditError> {
        self.commit(Transaction::effect(effect))
    }

    /// Enter key, consulted before default handling. Returns true if consumed.
    pub fn handle_enter(&mut self) -> Result<bool, EditError> {
        let tr = guard::handle_enter(&self.state, &self.guard_context());
        match tr {
            Some(tr) => {
                self.commit(tr)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Re-reads the host view's mode. Call after the host view changes.
    pub fn view_update(&mut self) {
        self.mode.view_update(self.probe.as_ref());
    }

    /// Flushes a debounced mode transition. Call once per host frame.
    pub fn tick(&mut self) -> Result<(), EditError> {
        let Some(effect) = self.mode.tick() else {
            return Ok(());
        };
        self.mode.begin_dispatch();
        let result = self.commit(Transaction::effect(effect));
        self.mode.end_dispatch();
        result.map(|_| ())
    }

    pub fn set_settings(&mut self, settings: SurfaceSettings) {
        self.settings = settings;
        self.mode.set_allowed(settings.keep_links_steady);
    }

    /// Tears down per-surface state.
    pub fn unmount(mut self) {
        self.mode.teardown();
        self.index.invalidate();
        log::debug!("surface unmounted");
    }

    /// The link touching the main caret, if any.
    pub fn link_at_cursor(&self) -> Option<LinkOnLine> {
        let head = self.state.selection().main_range().head;
        let line = self.state.line_at(head);
        detect_link_at_cursor(&line.text, head - line.from).map(|link| LinkOnLine {
            line: line.number,
            link,
        })
    }

    /// Replaces columns `[start, end)` of `line` with `text`, bypassing the guard.
    pub fn replace_on_line(
        &mut self,
        line: usize,
        start: usize,
        end: usize,
        text: &str,
    ) -> Result<Patch, EditError> {
        let from = self.state.offset_of(line, start)?;
        let to = self.state.offset_of(line, end)?;
        self.commit(Transaction::change(Change::replace(from, to, text)).privileged())
    }

    /// Moves the caret to a line/column, snapping back to a character boundary.
    pub fn place_cursor(&mut self, pos: LinePosition) -> Result<Patch, EditError> {
        self.move_caret(pos, None)
    }

    /// Writes `info` over the link at `[link_start, link_end)` on `line` and
    /// closes it by moving the caret just outside.
    pub fn apply_link_edit(
        &mut self,
        line: usize,
        link_start: usize,
        link_end: usize,
        info: &LinkInfo,
    ) -> Result<LinePosition, EditError> {
        let text = build_link_text(info);
        self.replace_on_line(line, link_start, link_end, &text)?;
        let link_end = link_start + text.len();
        let placement = self.placement(line, link_start, link_end)?;
        let target = compute_close_cursor_position(&placement, self.settings.close_prefers_right);
        let target = self.whole_char_right_of(target, line, link_end)?;
        self.place_cursor(target)?;
        Ok(target)
    }

    /// Moves the caret off the link under it, towards the nearer end.
    pub fn move_past_link(&mut self) -> Result<Option<LinePosition>, EditError> {
        let Some(found) = self.link_at_cursor() else {
            return Ok(None);
        };
        let head = self.state.selection().main_range().head;
        let cursor_ch = head - self.state.line(found.line)?.from;
        let placement = self.placement(found.line, found.link.start, found.link.end)?;
        let target = compute_skip_cursor_position(&placement, cursor_ch);
        let target = self.whole_char_right_of(target, found.line, found.link.end)?;
        self.place_cursor(target)?;
        Ok(Some(target))
    }

    /// The "skip link" command. With hiding on, the caret is placed at the edge
    /// of the displayed text and cursor correction carries it over the syntax.
    pub fn skip_link(&mut self, direction: Direction) -> Result<Option<LinePosition>, EditError> {
        let Some(found) = self.link_at_cursor() else {
            return Ok(None);
        };
        let target = compute_skip_link_position(
            found.line,
            &found.link.displayed,
            direction,
            self.mode.enabled(),
        );
        self.move_caret(target, Some(UserEvent::Select))?;
        Ok(Some(target))
    }

    /// Keeps the link under the caret expanded until the next edit or caret move.
    pub fn force_show_link_at_cursor(&mut self) -> Result<bool, EditError> {
        let Some(found) = self.link_at_cursor() else {
            return Ok(false);
        };
        let from = self.state.line(found.line)?.from;
        let span = Span::new(from + found.link.start, from + found.link.end);
        self.dispatch_effect(Effect::ForceShowLink(Some(span)))?;
        Ok(true)
    }

    pub fn clear_force_show(&mut self) -> Result<(), EditError> {
        self.dispatch_effect(Effect::ForceShowLink(None)).map(|_| ())
    }

    fn guard_context(&self) -> GuardContext<'_> {
        GuardContext {
            doc: self.state.doc(),
            ranges: self.hidden_ranges(),
            enabled: self.mode.enabled(),
            continue_lists: self.settings.continue_lists,
        }
    }

    fn placement(&self, line: usize, link_start: usize, link_end: usize) -> Result<LinkPlacement, EditError> {
        let current: LineRef = self.state.line(line)?;
        let prev_line_length = match line {
            0 => None,
            n => Some(self.state.line(n - 1)?.len()),
        };
        Ok(LinkPlacement {
            line,
            line_count: self.state.line_count(),
            line_length: current.len(),
            prev_line_length,
            link_start,
            link_end,
        })
    }

    /// The planner steps one byte past the link; make that one whole character.
    fn whole_char_right_of(
        &self,
        target: LinePosition,
        line: usize,
        link_end: usize,
    ) -> Result<LinePosition, EditError> {
        if target.line != line || target.ch != link_end + 1 {
            return Ok(target);
        }
        let text = self.state.line(line)?.text;
        let width = text
            .get(link_end..)
            .and_then(|rest| rest.chars().next())
            .map_or(1, char::len_utf8);
        Ok(LinePosition::new(line, link_end + width))
    }

    fn move_caret(&mut self, pos: LinePosition, event: Option<UserEvent>) -> Result<Patch, EditError> {
        let line = self.state.line(pos.line)?;
        if pos.ch > line.len() {
            return Err(EditError::ColumnOutOfRange {
                line: pos.line,
                ch: pos.ch,
                len: line.len(),
            });
        }
        let mut ch = pos.ch;
        while !line.text.is_char_boundary(ch) {
            ch -= 1;
        }
        let mut tr = Transaction::select(Selection::cursor(line.from + ch));
        tr.user_event = event;
        self.commit(tr)
    }

    fn commit(&mut self, tr: Transaction) -> Result<Patch, EditError> {
        let patch = self.state.apply(&tr)?;

        let mut force_set = false;
        for effect in &tr.effects {
            match *effect {
                Effect::SetHidingEnabled(enabled) => self.mode.apply(enabled),
                Effect::ForceShowLink(span) => {
                    self.force_visible = span;
                    force_set = true;
                }
            }
        }
        if !force_set
            && self.force_visible.is_some()
            && self.corrector.phase() == CorrectorPhase::Idle
            && (patch.doc_changed || patch.selection_changed())
        {
            self.force_visible = None;
        }

        self.refresh();
        self.mode.view_update(self.probe.as_ref());
        self.correct(&tr, &patch)?;
        Ok(patch)
    }

    fn refresh(&mut self) {
        self.index.refresh(
            self.state.doc(),
            self.state.version(),
            self.state.selection(),
            self.force_visible,
        );
        self.decorations = build_decorations(self.mode.enabled(), self.index.ranges());
    }

    fn correct(&mut self, tr: &Transaction, patch: &Patch) -> Result<(), EditError> {
        if !self.mode.enabled() || !(patch.doc_changed || patch.selection_changed()) {
            return Ok(());
        }
        let Some(selection) = self.corrector.plan(
            &patch.old_selection,
            &patch.new_selection,
            &tr.changes,
            self.index.ranges(),
            self.state.doc(),
            tr.is_pointer(),
        ) else {
            return Ok(());
        };

        log::debug!(
            "caret corrected {:?} -> {:?}",
            patch.new_selection.main_range().head,
            selection.main_range().head
        );
        self.corrector.begin();
        let result = self.commit(Transaction::select(selection));
        self.corrector.finish();
        result.map(|_| ())
    }
}
