//! # Mode Tracking
//!
//! Decides whether link hiding is active for a surface. Hiding runs only in
//! live preview; raw source editing always shows every character.
//!
//! The host describes its surface through a [`ModeProbe`]: the chain of
//! container elements around the editor (innermost first) and, optionally,
//! a direct API answer. Without any definitive signal the surface is
//! treated as live preview.

use std::{cell::RefCell, rc::Rc};

use serde::{Deserialize, Serialize};

use crate::editing::Effect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    Source,
    Live,
    Preview,
}

impl Mode {
    pub fn hides_syntax(self) -> bool {
        self == Mode::Live
    }

    fn from_attribute(value: &str) -> Option<Self> {
        match value {
            "source" => Some(Mode::Source),
            "live" | "live-preview" => Some(Mode::Live),
            "preview" | "reading" => Some(Mode::Preview),
            _ => None,
        }
    }
}

/// One element in the host's container chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurfaceContainer {
    pub classes: Vec<String>,
    pub attributes: Vec<(String, String)>,
}

impl SurfaceContainer {
    pub fn with_classes(classes: &[&str]) -> Self {
        Self {
            classes: classes.iter().map(|c| c.to_string()).collect(),
            attributes: vec![],
        }
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.push((name.to_string(), value.to_string()));
        self
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// The mode this container states on its own, if any.
    fn classify(&self) -> Option<Mode> {
        if self.has_class("is-live-preview") {
            return Some(Mode::Live);
        }
        if let Some(mode) = self.attribute("data-mode").and_then(Mode::from_attribute) {
            return Some(mode);
        }
        if self.has_class("markdown-reading-view") || self.has_class("markdown-preview-view") {
            return Some(Mode::Preview);
        }
        if self.has_class("markdown-source-view") {
            return Some(Mode::Source);
        }
        None
    }
}

/// Host-side view of an editor surface's mode.
pub trait ModeProbe {
    /// Containers from the editor element outwards.
    fn containers(&self) -> Vec<SurfaceContainer>;

    /// A direct answer from the host API, consulted when the containers say nothing.
    fn query_mode(&self) -> Option<Mode> {
        None
    }
}

/// A plain container chain, for hosts that snapshot their element tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerChain {
    pub containers: Vec<SurfaceContainer>,
    pub api_mode: Option<Mode>,
}

impl ContainerChain {
    pub fn new(containers: Vec<SurfaceContainer>) -> Self {
        Self {
            containers,
            api_mode: None,
        }
    }

    pub fn live() -> Self {
        Self::new(vec![SurfaceContainer::with_classes(&[
            "markdown-source-view",
            "is-live-preview",
        ])])
    }

    pub fn source() -> Self {
        Self::new(vec![SurfaceContainer::with_classes(&["markdown-source-view"])])
    }
}

impl ModeProbe for ContainerChain {
    fn containers(&self) -> Vec<SurfaceContainer> {
        self.containers.clone()
    }

    fn query_mode(&self) -> Option<Mode> {
        self.api_mode
    }
}

impl<P: ModeProbe + ?Sized> ModeProbe for Rc<RefCell<P>> {
    fn containers(&self) -> Vec<SurfaceContainer> {
        self.borrow().containers()
    }

    fn query_mode(&self) -> Option<Mode> {
        self.borrow().query_mode()
    }
}

/// Resolves the surface mode: containers first, then the API, then live.
pub fn resolve_mode(probe: &dyn ModeProbe) -> Mode {
    probe
        .containers()
        .iter()
        .find_map(SurfaceContainer::classify)
        .or_else(|| probe.query_mode())
        .unwrap_or(Mode::Live)
}

/// Per-surface "hiding enabled" state machine.
///
/// View updates record a pending target; [`ModeTracker::tick`] turns it into
/// at most one [`Effect::SetHidingEnabled`]. A flip that reverts before the
/// tick produces nothing.
#[derive(Debug)]
pub struct ModeTracker {
    enabled: bool,
    mode: Mode,
    /// Settings toggle; when false hiding stays off in every mode.
    allowed: bool,
    pending: Option<bool>,
    dispatching: bool,
    mounted: bool,
}

impl ModeTracker {
    pub fn new(allowed: bool) -> Self {
        Self {
            enabled: allowed,
            mode: Mode::Live,
            allowed,
            pending: None,
            dispatching: false,
            mounted: true,
        }
    }

    /// A tracker for a freshly mounted surface, with the mode resolved now
    /// rather than on the first view update.
    pub fn mounted(allowed: bool, probe: &dyn ModeProbe) -> Self {
        let mode = resolve_mode(probe);
        Self {
            enabled: allowed && mode.hides_syntax(),
            mode,
            ..Self::new(allowed)
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Re-resolves the mode after a view update.
    pub fn view_update(&mut self, probe: &dyn ModeProbe) {
        if self.dispatching || !self.mounted {
            return;
        }
        self.mode = resolve_mode(probe);
        self.schedule();
    }

    pub fn set_allowed(&mut self, allowed: bool) {
        self.allowed = allowed;
        if self.mounted {
            self.schedule();
        }
    }

    fn schedule(&mut self) {
        let want = self.allowed && self.mode.hides_syntax();
        self.pending = (want != self.enabled).then_some(want);
    }

    /// Flushes the debounced transition.
    pub fn tick(&mut self) -> Option<Effect> {
        let want = self.pending.take()?;
        (want != self.enabled).then_some(Effect::SetHidingEnabled(want))
    }

    /// Marks the start of dispatching a tracker effect; view updates are ignored until
    /// [`ModeTracker::end_dispatch`].
    pub fn begin_dispatch(&mut self) {
        self.dispatching = true;
    }

    pub fn end_dispatch(&mut self) {
        self.dispatching = false;
    }

    /// Applies a committed `SetHidingEnabled` effect.
    pub fn apply(&mut self, enabled: bool) {
        if self.enabled != enabled {
            log::debug!("link hiding {} ({:?})", if enabled { "enabled" } else { "disabled" }, self.mode);
        }
        self.enabled = enabled;
        if self.pending == Some(enabled) {
            self.pending = None;
        }
    }

    pub fn teardown(&mut self) {
        self.mounted = false;
        self.pending = None;
        self.enabled = false;
    }
}
