//! Link syntax hiding for live-preview markdown editors.
//!
//! - **`editing`**: rope-backed editor state, transactions and selections
//! - **`grammar`**: link recognition, parsing and building
//! - **`ranges`**: hidden syntax ranges and their per-surface index
//! - **`decorations`**: the collapsed view of hidden ranges
//! - **`cursor`**: moves carets off hidden syntax after each commit
//! - **`guard`**: keeps user edits from landing inside hidden syntax
//! - **`mode`**: decides whether hiding is active for a surface
//! - **`planner`**: caret placement for link commands
//! - **`surface`**: ties the above together for one editor surface

pub mod cursor;
pub mod decorations;
pub mod editing;
pub mod grammar;
pub mod guard;
pub mod mode;
pub mod planner;
pub mod ranges;
pub mod surface;

// Re-export key types for easier usage
pub use decorations::{Decoration, DecorationSet};
pub use editing::{EditError, EditorState, Selection, Span, Transaction};
pub use grammar::{LinkInfo, build_link_text};
pub use mode::{ContainerChain, Mode, ModeProbe, SurfaceContainer};
pub use planner::{Direction, LinePosition};
pub use ranges::{HiddenRange, Side};
pub use surface::{DispatchOutcome, EditorSurface, SurfaceSettings};
