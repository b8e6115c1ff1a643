//! # Text Substrate
//!
//! The minimal editor host the link-hiding core runs against:
//!
//! - **`state`**: `EditorState`: an `xi_rope::Rope` document, the selection and
//!   a version counter; transactions are committed through xi-rope deltas
//! - **`transaction`**: `Transaction`, `ChangeSet`, `Change`, `UserEvent` and the
//!   typed `Effect`s that carry per-surface state changes
//! - **`selection`**: `{anchor, head}` ranges
//! - **`lines`**: line addressing over the rope
//! - **`span`**: plain `[start, end)` byte ranges
//!
//! Offsets are byte offsets into the UTF-8 document throughout.

pub mod error;
pub mod lines;
pub mod selection;
pub mod span;
pub mod state;
pub mod transaction;

pub use error::EditError;
pub use lines::LineRef;
pub use selection::{Selection, SelectionRange};
pub use span::Span;
pub use state::{EditorState, Patch};
pub use transaction::{Assoc, Change, ChangeSet, Effect, Transaction, UserEvent};
