use thiserror::Error;

/// Errors raised by the text substrate when a transaction or query is malformed.
///
/// Link syntax problems are never errors; these only cover offsets and
/// line numbers that do not exist in the document.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("change {from}..{to} is outside the document (length {len})")]
    ChangeOutOfBounds { from: usize, to: usize, len: usize },

    #[error("changes must be sorted and non-overlapping (change at {from} follows one ending at {previous_end})")]
    UnorderedChanges { from: usize, previous_end: usize },

    #[error("selection position {pos} is past the end of the document (length {len})")]
    SelectionOutOfBounds { pos: usize, len: usize },

    #[error("line {line} does not exist (document has {count} lines)")]
    LineOutOfRange { line: usize, count: usize },

    #[error("column {ch} is past the end of line {line} (length {len})")]
    ColumnOutOfRange { line: usize, ch: usize, len: usize },
}
