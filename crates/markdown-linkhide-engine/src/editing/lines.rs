use xi_rope::Rope;

use crate::editing::EditError;

/// A single line of the document with its absolute byte bounds.
///
/// `to` excludes the line break, so `to - from == text.len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRef {
    /// Zero-based line number.
    pub number: usize,
    /// Offset of the first byte of the line.
    pub from: usize,
    /// Offset just before the line break (or document end).
    pub to: usize,
    /// The line text without its trailing newline.
    pub text: String,
}

impl LineRef {
    pub fn len(&self) -> usize {
        self.to - self.from
    }

    pub fn is_empty(&self) -> bool {
        self.from == self.to
    }
}

/// Number of lines in the rope. An empty rope has one (empty) line.
pub fn line_count(rope: &Rope) -> usize {
    rope.line_of_offset(rope.len()) + 1
}

/// Returns the line with the given zero-based number.
pub fn line(rope: &Rope, number: usize) -> Result<LineRef, EditError> {
    let count = line_count(rope);
    if number >= count {
        return Err(EditError::LineOutOfRange { line: number, count });
    }
    let from = rope.offset_of_line(number);
    let next = if number + 1 < count {
        rope.offset_of_line(number + 1)
    } else {
        rope.len()
    };
    let raw = rope.slice_to_cow(from..next);
    let text = raw.trim_end_matches(['\n', '\r']).to_string();
    Ok(LineRef {
        number,
        from,
        to: from + text.len(),
        text,
    })
}

/// Returns the line containing `offset`. Offsets past the end clamp to the last line.
pub fn line_at(rope: &Rope, offset: usize) -> LineRef {
    let number = rope.line_of_offset(offset.min(rope.len()));
    // `number` comes from the rope itself, so it is always in range.
    line(rope, number).unwrap_or_else(|_| LineRef {
        number,
        from: rope.len(),
        to: rope.len(),
        text: String::new(),
    })
}
