//! Zero-based positions with UTF-16 columns.
//!
//! Columns count UTF-16 code units so positions can be handed to an LSP
//! client without re-encoding.

use serde::{Deserialize, Serialize};

/// A zero-based line and UTF-16 column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Zero-based line index.
    pub line: u32,
    /// Zero-based column in UTF-16 code units.
    pub column: u32,
}

impl Position {
    /// Creates a position from a line index and a UTF-16 column.
    #[must_use]
    pub fn new(line: usize, column: u32) -> Self {
        // Line numbers will realistically never exceed u32::MAX.
        Self {
            line: u32::try_from(line).unwrap_or(u32::MAX),
            column,
        }
    }

    /// Line index as `usize` for slice lookups.
    #[must_use]
    pub fn line_index(self) -> usize {
        usize::try_from(self.line).unwrap_or(usize::MAX)
    }
}

/// A half-open span between two positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    /// Inclusive start.
    pub start: Position,
    /// Exclusive end.
    pub end: Position,
}

impl Range {
    /// Creates a span from `start` to `end`.
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Span on `line` between two byte offsets, converted to UTF-16 columns.
    pub(crate) fn on_line(line_index: usize, line: &str, start_byte: usize, end_byte: usize) -> Self {
        Self::new(
            Position::new(line_index, utf16_column(line, start_byte)),
            Position::new(line_index, utf16_column(line, end_byte)),
        )
    }
}

/// Length of `text` in UTF-16 code units, saturating at `u32::MAX`.
#[must_use]
pub fn utf16_len(text: &str) -> u32 {
    u32::try_from(text.encode_utf16().count()).unwrap_or(u32::MAX)
}

/// UTF-16 column of the byte offset `byte` within `line`.
pub(crate) fn utf16_column(line: &str, byte: usize) -> u32 {
    utf16_len(line.get(..byte).unwrap_or(line))
}

/// Byte offset within `line` of the UTF-16 `column`.
///
/// Returns `None` when the column lies past the end of the line or splits a
/// surrogate pair.
#[must_use]
pub fn byte_offset(line: &str, column: u32) -> Option<usize> {
    let mut units = 0_u32;
    for (index, character) in line.char_indices() {
        if units == column {
            return Some(index);
        }
        units = units.saturating_add(u32::try_from(character.len_utf16()).unwrap_or(2));
        if units > column {
            return None;
        }
    }
    (units == column).then_some(line.len())
}
