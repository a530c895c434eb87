//! Insert-only edits produced by the heuristics.

use crate::position::Position;
#[cfg(any(test, feature = "test-support"))]
use crate::position::byte_offset;

/// How an edit interacts with the host's undo history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoBehaviour {
    /// The edit opens its own undo step.
    NewCheckpoint,
    /// The edit joins the user's preceding undo step.
    MergeWithPrevious,
}

/// Which pass produced an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOrigin {
    /// A single appended `;`.
    Terminator,
    /// A block of `#include` lines.
    Headers,
    /// A block of forward declarations.
    Prototypes,
}

impl EditOrigin {
    /// Human-readable label shown by hosts that name edits.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Terminator => "cscribe: terminator",
            Self::Headers => "cscribe: headers",
            Self::Prototypes => "cscribe: prototypes",
        }
    }
}

/// Text to insert at one position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOperation {
    /// Where the text goes.
    pub insert_at: Position,
    /// The inserted text, possibly spanning several lines.
    pub text: String,
    /// Undo grouping requested from the host.
    pub undo: UndoBehaviour,
    /// The pass that produced the edit.
    pub origin: EditOrigin,
}

#[cfg(any(test, feature = "test-support"))]
impl EditOperation {
    /// Applies the insertion to `text` the way an editor host would.
    ///
    /// Returns `None` if the insertion point does not exist in `text`.
    #[must_use]
    pub fn apply(&self, text: &str) -> Option<String> {
        let line_start = line_start_offset(text, self.insert_at.line_index())?;
        let rest = text.get(line_start..)?;
        let raw_line = rest.split('\n').next().unwrap_or(rest);
        let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
        let offset = line_start.checked_add(byte_offset(line, self.insert_at.column)?)?;

        let mut updated = String::with_capacity(text.len() + self.text.len());
        updated.push_str(text.get(..offset)?);
        updated.push_str(&self.text);
        updated.push_str(text.get(offset..)?);
        Some(updated)
    }
}

#[cfg(any(test, feature = "test-support"))]
fn line_start_offset(text: &str, target_line: usize) -> Option<usize> {
    if target_line == 0 {
        return Some(0);
    }
    text.match_indices('\n')
        .nth(target_line - 1)
        .map(|(index, _)| index + '\n'.len_utf8())
}
