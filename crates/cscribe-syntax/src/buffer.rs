//! Borrowed line view over a document.

use crate::position::{Position, utf16_len};

/// The lines of one document at one point in time.
///
/// A buffer borrows the caller's text and is rebuilt for every pass. Lines
/// are split on `\n`; a trailing `\r` is dropped so CRLF documents match the
/// same patterns as LF ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceBuffer<'a> {
    lines: Vec<&'a str>,
}

impl<'a> SourceBuffer<'a> {
    /// Splits `text` into lines.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        let lines = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect();
        Self { lines }
    }

    /// Returns all lines in document order.
    #[must_use]
    pub fn lines(&self) -> &[&'a str] {
        &self.lines
    }

    /// Returns the line at `index`, if it exists.
    #[must_use]
    pub fn line(&self, index: usize) -> Option<&'a str> {
        self.lines.get(index).copied()
    }

    /// Number of lines. An empty document has one empty line.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Position just past the last character of line `index`.
    #[must_use]
    pub fn line_end(&self, index: usize) -> Option<Position> {
        self.line(index)
            .map(|line| Position::new(index, utf16_len(line)))
    }

    /// Position just past the last character of the document.
    #[must_use]
    pub fn end(&self) -> Position {
        let last = self.lines.len().saturating_sub(1);
        self.line_end(last).unwrap_or_default()
    }
}
