//! Missing `#include` inference.

use std::collections::{BTreeSet, HashSet};

use cscribe_catalog::header_for;

use crate::buffer::SourceBuffer;
use crate::edit::{EditOperation, EditOrigin, UndoBehaviour};
use crate::patterns::{CALL_RE, INCLUDE_RE, code_lines, is_include_line};
use crate::position::Position;

/// Headers a buffer calls into but does not include.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MissingHeaders {
    /// Missing header names, sorted.
    pub headers: BTreeSet<&'static str>,
    /// Line the `#include` block is inserted at: one past the last
    /// existing include, or 0.
    pub insertion_line: usize,
}

impl MissingHeaders {
    /// Whether nothing needs inserting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Builds the single edit inserting every missing header.
    ///
    /// The block holds one `#include <H>` line per header in sorted order,
    /// followed by a blank line. Returns `None` when no header is missing.
    #[must_use]
    pub fn to_edit(&self, buffer: &SourceBuffer<'_>) -> Option<EditOperation> {
        if self.headers.is_empty() {
            return None;
        }
        let block: String = self
            .headers
            .iter()
            .map(|header| format!("#include <{header}>\n"))
            .chain(std::iter::once(String::from("\n")))
            .collect();

        let (insert_at, text) = if self.insertion_line < buffer.line_count() {
            (Position::new(self.insertion_line, 0), block)
        } else {
            (buffer.end(), format!("\n{block}"))
        };
        Some(EditOperation {
            insert_at,
            text,
            undo: UndoBehaviour::NewCheckpoint,
            origin: EditOrigin::Headers,
        })
    }
}

/// Computes the headers `buffer` needs but does not include.
///
/// Calls inside `//` tails and `/* ... */` comments, including comments
/// spanning several lines, are ignored. Existing
/// includes are matched by header name, so `#include "stdio.h"` satisfies a
/// call to `printf`.
#[must_use]
pub fn compute_missing_headers(buffer: &SourceBuffer<'_>) -> MissingHeaders {
    let included: HashSet<&str> = buffer
        .lines()
        .iter()
        .filter_map(|line| INCLUDE_RE.captures(line))
        .filter_map(|captures| captures.get(1))
        .map(|header| header.as_str().trim())
        .collect();

    let code = code_lines(buffer.lines().iter().copied());
    let headers = code
        .iter()
        .flat_map(|line| CALL_RE.captures_iter(line))
        .filter_map(|captures| captures.get(1))
        .filter_map(|name| header_for(name.as_str()))
        .filter(|header| !included.contains(header))
        .collect();

    let insertion_line = buffer
        .lines()
        .iter()
        .rposition(|line| is_include_line(line))
        .map_or(0, |index| index + 1);

    MissingHeaders {
        headers,
        insertion_line,
    }
}
