//! Forward declaration synthesis for functions defined after `main`.
//!
//! The search is bounded by two lines: the last `#include` and the first
//! `main` definition after it. Definitions below `main` need a prototype
//! somewhere between those two lines; definitions above `main` are already
//! visible to it and are never considered.

use std::collections::HashSet;

use crate::buffer::SourceBuffer;
use crate::edit::{EditOperation, EditOrigin, UndoBehaviour};
use crate::patterns::{DECLARATION_RE, DEFINITION_RE, MAIN_RE, is_include_line};
use crate::position::Position;

/// A function defined after `main` with no forward declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrototypeCandidate {
    /// Function name.
    pub name: String,
    /// The synthesized declaration, including the trailing `;`.
    pub signature: String,
}

/// The prototypes a buffer is missing and where they go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingPrototypes {
    /// Candidates in the order their definitions appear.
    pub candidates: Vec<PrototypeCandidate>,
    /// Line the block is inserted at, directly below the last include.
    pub insertion_line: usize,
}

impl MissingPrototypes {
    /// Builds the single edit inserting every candidate.
    ///
    /// The block is one prototype per line with a blank line on each side.
    /// Returns `None` when there are no candidates.
    #[must_use]
    pub fn to_edit(&self) -> Option<EditOperation> {
        if self.candidates.is_empty() {
            return None;
        }
        let mut text = String::from("\n");
        for candidate in &self.candidates {
            text.push_str(&candidate.signature);
            text.push('\n');
        }
        text.push('\n');
        Some(EditOperation {
            insert_at: Position::new(self.insertion_line, 0),
            text,
            undo: UndoBehaviour::NewCheckpoint,
            origin: EditOrigin::Prototypes,
        })
    }
}

/// Finds functions defined after `main` that lack a prototype above it.
///
/// Returns `None` when the buffer has no `#include` or no `main` definition
/// below the last one. Otherwise returns the (possibly empty) list of
/// missing prototypes.
///
/// # Examples
///
/// ```
/// use cscribe_syntax::{SourceBuffer, compute_missing_prototypes};
///
/// let text = "#include <stdio.h>\n\nint main(void) {\n  return add(1, 2);\n}\nint add(int a,int b){ return a+b; }";
/// let missing = compute_missing_prototypes(&SourceBuffer::new(text)).unwrap_or_else(|| panic!("anchor"));
/// assert_eq!(missing.candidates[0].signature, "int add(int a,int b);");
/// ```
#[must_use]
pub fn compute_missing_prototypes(buffer: &SourceBuffer<'_>) -> Option<MissingPrototypes> {
    let lines = buffer.lines();
    let last_include = lines.iter().rposition(|line| is_include_line(line))?;
    let anchor = lines
        .iter()
        .enumerate()
        .skip(last_include + 1)
        .find(|(_, line)| MAIN_RE.is_match(line))
        .map(|(index, _)| index)?;

    let declared: HashSet<&str> = lines
        .get(last_include + 1..anchor)
        .unwrap_or_default()
        .iter()
        .flat_map(|line| DECLARATION_RE.captures_iter(line))
        .filter_map(|captures| captures.get(1))
        .map(|name| name.as_str())
        .collect();

    let mut seen = HashSet::new();
    let candidates = lines
        .iter()
        .skip(anchor + 1)
        .filter_map(|line| definition(line))
        .filter(|candidate| candidate.name != "main")
        .filter(|candidate| seen.insert(candidate.name.clone()))
        .filter(|candidate| !declared.contains(candidate.name.as_str()))
        .collect();

    Some(MissingPrototypes {
        candidates,
        insertion_line: last_include + 1,
    })
}

fn definition(line: &str) -> Option<PrototypeCandidate> {
    let captures = DEFINITION_RE.captures(line)?;
    let return_type = normalise_return_type(captures.get(1)?.as_str());
    let name = captures.get(2)?.as_str();
    let params = captures.get(3)?.as_str().trim();
    let separator = if return_type.ends_with('*') { "" } else { " " };
    Some(PrototypeCandidate {
        name: name.to_owned(),
        signature: format!("{return_type}{separator}{name}({params});"),
    })
}

/// Collapses whitespace and attaches pointer stars to the name side, so
/// `char*` and `char  *` both render as `char *`.
fn normalise_return_type(raw: &str) -> String {
    let stars = raw.chars().filter(|character| *character == '*').count();
    let base = raw
        .replace('*', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if stars == 0 {
        base
    } else {
        format!("{base} {}", "*".repeat(stars))
    }
}
