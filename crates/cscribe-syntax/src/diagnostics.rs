//! Per-line bug pattern scanner.

use cscribe_catalog::{UNSAFE_FUNCTIONS, UnsafeFunction, unsafe_function};
use serde::Serialize;

use crate::buffer::SourceBuffer;
use crate::patterns::{
    ALLOCATION_RE, CALL_RE, FOPEN_CHECK_RE, FOPEN_RE, IF_CONDITION_RE, closing_paren,
    strip_line_comment,
};
use crate::position::Range;

/// Lines after an `fopen` call searched for a result check.
const FOPEN_CHECK_WINDOW: usize = 4;

const ASSIGNMENT_MESSAGE: &str = "Possible assignment instead of comparison in conditional statement.";
const ALLOCATION_MESSAGE: &str = "Remember to free allocated memory to prevent memory leaks.";
const FOPEN_MESSAGE: &str =
    "Consider checking if fopen() returned NULL before using the file pointer.";

/// How prominently a finding is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Likely bug.
    Warning,
    /// Reminder.
    Information,
}

/// Which check produced a finding.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display, strum::IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum DiagnosticKind {
    /// Call to a library function with a bounded replacement.
    UnsafeFunction,
    /// Bare `=` inside an `if` condition.
    AssignmentInCondition,
    /// Heap allocation call.
    AllocationReminder,
    /// `fopen` whose result is not visibly checked.
    UncheckedFopen,
}

impl DiagnosticKind {
    /// Stable identifier reported alongside the message.
    #[must_use]
    pub fn code(self) -> &'static str {
        self.into()
    }

    /// Severity every finding of this kind carries.
    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::UnsafeFunction | Self::AssignmentInCondition => Severity::Warning,
            Self::AllocationReminder | Self::UncheckedFopen => Severity::Information,
        }
    }
}

/// One finding on one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Span the finding underlines.
    pub range: Range,
    /// User-facing explanation.
    pub message: String,
    /// Warning or information.
    pub severity: Severity,
    /// The check that fired.
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    fn new(kind: DiagnosticKind, range: Range, message: String) -> Self {
        Self {
            range,
            message,
            severity: kind.severity(),
            kind,
        }
    }
}

/// Runs every check on every line of `buffer`.
///
/// Findings are ordered by line, then by check: unsafe calls, assignment in
/// a condition, allocation, unchecked `fopen`. The result depends only on
/// the buffer text.
#[must_use]
pub fn scan(buffer: &SourceBuffer<'_>) -> Vec<Diagnostic> {
    let lines = buffer.lines();
    let mut diagnostics = Vec::new();
    for (index, line) in lines.iter().enumerate() {
        let code = strip_line_comment(line);
        diagnostics.extend(unsafe_calls(index, line, code));
        diagnostics.extend(assignment_in_condition(index, line, code));
        diagnostics.extend(allocation(index, line, code));
        if FOPEN_RE.is_match(code) {
            let following = lines
                .iter()
                .skip(index + 1)
                .take(FOPEN_CHECK_WINDOW)
                .copied()
                .collect::<Vec<_>>()
                .join("\n");
            diagnostics.extend(unchecked_fopen(index, line, code, &following));
        }
    }
    diagnostics
}

/// One warning per flagged function on the line, at its first call, in
/// table order.
fn unsafe_calls(index: usize, line: &str, code: &str) -> Vec<Diagnostic> {
    let mut calls: Vec<(&'static UnsafeFunction, usize)> = Vec::new();
    for name in CALL_RE.captures_iter(code).filter_map(|captures| captures.get(1)) {
        let Some(entry) = unsafe_function(name.as_str()) else {
            continue;
        };
        if calls.iter().all(|(seen, _)| seen.unsafe_name != entry.unsafe_name) {
            calls.push((entry, name.start()));
        }
    }
    calls.sort_by_key(|(entry, _)| {
        UNSAFE_FUNCTIONS
            .iter()
            .position(|row| row == *entry)
            .unwrap_or(usize::MAX)
    });
    calls
        .into_iter()
        .map(|(entry, start)| {
            let end = start + entry.unsafe_name.len();
            Diagnostic::new(
                DiagnosticKind::UnsafeFunction,
                Range::on_line(index, line, start, end),
                format!(
                    "Unsafe function '{}'. Consider using '{}' instead.",
                    entry.unsafe_name, entry.safe_name
                ),
            )
        })
        .collect()
}

fn assignment_in_condition(index: usize, line: &str, code: &str) -> Option<Diagnostic> {
    let keyword = IF_CONDITION_RE.find(code)?;
    let after_paren = code.get(keyword.end()..)?;
    // A condition continuing onto the next line runs to the end of this one.
    let condition = closing_paren(after_paren)
        .and_then(|close| after_paren.get(..close))
        .unwrap_or(after_paren);
    if !has_bare_assignment(condition) {
        return None;
    }
    let start = keyword.start();
    Some(Diagnostic::new(
        DiagnosticKind::AssignmentInCondition,
        Range::on_line(index, line, start, line.len()),
        String::from(ASSIGNMENT_MESSAGE),
    ))
}

fn allocation(index: usize, line: &str, code: &str) -> Option<Diagnostic> {
    let keyword = ALLOCATION_RE.captures(code)?.get(1)?;
    Some(Diagnostic::new(
        DiagnosticKind::AllocationReminder,
        Range::on_line(index, line, keyword.start(), line.len()),
        String::from(ALLOCATION_MESSAGE),
    ))
}

fn unchecked_fopen(index: usize, line: &str, code: &str, following: &str) -> Option<Diagnostic> {
    if FOPEN_CHECK_RE.is_match(following) {
        return None;
    }
    let start = FOPEN_RE.find(code)?.start();
    Some(Diagnostic::new(
        DiagnosticKind::UncheckedFopen,
        Range::on_line(index, line, start, line.len()),
        String::from(FOPEN_MESSAGE),
    ))
}

/// Whether `condition` holds an `=` that is not part of `==`, `!=`, `<=` or
/// `>=`.
fn has_bare_assignment(condition: &str) -> bool {
    let mut previous = None;
    let mut characters = condition.chars().peekable();
    while let Some(character) = characters.next() {
        if character == '=' {
            let part_of_comparison = matches!(previous, Some('=' | '!' | '<' | '>'))
                || characters.peek() == Some(&'=');
            if !part_of_comparison {
                return true;
            }
            // The second `=` of `==` must not be read as a bare assignment.
            characters.next_if_eq(&'=');
            previous = Some('=');
            continue;
        }
        previous = Some(character);
    }
    false
}
