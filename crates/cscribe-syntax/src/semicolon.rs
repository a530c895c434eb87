//! Missing statement terminator detection.
//!
//! The decision is an ordered list of rules over the trimmed line. The first
//! rule that matches wins; anything no rule excludes is treated as a
//! statement. Multi-line expressions and unterminated literals are not
//! special-cased, so the final catch-all may fire on them.

use crate::buffer::SourceBuffer;
use crate::edit::{EditOperation, EditOrigin, UndoBehaviour};
use crate::patterns::{
    BARE_CONTROL_RE, CASE_LABEL_RE, CONTROL_KEYWORD_RE, FUNCTION_HEADER_RE, TYPE_DECLARATION_RE,
    closing_paren, is_comment_line,
};

/// The rule that decided whether a line needs a terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum TerminatorDecision {
    /// Empty or whitespace only.
    Blank,
    /// Already ends with `;`.
    AlreadyTerminated,
    /// Ends with `{`, `:` or `[`.
    BlockOpener,
    /// Ends with `}`.
    BlockCloser,
    /// A preprocessor directive.
    Preprocessor,
    /// A comment line.
    Comment,
    /// `if`, `else`, `while`, `for`, `do` or `switch` with the body below.
    ControlHeader,
    /// A function definition header with the body below.
    FunctionHeader,
    /// A `struct`, `union`, `enum` or `typedef` opener.
    TypeDeclaration,
    /// A `case` or `default` label.
    CaseLabel,
    /// None of the above: a statement missing its terminator.
    Statement,
}

impl TerminatorDecision {
    /// Whether a `;` should be appended.
    #[must_use]
    pub const fn needs_terminator(self) -> bool {
        matches!(self, Self::Statement)
    }
}

/// Classifies `line` by the first terminator rule it matches.
#[must_use]
pub fn classify(line: &str) -> TerminatorDecision {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return TerminatorDecision::Blank;
    }
    if trimmed.ends_with(';') {
        return TerminatorDecision::AlreadyTerminated;
    }
    if trimmed.ends_with(['{', ':', '[']) {
        return TerminatorDecision::BlockOpener;
    }
    if trimmed.ends_with('}') {
        return TerminatorDecision::BlockCloser;
    }
    if trimmed.starts_with('#') {
        return TerminatorDecision::Preprocessor;
    }
    if is_comment_line(trimmed) || trimmed.ends_with("*/") {
        return TerminatorDecision::Comment;
    }
    if is_control_header(trimmed) {
        return TerminatorDecision::ControlHeader;
    }
    if FUNCTION_HEADER_RE.is_match(trimmed) {
        return TerminatorDecision::FunctionHeader;
    }
    if TYPE_DECLARATION_RE.is_match(trimmed) {
        return TerminatorDecision::TypeDeclaration;
    }
    if CASE_LABEL_RE.is_match(trimmed) {
        return TerminatorDecision::CaseLabel;
    }
    TerminatorDecision::Statement
}

/// Whether `line` is a statement missing its `;`.
///
/// # Examples
///
/// ```
/// use cscribe_syntax::should_terminate;
///
/// assert!(should_terminate("int x = 5"));
/// assert!(!should_terminate("if (x > 0)"));
/// assert!(!should_terminate("int add(int a, int b)"));
/// ```
#[must_use]
pub fn should_terminate(line: &str) -> bool {
    classify(line).needs_terminator()
}

/// Builds the edit appending `;` to line `line_index`, if it needs one.
///
/// The edit merges into the user's preceding undo step.
#[must_use]
pub fn terminator_edit(buffer: &SourceBuffer<'_>, line_index: usize) -> Option<EditOperation> {
    let line = buffer.line(line_index)?;
    if !should_terminate(line) {
        return None;
    }
    Some(EditOperation {
        insert_at: buffer.line_end(line_index)?,
        text: String::from(";"),
        undo: UndoBehaviour::MergeWithPrevious,
        origin: EditOrigin::Terminator,
    })
}

fn is_control_header(trimmed: &str) -> bool {
    if BARE_CONTROL_RE.is_match(trimmed) {
        return true;
    }
    CONTROL_KEYWORD_RE
        .find(trimmed)
        .and_then(|keyword| trimmed.get(keyword.end()..))
        .is_some_and(|condition| {
            closing_paren(condition).is_some_and(|close| {
                condition
                    .get(close + 1..)
                    .is_some_and(|rest| rest.trim().is_empty())
            })
        })
}
