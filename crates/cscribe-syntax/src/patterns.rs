//! Regex patterns and line helpers shared across the heuristics.

use once_cell::sync::Lazy;
use regex::Regex;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("regex: {e}"))
}

/// `#include <X>` or `#include "X"`, capturing `X`.
pub(crate) static INCLUDE_RE: Lazy<Regex> =
    Lazy::new(|| compile(r#"^\s*#\s*include\s*[<"]([^>"]+)[>"]"#));

/// An identifier immediately followed by `(`, capturing the identifier.
pub(crate) static CALL_RE: Lazy<Regex> = Lazy::new(|| compile(r"\b([A-Za-z_]\w*)\("));

/// Return-type prefix shared by definition and header patterns: optional
/// qualifiers, a base type and optional pointer stars.
const RETURN_TYPE: &str = r"(?:(?:static|extern|inline|const|unsigned|signed|long|short)\s+)*(?:void|int|char|float|double|long|short|unsigned|bool|_Bool|size_t|FILE|struct\s+\w+|enum\s+\w+)(?:\s*\*+\s*|\s+)";

/// A function definition with its opening brace on the same line.
///
/// Captures the return type, the name and the raw parameter list.
pub(crate) static DEFINITION_RE: Lazy<Regex> = Lazy::new(|| {
    compile(&format!(
        r"^\s*({RETURN_TYPE})([A-Za-z_]\w*)\s*\(([^)]*)\)\s*\{{"
    ))
});

/// A function definition header with nothing after the parameter list.
pub(crate) static FUNCTION_HEADER_RE: Lazy<Regex> =
    Lazy::new(|| compile(&format!(r"^{RETURN_TYPE}[A-Za-z_]\w*\s*\([^;]*\)$")));

/// The `main` anchor: `int main(` or `void main(`.
pub(crate) static MAIN_RE: Lazy<Regex> = Lazy::new(|| compile(r"^\s*(?:int|void)\s+main\s*\("));

/// A declaration `name(...);`, capturing `name`.
pub(crate) static DECLARATION_RE: Lazy<Regex> =
    Lazy::new(|| compile(r"\b([A-Za-z_]\w*)\s*\([^)]*\)\s*;"));

/// A control keyword up to and including the `(` opening its condition.
pub(crate) static CONTROL_KEYWORD_RE: Lazy<Regex> =
    Lazy::new(|| compile(r"^(?:(?:\}\s*)?else\s+if|if|while|for|switch)\s*\("));

/// A bare `else` or `do` on its own line.
pub(crate) static BARE_CONTROL_RE: Lazy<Regex> = Lazy::new(|| compile(r"^(?:(?:\}\s*)?else|do)$"));

/// A `struct`, `union`, `enum` or `typedef` opener.
pub(crate) static TYPE_DECLARATION_RE: Lazy<Regex> =
    Lazy::new(|| compile(r"^(?:struct|union|enum|typedef)\b"));

/// A `case X:` or `default:` label.
pub(crate) static CASE_LABEL_RE: Lazy<Regex> =
    Lazy::new(|| compile(r"^(?:case\b[^:]*|default\s*):"));

/// An `if` keyword up to and including the `(` opening its condition.
pub(crate) static IF_CONDITION_RE: Lazy<Regex> = Lazy::new(|| compile(r"\bif\s*\("));

/// An allocation call, capturing the allocator name.
pub(crate) static ALLOCATION_RE: Lazy<Regex> =
    Lazy::new(|| compile(r"\b(malloc|calloc|realloc)\s*\("));

/// An `fopen(` call.
pub(crate) static FOPEN_RE: Lazy<Regex> = Lazy::new(|| compile(r"\bfopen\s*\("));

/// Evidence that an `fopen` result is checked.
pub(crate) static FOPEN_CHECK_RE: Lazy<Regex> =
    Lazy::new(|| compile(r"NULL\s*[!=]=|[!=]=\s*NULL|\bif\s*\(|\bperror\s*\("));

/// Returns `line` up to, but excluding, its first `//`.
pub(crate) fn strip_line_comment(line: &str) -> &str {
    line.find("//")
        .and_then(|index| line.get(..index))
        .unwrap_or(line)
}

/// Returns the code of each line with `/* ... */` comments and `//` tails
/// removed.
///
/// Block comments may span lines; a comment's text is replaced by a single
/// space so tokens on either side stay apart.
pub(crate) fn code_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut in_block = false;
    lines
        .into_iter()
        .map(|line| {
            let mut code = String::with_capacity(line.len());
            let mut rest = line;
            loop {
                if in_block {
                    let Some(end) = rest.find("*/") else { break };
                    in_block = false;
                    code.push(' ');
                    rest = rest.get(end + 2..).unwrap_or_default();
                    continue;
                }
                let line_comment = rest.find("//");
                match rest.find("/*") {
                    Some(start) if line_comment.is_none_or(|marker| start < marker) => {
                        code.push_str(rest.get(..start).unwrap_or_default());
                        in_block = true;
                        rest = rest.get(start + 2..).unwrap_or_default();
                    }
                    _ => {
                        let end = line_comment.unwrap_or(rest.len());
                        code.push_str(rest.get(..end).unwrap_or(rest));
                        break;
                    }
                }
            }
            code
        })
        .collect()
}

/// Byte index of the `)` closing an already-opened `(`.
pub(crate) fn closing_paren(text: &str) -> Option<usize> {
    let mut depth = 1_usize;
    for (index, character) in text.char_indices() {
        match character {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(index);
                }
            }
            _ => {}
        }
    }
    None
}

/// Whether the trimmed line opens or continues a comment.
pub(crate) fn is_comment_line(trimmed: &str) -> bool {
    trimmed.starts_with("//") || trimmed.starts_with("/*") || trimmed.starts_with('*')
}

/// Whether the line is an `#include` directive.
pub(crate) fn is_include_line(line: &str) -> bool {
    line.trim_start().starts_with("#include")
}
