//! Line-oriented heuristics over C source text.
//!
//! Nothing in this crate parses C. Every check is a pattern match over one
//! line, or over a handful of neighbouring lines, of a [`SourceBuffer`]:
//!
//! - **Terminators** via [`should_terminate`] and [`terminator_edit`]
//! - **Header inference** via [`compute_missing_headers`]
//! - **Prototype synthesis** via [`compute_missing_prototypes`]
//! - **Diagnostics** via [`scan`]
//!
//! The functions are pure. Each takes a borrowed buffer built from the
//! current document text and returns plain values; the caller decides when
//! to apply the resulting [`EditOperation`]s.
//!
//! # Example
//!
//! ```
//! use cscribe_syntax::{SourceBuffer, compute_missing_headers};
//!
//! let text = "#include <stdio.h>\nint main(){ printf(\"x\"); strlen(\"y\"); return 0; }";
//! let buffer = SourceBuffer::new(text);
//! let missing = compute_missing_headers(&buffer);
//!
//! assert_eq!(missing.headers.iter().copied().collect::<Vec<_>>(), vec!["string.h"]);
//! assert_eq!(missing.insertion_line, 1);
//! ```

mod buffer;
mod diagnostics;
mod edit;
mod headers;
mod patterns;
mod position;
mod prototypes;
mod semicolon;

pub use buffer::SourceBuffer;
pub use diagnostics::{Diagnostic, DiagnosticKind, Severity, scan};
pub use edit::{EditOperation, EditOrigin, UndoBehaviour};
pub use headers::{MissingHeaders, compute_missing_headers};
pub use position::{Position, Range, byte_offset, utf16_len};
pub use prototypes::{MissingPrototypes, PrototypeCandidate, compute_missing_prototypes};
pub use semicolon::{TerminatorDecision, classify, should_terminate, terminator_edit};

#[cfg(test)]
mod tests;
