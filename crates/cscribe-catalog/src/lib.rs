//! Compiled-in catalog of C standard library functions.
//!
//! The catalog is the single source of truth for three lookups used by the
//! rest of the workspace:
//!
//! - [`header_for`]: which header declares a function, used by header
//!   inference.
//! - [`unsafe_function`]: which library calls have a bounded replacement,
//!   used by the unsafe-call diagnostic.
//! - [`search`]: reference lookup over the documented subset, used by the
//!   side panel.
//!
//! Every function appears exactly once: either as a fully documented
//! [`ReferenceEntry`] or as a header-only [`HeaderCatalogEntry`]. The header
//! map is a projection over both tables.
//!
//! # Example
//!
//! ```
//! use cscribe_catalog::{SearchOutcome, header_for, search};
//!
//! assert_eq!(header_for("strlen"), Some("string.h"));
//! assert_eq!(search("printf").entries().len(), 1);
//! assert_eq!(search("   "), SearchOutcome::Prompt);
//! ```

mod entry;
mod functions;
mod lookup;
mod panel;
mod unsafe_calls;

pub use entry::{HeaderCatalogEntry, Parameter, ReferenceEntry};
pub use functions::{header_for, header_map, references};
pub use lookup::{SearchOutcome, SearchScope, search, search_with};
pub use panel::{PanelRequest, PanelResponse};
pub use unsafe_calls::{UNSAFE_FUNCTIONS, UnsafeFunction, unsafe_function};

#[cfg(test)]
mod tests;
