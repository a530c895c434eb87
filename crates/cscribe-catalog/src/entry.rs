//! Catalog record types.

use serde::Serialize;

/// A function-to-header association.
///
/// Header-only entries cover library calls that header inference must know
/// about but that carry no reference documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeaderCatalogEntry {
    /// The library function name, for example `strlen`.
    pub function_name: &'static str,
    /// The header declaring the function, for example `string.h`.
    pub header: &'static str,
}

impl HeaderCatalogEntry {
    /// Creates a header-only entry.
    #[must_use]
    pub const fn new(function_name: &'static str, header: &'static str) -> Self {
        Self {
            function_name,
            header,
        }
    }
}

/// A documented function parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Parameter {
    /// Parameter name as written in the prototype.
    pub name: &'static str,
    /// Parameter type as written in the prototype.
    #[serde(rename = "type")]
    pub ty: &'static str,
    /// What the argument is used for.
    pub description: &'static str,
}

/// Reference documentation for one library function.
///
/// Serializes in camelCase so the lookup panel can render entries without
/// any reshaping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceEntry {
    /// Function name.
    pub name: &'static str,
    /// Header declaring the function.
    pub header: &'static str,
    /// Full C prototype.
    pub prototype: &'static str,
    /// One-paragraph summary.
    pub description: &'static str,
    /// Parameters in declaration order.
    pub parameters: &'static [Parameter],
    /// What the function returns.
    pub return_value: &'static str,
    /// A short usage snippet.
    pub example: &'static str,
    /// Caveats worth knowing before using the function.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<&'static str>,
    /// Functions commonly used alongside this one.
    pub related_functions: &'static [&'static str],
}

impl ReferenceEntry {
    /// Projects the entry onto its header association.
    #[must_use]
    pub const fn header_entry(&self) -> HeaderCatalogEntry {
        HeaderCatalogEntry::new(self.name, self.header)
    }
}
