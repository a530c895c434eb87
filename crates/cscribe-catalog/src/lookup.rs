//! Case-insensitive reference search.

use crate::entry::ReferenceEntry;
use crate::functions::references;

/// Which fields a search query is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchScope {
    /// Function name and header only.
    #[default]
    NameAndHeader,
    /// Function name, header and description text.
    IncludeDescriptions,
}

/// Result of a reference search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The query was blank; the caller should prompt for input.
    Prompt,
    /// Matching entries in catalog order. May be empty.
    Results(Vec<&'static ReferenceEntry>),
}

impl SearchOutcome {
    /// Returns the matched entries, or an empty slice for a prompt.
    #[must_use]
    pub fn entries(&self) -> &[&'static ReferenceEntry] {
        match self {
            Self::Prompt => &[],
            Self::Results(entries) => entries,
        }
    }
}

/// Searches names and headers for `query`.
#[must_use]
pub fn search(query: &str) -> SearchOutcome {
    search_with(query, SearchScope::NameAndHeader)
}

/// Searches the documented catalog for `query` within `scope`.
///
/// Matching is a case-insensitive substring test. A query naming a header
/// without its suffix (`stdio`) matches the suffixed header (`stdio.h`).
#[must_use]
pub fn search_with(query: &str, scope: SearchScope) -> SearchOutcome {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return SearchOutcome::Prompt;
    }
    let suffixed = if needle.ends_with(".h") {
        needle.clone()
    } else {
        format!("{needle}.h")
    };

    let results = references()
        .iter()
        .filter(|entry| {
            let header = entry.header.to_lowercase();
            entry.name.to_lowercase().contains(&needle)
                || header.contains(&needle)
                || header == suffixed
                || (scope == SearchScope::IncludeDescriptions
                    && entry.description.to_lowercase().contains(&needle))
        })
        .collect();
    SearchOutcome::Results(results)
}
