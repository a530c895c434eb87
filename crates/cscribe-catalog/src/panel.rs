//! Message shapes exchanged with the reference lookup panel.

use serde::{Deserialize, Serialize};

use crate::entry::ReferenceEntry;
use crate::lookup::{SearchOutcome, SearchScope, search_with};

/// A message sent by the panel.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum PanelRequest {
    /// Search the catalog.
    Search {
        /// Free-text query.
        query: String,
    },
}

/// A message sent to the panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum PanelResponse {
    /// The query was blank.
    SearchPrompt,
    /// Entries matching the query.
    SearchResults {
        /// Matching entries in catalog order.
        results: Vec<&'static ReferenceEntry>,
    },
}

impl PanelRequest {
    /// Answers the request using the description-aware search.
    #[must_use]
    pub fn respond(&self) -> PanelResponse {
        match self {
            Self::Search { query } => {
                PanelResponse::from(search_with(query, SearchScope::IncludeDescriptions))
            }
        }
    }
}

impl From<SearchOutcome> for PanelResponse {
    fn from(outcome: SearchOutcome) -> Self {
        match outcome {
            SearchOutcome::Prompt => Self::SearchPrompt,
            SearchOutcome::Results(results) => Self::SearchResults { results },
        }
    }
}
