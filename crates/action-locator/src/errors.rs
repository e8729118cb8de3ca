//! Error types for locator synthesis

use perceiver_dom::SelectorError;
use thiserror::Error;

/// Why a proposed candidate was rejected.
///
/// None of these abort synthesis; the candidate is dropped and the next
/// strategy runs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LocatorError {
    /// The document could not evaluate the selector
    #[error("malformed selector '{selector}': {source}")]
    Malformed {
        selector: String,
        #[source]
        source: SelectorError,
    },

    /// More than one element matches
    #[error("selector '{selector}' matches {matches} elements")]
    NotUnique { selector: String, matches: usize },

    /// Resolves to nothing, or to a different element
    #[error("selector '{0}' no longer resolves to the element")]
    Stale(String),
}

impl LocatorError {
    /// Short tag used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            LocatorError::Malformed { .. } => "malformed",
            LocatorError::NotUnique { .. } => "not_unique",
            LocatorError::Stale(_) => "stale",
        }
    }
}
