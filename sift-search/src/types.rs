//! Core types flowing between the search, fetch, and aggregate stages.

use crate::error::SearchError;
use serde::{Deserialize, Serialize};

/// A single search hit: where it lives and what it is called.
///
/// Results carry no identity beyond their URL and are not deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// The URL of the result page. Empty when the provider omitted it.
    pub url: String,
    /// The page title. Empty when the provider omitted it.
    pub title: String,
}

impl SearchResult {
    /// Create a result from a URL and title.
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
        }
    }
}

/// The outcome of fetching and extracting one result page.
#[derive(Debug)]
pub struct PageOutcome {
    /// The URL that was fetched.
    pub url: String,
    /// Extracted text, or why there is none.
    pub text: Result<String, SearchError>,
}

impl PageOutcome {
    /// The extracted text, or the empty sentinel on failure.
    pub fn text_or_empty(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}
