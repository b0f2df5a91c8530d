//! Trait definition for pluggable search providers.
//!
//! The production backend is [`crate::providers::BingApiProvider`]; tests
//! substitute canned providers through the same trait.

use crate::error::SearchError;
use crate::types::SearchResult;
use std::future::Future;

/// A pluggable search backend.
///
/// Implementors issue one outbound query and return at most
/// [`crate::config::MAX_RESULTS_CEILING`] results in provider order.
///
/// All implementations must be `Send + Sync` so a single provider can
/// serve concurrent requests.
pub trait SearchProvider: Send + Sync {
    /// Perform a search and return parsed results.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the request fails, the provider answers
    /// with a non-success status, or the body cannot be decoded.
    fn try_search(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<SearchResult>, SearchError>> + Send;

    /// Human-readable provider name for logs.
    fn name(&self) -> &'static str;

    /// Perform a search, degrading any failure to an empty result list.
    ///
    /// "No results" is a valid terminal outcome; the failure is logged
    /// at warn level and never propagated.
    fn search(&self, query: &str) -> impl Future<Output = Vec<SearchResult>> + Send {
        async move {
            match self.try_search(query).await {
                Ok(results) => results,
                Err(err) => {
                    tracing::warn!(
                        provider = self.name(),
                        kind = %err.kind(),
                        error = %err,
                        "search failed"
                    );
                    Vec::new()
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A canned provider for testing the default `search` behaviour.
    struct MockProvider {
        results: Option<Vec<SearchResult>>,
    }

    impl SearchProvider for MockProvider {
        async fn try_search(&self, _query: &str) -> Result<Vec<SearchResult>, SearchError> {
            self.results.clone().ok_or(SearchError::Status(401))
        }

        fn name(&self) -> &'static str {
            "mock"
        }
    }

    #[test]
    fn mock_provider_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MockProvider>();
    }

    #[tokio::test]
    async fn search_passes_results_through() {
        let provider = MockProvider {
            results: Some(vec![
                SearchResult::new("https://a.test", "A"),
                SearchResult::new("https://b.test", "B"),
            ]),
        };
        let results = provider.search("test").await;
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "A");
        assert_eq!(results[1].url, "https://b.test");
    }

    #[tokio::test]
    async fn search_collapses_errors_to_empty() {
        let provider = MockProvider { results: None };
        assert!(provider.try_search("test").await.is_err());
        assert!(provider.search("test").await.is_empty());
    }
}
