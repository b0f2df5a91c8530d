//! # sift-search
//!
//! Search, fetch, and text extraction core for the sift research assistant.
//!
//! Given a query, a [`SearchProvider`] returns up to ten `(url, title)`
//! pairs; an [`Aggregator`] fetches every result page concurrently through a
//! [`PageFetcher`], strips boilerplate markup with [`content::extract`], and
//! joins the surviving text into one corpus in result order.
//!
//! ## Failure model
//!
//! - Every stage has a `try_*` operation returning [`Result`] and a plain
//!   operation that logs the failure and returns an empty value instead
//! - An empty corpus is a valid outcome, not an error
//! - No retries, caching, or rate limiting
//!
//! ## Security
//!
//! - The search API key is never serialised or printed in `Debug` output
//! - Search queries are logged only at trace level
//! - Only `http` and `https` result URLs are fetched

pub mod aggregate;
pub mod config;
pub mod content;
pub mod error;
pub mod fetch;
pub mod http;
pub mod provider;
pub mod providers;
pub mod types;

pub use aggregate::Aggregator;
pub use config::SearchConfig;
pub use error::{FailureKind, Result, SearchError};
pub use fetch::{HttpPageFetcher, PageFetcher};
pub use provider::SearchProvider;
pub use providers::BingApiProvider;
pub use types::{PageOutcome, SearchResult};

/// Search the web with the Bing Web Search API.
///
/// Failures (invalid configuration included) are logged and collapse to an
/// empty list.
///
/// # Examples
///
/// ```no_run
/// # async fn example() {
/// let config = sift_search::SearchConfig::default().with_api_key("...");
/// for result in sift_search::search("rust programming", &config).await {
///     println!("{}: {}", result.title, result.url);
/// }
/// # }
/// ```
pub async fn search(query: &str, config: &SearchConfig) -> Vec<SearchResult> {
    match BingApiProvider::new(config.clone()) {
        Ok(provider) => provider.search(query).await,
        Err(err) => {
            tracing::warn!(error = %err, "search provider unavailable");
            Vec::new()
        }
    }
}

/// Fetch one page and return its extracted text, or `""` on any failure.
///
/// # Examples
///
/// ```no_run
/// # async fn example() {
/// let text = sift_search::fetch_page_text("https://example.com", &Default::default()).await;
/// println!("{} bytes of text", text.len());
/// # }
/// ```
pub async fn fetch_page_text(url: &str, config: &SearchConfig) -> String {
    match HttpPageFetcher::new(config) {
        Ok(fetcher) => fetcher.fetch(url).await,
        Err(err) => {
            tracing::warn!(error = %err, "page fetcher unavailable");
            String::new()
        }
    }
}

/// Fetch every result page concurrently and join the text into one corpus.
///
/// Uses an [`HttpPageFetcher`] with `config.max_concurrency` as the
/// fan-out ceiling. Returns `""` when nothing usable was fetched.
pub async fn aggregate(results: &[SearchResult], config: &SearchConfig) -> String {
    match HttpPageFetcher::new(config) {
        Ok(fetcher) => {
            Aggregator::new(fetcher, config.max_concurrency)
                .aggregate(results)
                .await
        }
        Err(err) => {
            tracing::warn!(error = %err, "page fetcher unavailable");
            String::new()
        }
    }
}
