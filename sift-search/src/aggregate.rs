//! Aggregation: bounded, order-preserving fan-out over result pages.
//!
//! Every search result is fetched and extracted concurrently (up to the
//! configured ceiling), all fetches are awaited, and the non-empty texts
//! are joined with single spaces in original result order.

use crate::fetch::PageFetcher;
use crate::types::{PageOutcome, SearchResult};
use futures::stream::{self, StreamExt};

/// Fans out page fetches for a set of search results and joins the text.
pub struct Aggregator<F> {
    fetcher: F,
    max_concurrency: usize,
}

impl<F: PageFetcher> Aggregator<F> {
    /// Create an aggregator with at most `max_concurrency` fetches in flight.
    ///
    /// A ceiling of 0 is treated as 1.
    pub fn new(fetcher: F, max_concurrency: usize) -> Self {
        Self {
            fetcher,
            max_concurrency: max_concurrency.max(1),
        }
    }

    /// The underlying page fetcher.
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// The concurrency ceiling.
    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Fetch every result page and return one outcome per result.
    ///
    /// Outcomes are positionally aligned with `results` regardless of the
    /// order in which fetches complete. Waits for every fetch; a slow page
    /// holds the batch until its own timeout fires.
    pub async fn collect_pages(&self, results: &[SearchResult]) -> Vec<PageOutcome> {
        let fetches: Vec<_> = results.iter().map(|result| self.fetch_one(result)).collect();

        stream::iter(fetches)
            .buffered(self.max_concurrency)
            .collect()
            .await
    }

    async fn fetch_one(&self, result: &SearchResult) -> PageOutcome {
        let text = self.fetcher.try_fetch(&result.url).await;
        PageOutcome {
            url: result.url.clone(),
            text,
        }
    }

    /// Fetch every result page and join the usable text into one corpus.
    ///
    /// Failed or empty pages are skipped. If no page yields text, the corpus
    /// is the empty string, which is a valid result.
    pub async fn aggregate(&self, results: &[SearchResult]) -> String {
        let outcomes = self.collect_pages(results).await;

        for outcome in &outcomes {
            if let Err(ref err) = outcome.text {
                tracing::warn!(url = %outcome.url, kind = %err.kind(), error = %err, "page skipped");
            }
        }

        let corpus = join_corpus(outcomes.iter().map(PageOutcome::text_or_empty));
        tracing::debug!(
            pages = outcomes.len(),
            used = outcomes.iter().filter(|o| !o.text_or_empty().is_empty()).count(),
            bytes = corpus.len(),
            "corpus assembled"
        );
        corpus
    }
}

/// Join non-empty page texts with single spaces, preserving order.
pub fn join_corpus<'a>(pages: impl IntoIterator<Item = &'a str>) -> String {
    pages
        .into_iter()
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
