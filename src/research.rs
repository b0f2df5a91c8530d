//! Research orchestrator: search → aggregate → summarise.
//!
//! The pipeline is linear. No stage failure is escalated; each one is
//! logged, recorded in the [`ResearchReport`], and replaced by an empty
//! value that flows into the next stage. No retries.

use std::fmt;

use async_trait::async_trait;
use sift_search::aggregate::join_corpus;
use sift_search::{Aggregator, BingApiProvider, HttpPageFetcher, PageFetcher, SearchProvider};

use crate::config::ResearchConfig;
use crate::error::Result;
use crate::summarizer::{GeminiSummarizer, Summarizer};

/// Pipeline stage, for failure attribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Querying the search provider.
    Search,
    /// Fetching and extracting one result page.
    Fetch,
    /// Generating the summary.
    Summarize,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Search => "search",
            Self::Fetch => "fetch",
            Self::Summarize => "summarize",
        })
    }
}

/// One failure that degraded a stage to an empty value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageFailure {
    /// Where it happened.
    pub stage: Stage,
    /// The page URL, for fetch failures.
    pub url: Option<String>,
    /// Display form of the underlying error.
    pub reason: String,
}

/// Everything one research run produced.
#[derive(Debug, Clone, Default)]
pub struct ResearchReport {
    /// The trimmed query.
    pub query: String,
    /// The summary; empty if any stage left nothing to summarise or the
    /// summariser failed.
    pub summary: String,
    /// Number of search results returned.
    pub result_count: usize,
    /// Number of pages that contributed text to the corpus.
    pub page_count: usize,
    /// Size of the corpus sent for summarisation, in bytes.
    pub corpus_bytes: usize,
    /// Failures that were absorbed along the way.
    pub failures: Vec<StageFailure>,
}

impl ResearchReport {
    /// Whether the given stage recorded any failure.
    pub fn failed_at(&self, stage: Stage) -> bool {
        self.failures.iter().any(|f| f.stage == stage)
    }
}

/// Object-safe research entry point used by the form endpoint.
#[async_trait]
pub trait ResearchService: Send + Sync {
    /// Run the full pipeline for one query.
    async fn run(&self, query: &str) -> ResearchReport;

    /// Run the full pipeline and return only the summary.
    async fn research(&self, query: &str) -> String {
        self.run(query).await.summary
    }
}

/// Sequences a search provider, a page aggregator and a summariser.
pub struct Researcher<P, F, S> {
    provider: P,
    aggregator: Aggregator<F>,
    summarizer: S,
}

/// The production pipeline: Bing search, HTTP page fetches, Gemini summaries.
pub type LiveResearcher = Researcher<BingApiProvider, HttpPageFetcher, GeminiSummarizer>;

impl<P, F, S> Researcher<P, F, S>
where
    P: SearchProvider,
    F: PageFetcher,
    S: Summarizer,
{
    /// Assemble a pipeline with at most `max_concurrency` page fetches in flight.
    pub fn new(provider: P, fetcher: F, summarizer: S, max_concurrency: usize) -> Self {
        Self {
            provider,
            aggregator: Aggregator::new(fetcher, max_concurrency),
            summarizer,
        }
    }

    /// Run SEARCH → AGGREGATE → SUMMARIZE for one query.
    ///
    /// A blank query skips every stage and yields an empty summary.
    pub async fn run(&self, query: &str) -> ResearchReport {
        let query = query.trim();
        let mut report = ResearchReport {
            query: query.to_owned(),
            ..ResearchReport::default()
        };
        if query.is_empty() {
            tracing::debug!("blank query, nothing to research");
            return report;
        }

        tracing::trace!(query, "research started");

        let results = match self.provider.try_search(query).await {
            Ok(results) => results,
            Err(err) => {
                tracing::warn!(provider = self.provider.name(), kind = %err.kind(), error = %err, "search failed");
                report.failures.push(StageFailure {
                    stage: Stage::Search,
                    url: None,
                    reason: err.to_string(),
                });
                Vec::new()
            }
        };
        report.result_count = results.len();

        let outcomes = self.aggregator.collect_pages(&results).await;
        for outcome in &outcomes {
            if let Err(ref err) = outcome.text {
                tracing::warn!(url = %outcome.url, kind = %err.kind(), error = %err, "page skipped");
                report.failures.push(StageFailure {
                    stage: Stage::Fetch,
                    url: Some(outcome.url.clone()),
                    reason: err.to_string(),
                });
            }
        }
        let corpus = join_corpus(outcomes.iter().map(|o| o.text_or_empty()));
        report.page_count = outcomes
            .iter()
            .filter(|o| !o.text_or_empty().is_empty())
            .count();
        report.corpus_bytes = corpus.len();

        report.summary = match self.summarizer.try_summarize(&corpus).await {
            Ok(summary) => summary,
            Err(err) => {
                tracing::warn!(backend = self.summarizer.name(), error = %err, "summarisation failed");
                report.failures.push(StageFailure {
                    stage: Stage::Summarize,
                    url: None,
                    reason: err.to_string(),
                });
                String::new()
            }
        };

        tracing::info!(
            results = report.result_count,
            pages = report.page_count,
            corpus_bytes = report.corpus_bytes,
            summary_bytes = report.summary.len(),
            failures = report.failures.len(),
            "research finished"
        );
        report
    }

    /// Run the pipeline and return only the summary (possibly empty).
    pub async fn research(&self, query: &str) -> String {
        self.run(query).await.summary
    }
}

#[async_trait]
impl<P, F, S> ResearchService for Researcher<P, F, S>
where
    P: SearchProvider,
    F: PageFetcher,
    S: Summarizer,
{
    async fn run(&self, query: &str) -> ResearchReport {
        Researcher::run(self, query).await
    }
}

impl LiveResearcher {
    /// Build the production pipeline from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ResearchError::MissingConfiguration`] or
    /// [`crate::ResearchError::Config`] if the configuration is incomplete,
    /// or an error if an HTTP client cannot be built.
    pub fn from_config(config: &ResearchConfig) -> Result<Self> {
        config.validate()?;
        let search = config.search_config();
        let provider = BingApiProvider::new(search.clone())?;
        let fetcher = HttpPageFetcher::new(&search)?;
        let summarizer = GeminiSummarizer::new(&config.summary, config.summary_api_key.clone())?;
        Ok(Self::new(provider, fetcher, summarizer, search.max_concurrency))
    }
}
