//! Page fetching: download one result page and reduce it to plain text.
//!
//! Fetching and extraction run as one unit per URL. Any failure along the
//! way (bad URL, network error, timeout, non-200 status, nothing left after
//! extraction) becomes the empty-string sentinel at the [`PageFetcher::fetch`]
//! boundary, while [`PageFetcher::try_fetch`] keeps the reason.

use crate::config::SearchConfig;
use crate::content;
use crate::error::SearchError;
use crate::http;
use std::future::Future;

/// A source of cleaned page text.
///
/// All implementations must be `Send + Sync`; the aggregator drives many
/// fetches through one shared instance.
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` and return its extracted text.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] describing why the page produced no text.
    fn try_fetch(&self, url: &str) -> impl Future<Output = Result<String, SearchError>> + Send;

    /// Fetch `url`, degrading any failure to an empty string.
    fn fetch(&self, url: &str) -> impl Future<Output = String> + Send {
        async move {
            match self.try_fetch(url).await {
                Ok(text) => text,
                Err(err) => {
                    tracing::warn!(url, kind = %err.kind(), error = %err, "page fetch failed");
                    String::new()
                }
            }
        }
    }
}

/// Fetches pages over HTTP with a fixed per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    client: reqwest::Client,
    max_page_chars: usize,
}

impl HttpPageFetcher {
    /// Build a fetcher using `config.fetch_timeout_seconds` and
    /// `config.max_page_chars`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the configuration is invalid or
    /// the HTTP client cannot be built.
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self {
            client: http::build_fetch_client(config)?,
            max_page_chars: config.max_page_chars,
        })
    }
}

impl PageFetcher for HttpPageFetcher {
    async fn try_fetch(&self, url: &str) -> Result<String, SearchError> {
        let parsed = url::Url::parse(url)
            .map_err(|e| SearchError::Transport(format!("invalid URL {url:?}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SearchError::Transport(format!(
                "unsupported URL scheme: {}",
                parsed.scheme()
            )));
        }

        let response = self
            .client
            .get(parsed)
            .header("Accept", "text/html,application/xhtml+xml")
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| SearchError::from_reqwest("page request failed", &e))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(SearchError::Status(status.as_u16()));
        }

        let html = response
            .text()
            .await
            .map_err(|e| SearchError::from_reqwest("page body read failed", &e))?;

        let text = content::extract(&html);
        if text.is_empty() {
            return Err(SearchError::MalformedResponse(
                "no extractable text".into(),
            ));
        }

        let text = content::truncate_to_limit(&text, self.max_page_chars).to_owned();
        tracing::debug!(url, html_bytes = html.len(), text_bytes = text.len(), "page extracted");
        Ok(text)
    }
}
