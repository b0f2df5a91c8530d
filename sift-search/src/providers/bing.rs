//! Bing Web Search API provider.
//!
//! Sends `GET {endpoint}?q=..&count=..` with the `Ocp-Apim-Subscription-Key`
//! header and reads `webPages.value[].{url,name}` from the JSON body.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::provider::SearchProvider;
use crate::types::SearchResult;
use serde::Deserialize;

/// Header carrying the subscription key.
pub const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Bing Web Search v7 client.
pub struct BingApiProvider {
    client: reqwest::Client,
    config: SearchConfig,
}

impl BingApiProvider {
    /// Create a provider from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the configuration is invalid or
    /// the HTTP client cannot be built.
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        let client = http::build_client(&config)?;
        Ok(Self { client, config })
    }
}

impl SearchProvider for BingApiProvider {
    async fn try_search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        tracing::trace!(query, "Bing API search");

        let count = self.config.max_results.to_string();
        let response = self
            .client
            .get(&self.config.endpoint)
            .header(SUBSCRIPTION_KEY_HEADER, &self.config.api_key)
            .query(&[("q", query), ("count", count.as_str())])
            .send()
            .await
            .map_err(|e| SearchError::from_reqwest("Bing request failed", &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SearchError::from_reqwest("Bing response read failed", &e))?;

        tracing::trace!(bytes = body.len(), "Bing response received");

        parse_bing_json(&body, self.config.max_results)
    }

    fn name(&self) -> &'static str {
        "Bing"
    }
}

#[derive(Debug, Default, Deserialize)]
struct BingResponse {
    #[serde(rename = "webPages", default)]
    web_pages: Option<WebPages>,
}

#[derive(Debug, Default, Deserialize)]
struct WebPages {
    #[serde(default)]
    value: Option<Vec<WebPage>>,
}

#[derive(Debug, Default, Deserialize)]
struct WebPage {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

/// Parse a Bing JSON body into search results.
///
/// A body without `webPages` yields no results; entries missing `url` or
/// `name` keep an empty string for that field. Only a body that is not a
/// JSON object of the expected shape is an error.
fn parse_bing_json(body: &str, max_results: usize) -> Result<Vec<SearchResult>, SearchError> {
    let parsed: BingResponse = serde_json::from_str(body)
        .map_err(|e| SearchError::MalformedResponse(format!("Bing JSON: {e}")))?;

    let results: Vec<SearchResult> = parsed
        .web_pages
        .and_then(|pages| pages.value)
        .unwrap_or_default()
        .into_iter()
        .take(max_results)
        .map(|page| SearchResult {
            url: page.url.unwrap_or_default(),
            title: page.name.unwrap_or_default(),
        })
        .collect();

    tracing::debug!(count = results.len(), "Bing results parsed");
    Ok(results)
}
