//! Search and fetch configuration with sensible defaults.
//!
//! [`SearchConfig`] controls the search API endpoint, result count,
//! timeouts, the aggregation concurrency ceiling, and request headers.

use crate::error::SearchError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default Bing Web Search v7 endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.bing.microsoft.com/v7.0/search";

/// Hard ceiling on results requested from the search provider.
pub const MAX_RESULTS_CEILING: usize = 10;

/// Configuration for searching and fetching result pages.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour. The API key is never serialised;
/// it is injected from the environment by the application layer.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Search API endpoint.
    pub endpoint: String,
    /// Subscription key sent with every search request.
    #[serde(skip)]
    pub api_key: String,
    /// Number of results requested (and kept). At most [`MAX_RESULTS_CEILING`].
    pub max_results: usize,
    /// Search request timeout in seconds.
    pub timeout_seconds: u64,
    /// Per-page fetch timeout in seconds.
    pub fetch_timeout_seconds: u64,
    /// Maximum number of page fetches in flight at once.
    pub max_concurrency: usize,
    /// Maximum characters of extracted text kept per page.
    pub max_page_chars: usize,
    /// Custom User-Agent string. If `None`, rotates through a built-in list
    /// of realistic browser User-Agents.
    pub user_agent: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            api_key: String::new(),
            max_results: MAX_RESULTS_CEILING,
            timeout_seconds: 10,
            fetch_timeout_seconds: 10,
            max_concurrency: 10,
            max_page_chars: 100_000,
            user_agent: None,
        }
    }
}

impl fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &if self.api_key.is_empty() { "" } else { "<redacted>" })
            .field("max_results", &self.max_results)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("fetch_timeout_seconds", &self.fetch_timeout_seconds)
            .field("max_concurrency", &self.max_concurrency)
            .field("max_page_chars", &self.max_page_chars)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl SearchConfig {
    /// Set the subscription key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = key.into();
        self
    }

    /// Set a custom endpoint (used to point at a mock server in tests).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `max_results` must be in `1..=MAX_RESULTS_CEILING`
    /// - both timeouts must be greater than 0
    /// - `max_concurrency` and `max_page_chars` must be greater than 0
    /// - `endpoint` must be an absolute http(s) URL
    ///
    /// An empty `api_key` is not rejected here; the application layer
    /// reports it as missing configuration.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_results == 0 || self.max_results > MAX_RESULTS_CEILING {
            return Err(SearchError::Config(format!(
                "max_results must be between 1 and {MAX_RESULTS_CEILING}"
            )));
        }
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.fetch_timeout_seconds == 0 {
            return Err(SearchError::Config(
                "fetch_timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.max_concurrency == 0 {
            return Err(SearchError::Config(
                "max_concurrency must be greater than 0".into(),
            ));
        }
        if self.max_page_chars == 0 {
            return Err(SearchError::Config(
                "max_page_chars must be greater than 0".into(),
            ));
        }
        match url::Url::parse(&self.endpoint) {
            Ok(u) if matches!(u.scheme(), "http" | "https") => {}
            _ => {
                return Err(SearchError::Config(format!(
                    "endpoint is not an http(s) URL: {}",
                    self.endpoint
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sensible_values() {
        let config = SearchConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.max_results, 10);
        assert_eq!(config.timeout_seconds, 10);
        assert_eq!(config.fetch_timeout_seconds, 10);
        assert_eq!(config.max_concurrency, 10);
        assert_eq!(config.max_page_chars, 100_000);
        assert!(config.api_key.is_empty());
        assert!(config.user_agent.is_none());
    }

    #[test]
    fn valid_config_passes_validation() {
        assert!(SearchConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_max_results_rejected() {
        let config = SearchConfig {
            max_results: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_results"));
    }

    #[test]
    fn max_results_above_ceiling_rejected() {
        let config = SearchConfig {
            max_results: 11,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_timeouts_rejected() {
        let config = SearchConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        assert!(config
            .validate()
            .unwrap_err()
            .to_string()
            .contains("timeout_seconds"));

        let config = SearchConfig {
            fetch_timeout_seconds: 0,
            ..Default::default()
        };
        assert!(config
            .validate()
            .unwrap_err()
            .to_string()
            .contains("fetch_timeout_seconds"));
    }

    #[test]
    fn zero_concurrency_rejected() {
        let config = SearchConfig {
            max_concurrency: 0,
            ..Default::default()
        };
        assert!(config
            .validate()
            .unwrap_err()
            .to_string()
            .contains("max_concurrency"));
    }

    #[test]
    fn non_http_endpoint_rejected() {
        let config = SearchConfig::default().with_endpoint("ftp://example.com/search");
        assert!(config.validate().unwrap_err().to_string().contains("endpoint"));

        let config = SearchConfig::default().with_endpoint("not a url");
        assert!(config.validate().is_err());
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = SearchConfig::default().with_api_key("secret-key-123");
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret-key-123"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn api_key_is_not_serialised() {
        let config = SearchConfig::default().with_api_key("secret-key-123");
        let json = serde_json::to_string(&config).expect("serialize");
        assert!(!json.contains("secret-key-123"));
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config: SearchConfig =
            serde_json::from_str(r#"{"max_concurrency": 4}"#).expect("deserialize");
        assert_eq!(config.max_concurrency, 4);
        assert_eq!(config.max_results, 10);
    }
}
