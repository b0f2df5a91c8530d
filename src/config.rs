//! Configuration for the research pipeline and form endpoint.
//!
//! Settings come from an optional TOML file overlaid with environment
//! variables. The two API keys are normally supplied only through the
//! environment and are validated at startup.

use crate::error::{ResearchError, Result};
use serde::{Deserialize, Serialize};
use sift_search::SearchConfig;
use std::fmt;
use std::path::Path;

/// Environment variable holding the search API key.
pub const SEARCH_API_KEY_ENV: &str = "BING_API_KEY";
/// Environment variable holding the summarisation API key.
pub const SUMMARY_API_KEY_ENV: &str = "GEMINI_API_KEY";
/// Environment variable overriding the bind host.
pub const HOST_ENV: &str = "SIFT_HOST";
/// Environment variable overriding the bind port.
pub const PORT_ENV: &str = "SIFT_PORT";

/// Top-level configuration.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResearchConfig {
    /// Search API subscription key.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub search_api_key: String,
    /// Generative-language API key.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub summary_api_key: String,
    /// Search, fetch and aggregation settings.
    pub search: SearchConfig,
    /// Summarisation settings.
    pub summary: SummaryConfig,
    /// Form endpoint settings.
    pub server: ServerConfig,
}

/// Generative-language API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    /// API base URL, without the `/models/...` suffix.
    pub base_url: String,
    /// Model identifier.
    pub model: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
    /// Target summary length in words.
    pub word_count: u32,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_owned(),
            model: "gemini-1.5-flash-latest".to_owned(),
            timeout_seconds: 60,
            word_count: 300,
        }
    }
}

impl SummaryConfig {
    /// Full `generateContent` URL for the configured model.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

/// Form endpoint bind settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind; `0` picks a free port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 5000,
        }
    }
}

impl fmt::Debug for ResearchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResearchConfig")
            .field("search_api_key", &redact(&self.search_api_key))
            .field("summary_api_key", &redact(&self.summary_api_key))
            .field("search", &self.search)
            .field("summary", &self.summary)
            .field("server", &self.server)
            .finish()
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() { "" } else { "<redacted>" }
}

impl ResearchConfig {
    /// Create a config with both API keys and defaults for everything else.
    pub fn with_keys(search_api_key: impl Into<String>, summary_api_key: impl Into<String>) -> Self {
        Self {
            search_api_key: search_api_key.into(),
            summary_api_key: summary_api_key.into(),
            ..Self::default()
        }
    }

    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| ResearchError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// API keys are written only if they are set.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| ResearchError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load, overlay the process environment, and validate.
    ///
    /// With `Some(path)` the file must exist. With `None` the default
    /// [`crate::sift_dirs::config_file`] is read when present, otherwise
    /// defaults are used.
    ///
    /// # Errors
    ///
    /// Returns [`ResearchError::MissingConfiguration`] when an API key is
    /// absent, or [`ResearchError::Config`] for unreadable or invalid settings.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => {
                let default_path = crate::sift_dirs::config_file();
                if default_path.is_file() {
                    Self::from_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay values from an environment lookup.
    ///
    /// Empty values are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ResearchError::Config`] if the port override is not a number.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = get(SEARCH_API_KEY_ENV) {
            self.search_api_key = key;
        }
        if let Some(key) = get(SUMMARY_API_KEY_ENV) {
            self.summary_api_key = key;
        }
        if let Some(host) = get(HOST_ENV) {
            self.server.host = host;
        }
        if let Some(port) = get(PORT_ENV) {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|e| ResearchError::Config(format!("{PORT_ENV} is not a port: {e}")))?;
        }
        Ok(())
    }

    /// Validate settings.
    ///
    /// # Errors
    ///
    /// Returns [`ResearchError::MissingConfiguration`] naming the environment
    /// variable of the first absent API key, or [`ResearchError::Config`] for
    /// invalid search, summary or server settings.
    pub fn validate(&self) -> Result<()> {
        if self.search_api_key.trim().is_empty() {
            return Err(ResearchError::MissingConfiguration(format!(
                "search API key ({SEARCH_API_KEY_ENV})"
            )));
        }
        if self.summary_api_key.trim().is_empty() {
            return Err(ResearchError::MissingConfiguration(format!(
                "summary API key ({SUMMARY_API_KEY_ENV})"
            )));
        }
        self.search
            .validate()
            .map_err(|e| ResearchError::Config(e.to_string()))?;
        if self.summary.timeout_seconds == 0 {
            return Err(ResearchError::Config(
                "summary.timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.summary.word_count == 0 {
            return Err(ResearchError::Config(
                "summary.word_count must be greater than 0".into(),
            ));
        }
        if self.summary.model.trim().is_empty() {
            return Err(ResearchError::Config("summary.model must not be empty".into()));
        }
        if self.server.host.trim().is_empty() {
            return Err(ResearchError::Config("server.host must not be empty".into()));
        }
        Ok(())
    }

    /// Search settings with the search API key filled in.
    pub fn search_config(&self) -> SearchConfig {
        self.search.clone().with_api_key(self.search_api_key.clone())
    }
}
