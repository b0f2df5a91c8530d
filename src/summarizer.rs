//! Corpus summarisation via a generative-language API.
//!
//! [`GeminiSummarizer`] wraps the corpus in a fixed instruction (fixed word
//! count, emphasis on numeric data, bullets and tables for numbers), POSTs
//! it to `generateContent`, and returns the first candidate's first text
//! part.
//!
//! # Wire format
//!
//! Request: `{"contents": [{"parts": [{"text": "..."}]}]}`
//!
//! Response: `{"candidates": [{"content": {"parts": [{"text": "..."}]}}]}`

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::config::SummaryConfig;
use crate::error::{ResearchError, Result};

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-goog-api-key";

/// Produces a summary of a research corpus.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarise `corpus`, which may be empty.
    ///
    /// # Errors
    ///
    /// Returns [`ResearchError::Transport`], [`ResearchError::Status`] or
    /// [`ResearchError::MalformedResponse`] when no summary can be obtained.
    async fn try_summarize(&self, corpus: &str) -> Result<String>;

    /// Human-readable backend name for logs.
    fn name(&self) -> &str;

    /// Summarise `corpus`, degrading any failure to an empty string.
    async fn summarize(&self, corpus: &str) -> String {
        match self.try_summarize(corpus).await {
            Ok(summary) => summary,
            Err(err) => {
                tracing::warn!(backend = self.name(), error = %err, "summarisation failed");
                String::new()
            }
        }
    }
}

/// Build the natural-language instruction with the corpus embedded verbatim.
pub fn build_instruction(corpus: &str, word_count: u32) -> String {
    format!(
        "Summarize this text in exactly {word_count} words.\n\
         Extract and highlight key numbers, statistics, and important details.\n\
         Where the text contains numerical data, present it as bullet points and tables.\n\
         Ensure the summary is concise, clear, and captures the most significant information.\n\
         \n\
         Text to summarize:\n\
         {corpus}"
    )
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

/// Build the `generateContent` request body for an instruction.
pub fn build_request_body(instruction: &str) -> serde_json::Value {
    let request = GenerateContentRequest {
        contents: [Content {
            parts: [Part { text: instruction }],
        }],
    };
    serde_json::to_value(request).unwrap_or_default()
}

/// Extract `candidates[0].content.parts[0].text` from a response body.
///
/// # Errors
///
/// Returns [`ResearchError::MalformedResponse`] naming the first missing step.
pub fn parse_summary(body: &serde_json::Value) -> Result<String> {
    let candidate = body
        .get("candidates")
        .and_then(|c| c.get(0))
        .ok_or_else(|| ResearchError::MalformedResponse("no candidates".into()))?;
    let part = candidate
        .get("content")
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.get(0))
        .ok_or_else(|| ResearchError::MalformedResponse("candidate has no content parts".into()))?;
    part.get("text")
        .and_then(serde_json::Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| ResearchError::MalformedResponse("first part has no text".into()))
}

/// Gemini `generateContent` client.
pub struct GeminiSummarizer {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    word_count: u32,
}

impl GeminiSummarizer {
    /// Create a summariser for the configured model.
    ///
    /// # Errors
    ///
    /// Returns [`ResearchError::Config`] if the HTTP client cannot be built.
    pub fn new(config: &SummaryConfig, api_key: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| ResearchError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoint: config.endpoint(),
            api_key: api_key.into(),
            word_count: config.word_count,
        })
    }

    /// The full request URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Summarizer for GeminiSummarizer {
    async fn try_summarize(&self, corpus: &str) -> Result<String> {
        let instruction = build_instruction(corpus, self.word_count);
        tracing::debug!(corpus_bytes = corpus.len(), "requesting summary");

        let response = self
            .client
            .post(&self.endpoint)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&build_request_body(&instruction))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ResearchError::Transport("summary request timed out".into())
                } else {
                    ResearchError::Transport(format!("summary request failed: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResearchError::Status(status.as_u16()));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ResearchError::MalformedResponse(format!("summary body: {e}")))?;

        let summary = parse_summary(&body)?;
        tracing::debug!(summary_bytes = summary.len(), "summary received");
        Ok(summary)
    }

    fn name(&self) -> &str {
        "Gemini"
    }
}
