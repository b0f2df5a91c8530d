//! sift: query-driven web research.
//!
//! Given a text query, sift retrieves search results, fetches and cleans
//! the text of every result page, concatenates it, and asks a
//! generative-language API for a bounded-length summary.
//!
//! # Architecture
//!
//! Search → Aggregate → Summarise, run once per query:
//! - **Search**: Bing Web Search API via [`sift_search::BingApiProvider`]
//! - **Aggregate**: concurrent page fetch + boilerplate stripping via
//!   [`sift_search::Aggregator`]
//! - **Summarise**: Gemini `generateContent` via [`summarizer::GeminiSummarizer`]
//! - **Form endpoint**: a single axum route rendering the summary
//!
//! Every stage failure degrades to an empty value; the reason is logged
//! and kept in the [`research::ResearchReport`].

pub mod config;
pub mod error;
pub mod render;
pub mod research;
pub mod server;
pub mod sift_dirs;
pub mod summarizer;

pub use config::ResearchConfig;
pub use error::{ResearchError, Result};
pub use research::{LiveResearcher, ResearchReport, ResearchService, Researcher};
pub use server::ResearchServer;
pub use summarizer::{GeminiSummarizer, Summarizer};
