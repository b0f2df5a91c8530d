//! Search provider implementations.
//!
//! Each module provides a struct implementing [`crate::provider::SearchProvider`]
//! against a specific search API.

pub mod bing;

pub use bing::BingApiProvider;
