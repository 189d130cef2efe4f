//! Library layer for yfquotes: cached quote client, configuration, and symbol validation.
//!
//! Wraps the `yfquotes_api` fetchers with a per-symbol TTL cache, environment
//! driven settings, and input validation.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod validation;

pub use yfquotes_api;
pub use yfquotes_api::types;
pub use yfquotes_api::QuoteQuery;

pub use client::QuoteClient;
pub use config::Settings;
pub use error::QuotesError;
