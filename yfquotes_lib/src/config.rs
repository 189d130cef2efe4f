//! Environment-driven settings for [`QuoteClient`](crate::QuoteClient).

use std::time::Duration;

use yfquotes_api::{Endpoints, TransportConfig};

use crate::error::QuotesError;

const DEFAULT_CACHE_TTL_SECS: u64 = 60;

/// Everything needed to build a [`QuoteClient`](crate::QuoteClient).
#[derive(Clone, Debug)]
pub struct Settings {
    pub endpoints: Endpoints,
    pub transport: TransportConfig,
    /// How long a fetched quote is served from cache.
    pub cache_ttl: Duration,
    /// Known crumb to start with instead of acquiring one on first use.
    pub crumb: Option<String>,
    /// Session cookie matching `crumb`.
    pub cookie: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            transport: TransportConfig::default(),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            crumb: None,
            cookie: None,
        }
    }
}

impl Settings {
    /// Reads `YFQUOTES_*` variables, falling back to defaults for anything
    /// missing or unparsable. Only malformed endpoint URLs are an error.
    pub fn from_env() -> Result<Self, QuotesError> {
        let defaults = Self::default();

        let endpoints = match (env_string("YFQUOTES_QUOTES_URL"), env_string("YFQUOTES_CRUMB_URL")) {
            (None, None) => defaults.endpoints,
            (quotes, crumb) => Endpoints::from_urls(
                quotes
                    .as_deref()
                    .unwrap_or(defaults.endpoints.quotes_url.as_str()),
                crumb
                    .as_deref()
                    .unwrap_or(defaults.endpoints.crumb_url.as_str()),
            )?,
        };

        let timeout = Duration::from_millis(env_u64(
            "YFQUOTES_TIMEOUT_MS",
            defaults.transport.request_timeout.as_millis() as u64,
        ));
        let transport = TransportConfig {
            connect_timeout: timeout,
            request_timeout: timeout,
            max_redirects: env_usize("YFQUOTES_MAX_REDIRECTS", defaults.transport.max_redirects),
        };

        Ok(Self {
            endpoints,
            transport,
            cache_ttl: Duration::from_secs(env_u64("YFQUOTES_CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS)),
            crumb: env_string("YFQUOTES_CRUMB"),
            cookie: env_string("YFQUOTES_COOKIE"),
        })
    }
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|val| val.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_usize(key: &str, default: usize) -> usize {
    std::env::var(key)
        .ok()
        .and_then(|val| val.parse::<usize>().ok())
        .unwrap_or(default)
}
