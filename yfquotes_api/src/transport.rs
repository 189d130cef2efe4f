//! HTTP transport shared by the crumb and quote requests.

use std::time::Duration;

use reqwest::header::{HeaderMap, ACCEPT, ACCEPT_LANGUAGE, COOKIE};
use reqwest::{redirect, StatusCode};
use url::Url;

use crate::{user_agent::get_user_agent, Error};

/// Redirect hops followed before a request fails.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Default connect and request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeouts and redirect policy for the underlying `reqwest::Client`.
#[derive(Clone, Debug)]
pub struct TransportConfig {
    /// Time allowed to establish a connection.
    pub connect_timeout: Duration,
    /// Time allowed for the whole request, body included.
    pub request_timeout: Duration,
    /// Redirect hops followed before giving up with a transport error.
    pub max_redirects: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout: DEFAULT_TIMEOUT,
            request_timeout: DEFAULT_TIMEOUT,
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }
}

/// Status, headers and body of a completed request.
#[derive(Debug)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

/// Thin GET-only wrapper around a configured `reqwest::Client`.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Clone, Debug)]
pub struct Transport {
    client: reqwest::Client,
}

impl Transport {
    pub fn new(config: &TransportConfig) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .user_agent(get_user_agent())
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .redirect(redirect::Policy::limited(config.max_redirects))
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::Transport(e)
            })?;
        Ok(Self { client })
    }

    /// Sends a GET to `url`, attaching `cookie` when given.
    ///
    /// Any HTTP status is returned as a response; only network failures,
    /// timeouts and redirect-limit violations are errors.
    pub async fn get(&self, url: Url, cookie: Option<&str>) -> Result<RawResponse, Error> {
        let mut request = self
            .client
            .get(url)
            .header(ACCEPT, "application/json, text/html;q=0.9, */*;q=0.8")
            .header(ACCEPT_LANGUAGE, "en-US,en;q=0.9");
        if let Some(cookie) = cookie {
            request = request.header(COOKIE, cookie);
        }

        let resp = request.send().await.map_err(|e| {
            tracing::error!("Failed to get resource: {}", e);
            Error::Transport(e)
        })?;

        let status = resp.status();
        let headers = resp.headers().clone();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::Transport(e)
        })?;

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}
