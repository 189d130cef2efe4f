//! Crumb acquisition and the shared credential cache.

use std::sync::OnceLock;

use regex::Regex;
use reqwest::header::{HeaderMap, SET_COOKIE};
use tokio::sync::Mutex;
use url::Url;

use crate::{Error, Transport};

/// Longest body accepted as a bare crumb.
const MAX_BARE_CRUMB_LEN: usize = 64;

/// A crumb plus the session cookie it is bound to.
///
/// Never mutated: a refresh produces a new `Credential`. `fresh` is true only
/// for the instance returned by the acquisition that minted it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credential {
    value: String,
    cookie: Option<String>,
    fresh: bool,
}

impl Credential {
    /// The crumb sent as the `crumb` query parameter.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The session cookie the crumb was issued for, if any.
    pub fn cookie(&self) -> Option<&str> {
        self.cookie.as_deref()
    }

    /// Whether this credential was minted by the call that returned it.
    pub fn is_fresh(&self) -> bool {
        self.fresh
    }
}

#[cfg(test)]
impl Credential {
    pub(crate) fn for_tests(value: &str) -> Self {
        Self {
            value: value.to_string(),
            cookie: None,
            fresh: false,
        }
    }
}

#[derive(Clone, Debug)]
struct Session {
    crumb: String,
    cookie: Option<String>,
}

impl Session {
    fn to_credential(&self, fresh: bool) -> Credential {
        Credential {
            value: self.crumb.clone(),
            cookie: self.cookie.clone(),
            fresh,
        }
    }
}

/// Holds at most one crumb/cookie pair and knows how to mint a new one.
///
/// Shared between fetchers through an `Arc`. All access goes through an async
/// mutex that is also held across acquisition, so concurrent refreshes are
/// serialized and readers never see a half-written session.
pub struct CredentialCache {
    transport: Transport,
    crumb_url: Url,
    session: Mutex<Option<Session>>,
}

impl CredentialCache {
    /// Creates an empty cache; the first `get_credential` call acquires a crumb.
    pub fn new(transport: Transport, crumb_url: Url) -> Self {
        Self {
            transport,
            crumb_url,
            session: Mutex::new(None),
        }
    }

    /// Seeds the cache with a known crumb and cookie. The seeded value is
    /// served as not fresh, so a rejection still triggers one refresh.
    pub fn with_credential(
        mut self,
        crumb: impl Into<String>,
        cookie: Option<String>,
    ) -> Result<Self, Error> {
        let crumb = crumb.into();
        if crumb.trim().is_empty() {
            return Err(Error::InvalidRequest("crumb must not be empty".to_string()));
        }
        self.session = Mutex::new(Some(Session { crumb, cookie }));
        Ok(self)
    }

    /// Returns the cached credential, or mints a new one when `force_refresh`
    /// is set or nothing is cached.
    ///
    /// On acquisition failure the previous session (if any) stays in place.
    pub async fn get_credential(&self, force_refresh: bool) -> Result<Credential, Error> {
        let mut session = self.session.lock().await;
        if !force_refresh {
            if let Some(cached) = session.as_ref() {
                return Ok(cached.to_credential(false));
            }
        }

        let minted = self.acquire().await?;
        let credential = minted.to_credential(true);
        *session = Some(minted);
        Ok(credential)
    }

    /// The cached credential without any remote call.
    pub async fn cached(&self) -> Option<Credential> {
        self.session
            .lock()
            .await
            .as_ref()
            .map(|s| s.to_credential(false))
    }

    /// Drops the cached session; the next `get_credential` acquires a new one.
    pub async fn invalidate(&self) {
        *self.session.lock().await = None;
    }

    async fn acquire(&self) -> Result<Session, Error> {
        tracing::debug!("Requesting crumb from {}", self.crumb_url);
        let resp = self
            .transport
            .get(self.crumb_url.clone(), None)
            .await
            .map_err(|e| Error::AuthAcquisition(format!("crumb request failed: {}", e)))?;

        if !resp.status.is_success() {
            tracing::error!("Crumb endpoint returned {}", resp.status);
            return Err(Error::AuthAcquisition(format!(
                "crumb endpoint returned HTTP {}",
                resp.status.as_u16()
            )));
        }

        let cookie = session_cookie(&resp.headers);
        if cookie.is_none() {
            tracing::warn!("Crumb response carried no Set-Cookie header");
        }
        let crumb = extract_crumb(&resp.body).ok_or_else(|| {
            tracing::error!("No crumb found in crumb endpoint response");
            Error::AuthAcquisition("no crumb in response body".to_string())
        })?;

        tracing::debug!("Acquired new crumb");
        Ok(Session { crumb, cookie })
    }
}

fn crumb_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#""CrumbStore"\s*:\s*\{\s*"crumb"\s*:\s*"([^"]+)"\s*\}"#)
            .expect("crumb pattern is valid")
    })
}

/// Pulls the crumb out of a response body: either embedded in a page as
/// `"CrumbStore":{"crumb":"..."}` or returned as the whole body.
pub(crate) fn extract_crumb(body: &str) -> Option<String> {
    if let Some(caps) = crumb_pattern().captures(body) {
        let crumb = caps[1].replace("\\u002F", "/").replace("\\u002f", "/");
        return Some(crumb).filter(|c| !c.is_empty());
    }

    let bare = body.trim();
    let plausible = !bare.is_empty()
        && bare.len() <= MAX_BARE_CRUMB_LEN
        && !bare
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '<' | '>' | '{' | '}' | '"'));
    plausible.then(|| bare.to_string())
}

/// Joins the name=value part of every `Set-Cookie` header into one `Cookie` value.
pub(crate) fn session_cookie(headers: &HeaderMap) -> Option<String> {
    let pairs: Vec<&str> = headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .filter_map(|s| s.split(';').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if pairs.is_empty() {
        None
    } else {
        Some(pairs.join("; "))
    }
}
