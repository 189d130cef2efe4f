//! Error types for the quote client.

/// Errors that can occur while acquiring a crumb or fetching quotes.
///
/// Only [`Error::Auth`] is the outcome of the refresh-and-retry protocol; every
/// other variant is surfaced on first occurrence.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Connection failure, timeout, or too many redirects.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The crumb endpoint failed or its body carried no crumb.
    #[error("Failed to acquire crumb: {0}")]
    AuthAcquisition(String),
    /// The quote endpoint rejected the request even with a freshly minted crumb.
    #[error("Request unauthorized (HTTP {status}) after refreshing the crumb")]
    Auth { status: u16 },
    /// Success status, but the body is not the expected `quoteResponse` envelope.
    #[error("Unexpected response shape: {0}")]
    Protocol(String),
    /// The API returned a non-success status other than 401, with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The request could not be built (empty symbol list, bad endpoint URL).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl Error {
    /// True when the remote service rejected the credential.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. } | Self::AuthAcquisition(_))
    }

    /// True when calling again after a backoff may succeed. Shape and request
    /// errors are never worth retrying.
    pub fn is_retryable_later(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Auth { .. } | Self::AuthAcquisition(_) => true,
            Self::HttpStatus { status, .. } => *status == 429 || *status >= 500,
            Self::Protocol(_) | Self::InvalidRequest(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_errors_are_classified() {
        assert!(Error::Auth { status: 401 }.is_auth());
        assert!(Error::AuthAcquisition("no crumb".to_string()).is_auth());
        assert!(!Error::Protocol("missing quoteResponse".to_string()).is_auth());
    }

    #[test]
    fn protocol_errors_are_not_retryable() {
        assert!(!Error::Protocol("missing result".to_string()).is_retryable_later());
        assert!(!Error::InvalidRequest("no symbols".to_string()).is_retryable_later());
        assert!(Error::Auth { status: 401 }.is_retryable_later());
    }

    #[test]
    fn http_status_retryability_depends_on_code() {
        let throttled = Error::HttpStatus {
            status: 429,
            body: String::new(),
        };
        let missing = Error::HttpStatus {
            status: 404,
            body: String::new(),
        };
        let unavailable = Error::HttpStatus {
            status: 503,
            body: String::new(),
        };
        assert!(throttled.is_retryable_later());
        assert!(!missing.is_retryable_later());
        assert!(unavailable.is_retryable_later());
    }

    #[test]
    fn display_messages() {
        let err = Error::Auth { status: 401 };
        assert!(err.to_string().contains("401"));

        let err = Error::HttpStatus {
            status: 500,
            body: "oops".to_string(),
        };
        assert_eq!(err.to_string(), "Request failed with status 500");

        let err = Error::AuthAcquisition("crumb endpoint returned HTTP 404".to_string());
        assert!(err.to_string().contains("crumb endpoint returned HTTP 404"));
    }
}
