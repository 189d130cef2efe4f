//! Error types for the library layer.

use std::fmt;

/// Errors produced by the library layer, wrapping upstream API errors
/// and adding input validation failures.
#[derive(Debug)]
pub enum QuotesError {
    /// An error from the underlying quote fetcher.
    Api(yfquotes_api::Error),
    /// User-provided input failed validation.
    InvalidInput(String),
}

impl QuotesError {
    /// Whether a later call (after a backoff) may succeed.
    pub fn is_retryable_later(&self) -> bool {
        match self {
            Self::Api(e) => e.is_retryable_later(),
            Self::InvalidInput(_) => false,
        }
    }
}

impl fmt::Display for QuotesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for QuotesError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::InvalidInput(_) => None,
        }
    }
}

impl From<yfquotes_api::Error> for QuotesError {
    fn from(e: yfquotes_api::Error) -> Self {
        Self::Api(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn display_wraps_api_error() {
        let err = QuotesError::from(yfquotes_api::Error::Auth { status: 401 });
        assert!(err.to_string().starts_with("API error:"));
        assert!(err.source().is_some());
        assert!(err.is_retryable_later());
    }

    #[test]
    fn invalid_input_is_not_retryable() {
        let err = QuotesError::InvalidInput("empty symbol".to_string());
        assert_eq!(err.to_string(), "Invalid input: empty symbol");
        assert!(err.source().is_none());
        assert!(!err.is_retryable_later());
    }
}
