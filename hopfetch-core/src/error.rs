//! Core error types for `hopfetch`.

use std::io;

use thiserror::Error;

/// Terminal failure of a fetch.
///
/// Every variant ends the fetch. None of them are retried by the fetcher;
/// callers that want retries inspect [`FetchError::is_transient`].
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request target is not a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The transport failed to open a connection or to read from it.
    #[error("Transport error: {0}")]
    Transport(#[from] io::Error),

    /// The server answered with a status that is neither success nor redirect.
    #[error("HTTP error {status} for {url}")]
    HttpStatus {
        /// Status code returned by the server.
        status: u16,
        /// URL that produced the status.
        url: String,
    },

    /// A redirect pointed at a URL already visited during this fetch.
    #[error("Redirect loop detected: {url} was already visited")]
    RedirectLoop {
        /// The revisited URL.
        url: String,
    },

    /// The redirect chain is longer than the configured maximum.
    #[error("Too many redirects: more than {limit} followed, next was {url}")]
    RedirectLimit {
        /// Maximum number of redirects allowed.
        limit: u32,
        /// Location that would have been followed next.
        url: String,
    },

    /// A redirect response carried no usable `Location`.
    #[error("Malformed redirect from {url}: {reason}")]
    MalformedRedirect {
        /// URL that answered with the redirect.
        url: String,
        /// Why the location could not be used.
        reason: String,
    },
}

impl FetchError {
    /// Returns true for the redirect-chain failures (loop, limit, malformed).
    pub fn is_redirect_error(&self) -> bool {
        matches!(
            self,
            Self::RedirectLoop { .. } | Self::RedirectLimit { .. } | Self::MalformedRedirect { .. }
        )
    }

    /// Returns the HTTP status code for [`FetchError::HttpStatus`].
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if a later attempt might succeed.
    ///
    /// Transport failures and 5xx responses are transient. Redirect chain
    /// errors and client errors are not.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::HttpStatus { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_error_classification() {
        let looped = FetchError::RedirectLoop {
            url: "http://localhost/".to_string(),
        };
        let limit = FetchError::RedirectLimit {
            limit: 5,
            url: "http://localhost/".to_string(),
        };
        let status = FetchError::HttpStatus {
            status: 404,
            url: "http://localhost/".to_string(),
        };

        assert!(looped.is_redirect_error());
        assert!(limit.is_redirect_error());
        assert!(!status.is_redirect_error());
    }

    #[test]
    fn test_status_code() {
        let err = FetchError::HttpStatus {
            status: 503,
            url: "http://localhost/".to_string(),
        };
        assert_eq!(err.status_code(), Some(503));
        assert_eq!(FetchError::InvalidUrl("nope".to_string()).status_code(), None);
    }

    #[test]
    fn test_is_transient() {
        let io = FetchError::from(io::Error::new(io::ErrorKind::TimedOut, "timed out"));
        assert!(io.is_transient());

        let server = FetchError::HttpStatus {
            status: 502,
            url: "http://localhost/".to_string(),
        };
        assert!(server.is_transient());

        let missing = FetchError::HttpStatus {
            status: 404,
            url: "http://localhost/".to_string(),
        };
        assert!(!missing.is_transient());

        let looped = FetchError::RedirectLoop {
            url: "http://localhost/".to_string(),
        };
        assert!(!looped.is_transient());
    }

    #[test]
    fn test_display_messages() {
        let err = FetchError::RedirectLimit {
            limit: 5,
            url: "https://localhost/".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Too many redirects: more than 5 followed, next was https://localhost/"
        );

        let err = FetchError::HttpStatus {
            status: 404,
            url: "http://localhost/".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP error 404 for http://localhost/");
    }
}
