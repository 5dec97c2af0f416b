//! Transport construction errors.

use thiserror::Error;

/// Error building or configuring the HTTP transport.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The underlying client could not be built.
    #[error("Client error: {0}")]
    Client(#[from] reqwest::Error),

    /// Domain not allowed.
    #[error("Domain not allowed: {0}")]
    DomainNotAllowed(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}
