//! Fetch outcome types.

use std::fmt;
use std::io::Read;

use crate::error::FetchError;

/// Content length reported when the server did not declare one.
pub const UNKNOWN_CONTENT_LENGTH: i64 = -1;

/// Owned, readable response body.
pub type ResponseBody = Box<dyn Read + Send>;

// ============================================================================
// Fetch Outcome
// ============================================================================

/// The single terminal result of a fetch.
pub enum FetchOutcome {
    /// The resource was retrieved.
    Success {
        /// Response stream, positioned at the start of the body.
        body: ResponseBody,
        /// Declared length in bytes, or [`UNKNOWN_CONTENT_LENGTH`].
        content_length: i64,
    },
    /// The fetch failed.
    Failure {
        /// Why it failed.
        error: FetchError,
    },
}

impl FetchOutcome {
    /// Returns true if the fetch succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Returns the declared content length, if the fetch succeeded and the
    /// server declared one.
    pub fn content_length(&self) -> Option<u64> {
        match self {
            Self::Success { content_length, .. } => u64::try_from(*content_length).ok(),
            Self::Failure { .. } => None,
        }
    }

    /// Returns the error, if the fetch failed.
    pub fn error(&self) -> Option<&FetchError> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error } => Some(error),
        }
    }

    /// Converts the outcome into a `Result` of the body stream.
    pub fn into_result(self) -> Result<ResponseBody, FetchError> {
        match self {
            Self::Success { body, .. } => Ok(body),
            Self::Failure { error } => Err(error),
        }
    }
}

impl fmt::Debug for FetchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success { content_length, .. } => f
                .debug_struct("Success")
                .field("content_length", content_length)
                .finish_non_exhaustive(),
            Self::Failure { error } => f.debug_struct("Failure").field("error", error).finish(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
