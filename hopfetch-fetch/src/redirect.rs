//! Redirect chain bookkeeping.
//!
//! The fetcher follows redirects itself instead of letting the transport do
//! it, so it can bound the chain and refuse to revisit a URL.

use std::collections::HashSet;

use hopfetch_core::FetchError;
use url::Url;

/// Maximum number of redirects followed by default.
pub const DEFAULT_MAX_REDIRECTS: u32 = 5;

/// Returns true for 2xx status codes.
pub fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Returns true for 3xx status codes.
pub fn is_redirect(status: u16) -> bool {
    (300..400).contains(&status)
}

/// Resolves a `Location` header value against the URL that returned it.
///
/// Absolute locations replace `current`; relative ones are joined onto it.
///
/// # Errors
///
/// Returns [`FetchError::MalformedRedirect`] if the header is missing, blank,
/// or cannot be resolved to a URL.
pub fn resolve_location(current: &Url, location: Option<&str>) -> Result<Url, FetchError> {
    let malformed = |reason: String| FetchError::MalformedRedirect {
        url: current.to_string(),
        reason,
    };

    let location = location
        .map(str::trim)
        .filter(|loc| !loc.is_empty())
        .ok_or_else(|| malformed("missing Location header".to_string()))?;

    current
        .join(location)
        .map_err(|e| malformed(format!("invalid Location {location:?}: {e}")))
}

// ============================================================================
// Redirect Chain
// ============================================================================

/// State of the redirects followed during a single fetch.
#[derive(Debug, Clone)]
pub struct RedirectChain {
    max_redirects: u32,
    visited: HashSet<Url>,
    hops: Vec<Url>,
}

impl RedirectChain {
    /// Creates an empty chain allowing up to `max_redirects` redirects.
    pub fn new(max_redirects: u32) -> Self {
        Self {
            max_redirects,
            visited: HashSet::new(),
            hops: Vec::new(),
        }
    }

    /// Records a redirect from `current` to `next`.
    ///
    /// The limit is checked first, then `current` is marked visited and
    /// `next` is checked against everything visited so far.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::RedirectLimit`] if the chain is already at its
    /// maximum, or [`FetchError::RedirectLoop`] if `next` was visited.
    pub fn advance(&mut self, current: &Url, next: &Url) -> Result<(), FetchError> {
        if self.redirects() >= self.max_redirects {
            return Err(FetchError::RedirectLimit {
                limit: self.max_redirects,
                url: next.to_string(),
            });
        }

        self.visited.insert(current.clone());
        if self.visited.contains(next) {
            return Err(FetchError::RedirectLoop {
                url: next.to_string(),
            });
        }

        self.hops.push(next.clone());
        Ok(())
    }

    /// Returns the number of redirects followed.
    pub fn redirects(&self) -> u32 {
        u32::try_from(self.hops.len()).unwrap_or(u32::MAX)
    }

    /// Returns the locations followed, in order.
    pub fn hops(&self) -> &[Url] {
        &self.hops
    }
}

impl Default for RedirectChain {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_REDIRECTS)
    }
}

// ============================================================================
// Tests
// ============================================================================
