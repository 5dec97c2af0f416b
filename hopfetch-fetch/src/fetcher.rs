//! Redirect-following fetcher.
//!
//! [`RedirectingFetcher`] turns a [`Transport`] that performs single
//! exchanges into a fetch that follows a bounded redirect chain. Every fetch
//! ends in exactly one call to the supplied [`FetchCallback`], and every
//! connection it opens is disconnected before the fetch returns.

use std::time::Instant;

use hopfetch_core::{
    Connection, FetchCallback, FetchError, FetchOutcome, FetchRequest, ResponseBody, Transport,
};
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::connection::ConnectionGuard;
use crate::redirect::{
    DEFAULT_MAX_REDIRECTS, RedirectChain, is_redirect, is_success, resolve_location,
};
use crate::settings::FetchSettings;

/// Header naming the redirect target.
const LOCATION: &str = "Location";

/// A successful final response: the open connection plus its body.
type Delivery<C> = (ConnectionGuard<C>, ResponseBody, i64);

// ============================================================================
// Redirecting Fetcher
// ============================================================================

/// Synchronous fetcher that follows HTTP redirects.
///
/// The fetch runs entirely on the calling thread. No state is shared between
/// fetches, so one fetcher can serve several threads when its transport is
/// `Sync`.
#[derive(Debug, Clone)]
pub struct RedirectingFetcher<T: Transport> {
    transport: T,
    max_redirects: u32,
}

impl<T: Transport> RedirectingFetcher<T> {
    /// Creates a fetcher with the default redirect limit.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }

    /// Creates a fetcher using the redirect limit from `settings`.
    pub fn with_settings(transport: T, settings: &FetchSettings) -> Self {
        Self::new(transport).with_max_redirects(settings.max_redirects)
    }

    /// Sets the maximum number of redirects followed per fetch.
    pub fn with_max_redirects(mut self, max_redirects: u32) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    /// Returns the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetches `request`, blocking until the outcome has been delivered.
    ///
    /// On success `callback.on_response` receives the body stream and the
    /// declared content length, and the final connection is disconnected
    /// right after it returns. Otherwise `callback.on_failure` receives the
    /// error. Exactly one of the two is called.
    #[instrument(skip_all, fields(uri = %request.target_uri()))]
    pub fn fetch_sync<Ctx, B: FetchCallback>(&self, request: &FetchRequest<Ctx>, callback: B) {
        match self.run(request) {
            Ok((mut connection, body, content_length)) => {
                callback.on_response(body, content_length);
                connection.disconnect();
            }
            Err(error) => callback.on_failure(error),
        }
    }

    /// Fetches `request` and returns the outcome.
    ///
    /// The final connection is already disconnected when this returns, so
    /// the transport's body stream must outlive its connection.
    #[instrument(skip_all, fields(uri = %request.target_uri()))]
    pub fn fetch<Ctx>(&self, request: &FetchRequest<Ctx>) -> FetchOutcome {
        match self.run(request) {
            Ok((mut connection, body, content_length)) => {
                connection.disconnect();
                FetchOutcome::Success {
                    body,
                    content_length,
                }
            }
            Err(error) => FetchOutcome::Failure { error },
        }
    }

    /// Follows the chain for one request and logs how it ended.
    fn run<Ctx>(
        &self,
        request: &FetchRequest<Ctx>,
    ) -> Result<Delivery<T::Connection>, FetchError> {
        let started = Instant::now();
        let mut chain = RedirectChain::new(self.max_redirects);
        let result = self.follow(request.target_uri(), &mut chain);

        match &result {
            Ok((_, _, content_length)) => info!(
                redirects = chain.redirects(),
                hops = ?chain.hops(),
                content_length,
                elapsed = ?started.elapsed(),
                "Fetch succeeded"
            ),
            Err(error) => warn!(
                error = %error,
                redirects = chain.redirects(),
                hops = ?chain.hops(),
                elapsed = ?started.elapsed(),
                "Fetch failed"
            ),
        }

        result
    }

    /// Walks the redirect chain until a terminal response.
    fn follow(
        &self,
        target_uri: &str,
        chain: &mut RedirectChain,
    ) -> Result<Delivery<T::Connection>, FetchError> {
        let mut current = Url::parse(target_uri)
            .map_err(|e| FetchError::InvalidUrl(format!("{target_uri}: {e}")))?;

        loop {
            debug!(url = %current, attempt = chain.redirects() + 1, "Opening connection");
            let mut connection = ConnectionGuard::new(self.transport.open(&current)?);
            let status = connection.status_code()?;
            debug!(url = %current, status, "Response received");

            if is_success(status) {
                let body = connection.body()?;
                let content_length = connection.content_length();
                return Ok((connection, body, content_length));
            }

            if !is_redirect(status) {
                connection.disconnect();
                return Err(FetchError::HttpStatus {
                    status,
                    url: current.to_string(),
                });
            }

            let location = connection.header(LOCATION);
            connection.disconnect();

            let next = resolve_location(&current, location.as_deref())?;
            chain.advance(&current, &next)?;
            debug!(
                from = %current,
                to = %next,
                redirects = chain.redirects(),
                "Following redirect"
            );
            current = next;
        }
    }
}
