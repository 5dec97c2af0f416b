//! Trait definitions for `hopfetch`.
//!
//! A fetcher sits between two seams: a [`Transport`] it pulls connections
//! from, and a [`FetchCallback`] it pushes the terminal outcome into.

use std::io;

use url::Url;

use crate::error::FetchError;
use crate::models::ResponseBody;

// ============================================================================
// Fetch Callback
// ============================================================================

/// Receiver for the terminal outcome of a fetch.
///
/// Both methods consume the callback, so a fetcher can invoke at most one of
/// them, at most once.
pub trait FetchCallback {
    /// Called when the resource was retrieved.
    ///
    /// `content_length` is the declared body length, or
    /// [`UNKNOWN_CONTENT_LENGTH`](crate::UNKNOWN_CONTENT_LENGTH).
    fn on_response(self, body: ResponseBody, content_length: i64);

    /// Called when the fetch failed.
    fn on_failure(self, error: FetchError);
}

// ============================================================================
// Transport
// ============================================================================

/// Opens connections to URLs.
///
/// A transport performs exactly one HTTP exchange per connection. It must not
/// follow redirects itself; redirect handling belongs to the fetcher.
pub trait Transport {
    /// Connection type produced by this transport.
    type Connection: Connection;

    /// Opens a connection to `url` and sends the request.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    fn open(&self, url: &Url) -> io::Result<Self::Connection>;
}

/// One open HTTP exchange.
pub trait Connection {
    /// Returns the response status code, reading it if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if the response cannot be read.
    fn status_code(&mut self) -> io::Result<u16>;

    /// Returns a response header value. Names are case-insensitive.
    fn header(&self, name: &str) -> Option<String>;

    /// Returns the response body stream.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is unavailable or was already taken.
    fn body(&mut self) -> io::Result<ResponseBody>;

    /// Releases the connection. Calling it more than once has no effect.
    ///
    /// Fetchers disconnect right after delivering the body to their callback,
    /// possibly before the consumer finished reading it. Implementations whose
    /// body stream borrows the underlying socket must keep the stream usable
    /// after disconnect, or document that it is not.
    fn disconnect(&mut self);
}
