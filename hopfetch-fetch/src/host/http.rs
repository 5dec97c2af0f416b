//! Blocking HTTP transport with tracing and domain allowlist.
//!
//! This module provides the production [`Transport`]:
//! - One request per connection, automatic redirects disabled
//! - Request/response tracing
//! - Domain allowlist for security
//! - Response bodies that stay readable after disconnect

use std::io;

use hopfetch_core::{Connection, ResponseBody, Transport};
use reqwest::blocking::{Client, Response};
use reqwest::header::HeaderMap;
use reqwest::redirect::Policy;
use tracing::{debug, instrument};
use url::Url;

use crate::error::HttpError;
use crate::settings::FetchSettings;

// ============================================================================
// HTTP Transport
// ============================================================================

/// Transport backed by a blocking reqwest client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    inner: Client,
    allowed_domains: Option<Vec<String>>,
}

impl HttpTransport {
    /// Creates a transport with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built, which usually
    /// indicates a broken TLS configuration.
    pub fn new() -> Result<Self, HttpError> {
        Self::with_settings(&FetchSettings::default())
    }

    /// Creates a transport using the timeout, user agent, proxy, and
    /// allowlist options from `settings`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_settings(settings: &FetchSettings) -> Result<Self, HttpError> {
        let mut builder = Client::builder()
            .timeout(settings.timeout)
            .user_agent(settings.user_agent.as_str())
            .redirect(Policy::none());
        if !settings.system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;

        Ok(Self {
            inner: client,
            allowed_domains: settings.allowed_domains.clone(),
        })
    }

    /// Checks if a URL's domain is allowed.
    fn is_domain_allowed(&self, url: &Url) -> Result<(), HttpError> {
        let Some(ref allowed) = self.allowed_domains else {
            return Ok(()); // No restrictions
        };

        let host = url
            .host_str()
            .ok_or_else(|| HttpError::InvalidUrl(format!("No host in URL: {url}")))?;

        let allowed = allowed
            .iter()
            .any(|domain| host == domain || host.ends_with(&format!(".{domain}")));

        if allowed {
            Ok(())
        } else {
            Err(HttpError::DomainNotAllowed(host.to_string()))
        }
    }
}

impl Transport for HttpTransport {
    type Connection = HttpConnection;

    #[instrument(skip(self), fields(url = %url))]
    fn open(&self, url: &Url) -> io::Result<HttpConnection> {
        self.is_domain_allowed(url)
            .map_err(|e| io::Error::new(io::ErrorKind::PermissionDenied, e))?;
        debug!("GET request");

        let response = self.inner.get(url.clone()).send().map_err(into_io_error)?;
        debug!(status = %response.status(), "Response received");
        Ok(HttpConnection::new(response))
    }
}

/// Maps a reqwest failure onto the closest I/O error kind.
fn into_io_error(err: reqwest::Error) -> io::Error {
    let kind = if err.is_timeout() {
        io::ErrorKind::TimedOut
    } else if err.is_connect() {
        io::ErrorKind::ConnectionRefused
    } else {
        io::ErrorKind::Other
    };
    io::Error::new(kind, err)
}

// ============================================================================
// HTTP Connection
// ============================================================================

/// A single response from [`HttpTransport`].
///
/// Status and headers are copied out of the response, so they stay available
/// after the body has been handed to the caller.
#[derive(Debug)]
pub struct HttpConnection {
    status: u16,
    headers: HeaderMap,
    response: Option<Response>,
}

impl HttpConnection {
    fn new(response: Response) -> Self {
        Self {
            status: response.status().as_u16(),
            headers: response.headers().clone(),
            response: Some(response),
        }
    }
}

impl Connection for HttpConnection {
    fn status_code(&mut self) -> io::Result<u16> {
        Ok(self.status)
    }

    fn header(&self, name: &str) -> Option<String> {
        self.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }

    fn body(&mut self) -> io::Result<ResponseBody> {
        self.response
            .take()
            .map(|response| Box::new(response) as ResponseBody)
            .ok_or_else(|| io::Error::other("response body already taken"))
    }

    /// Drops the response if the body was never taken. A body already handed
    /// out owns the response and keeps reading normally.
    fn disconnect(&mut self) {
        self.response = None;
    }
}

// ============================================================================
// Tests
// ============================================================================
