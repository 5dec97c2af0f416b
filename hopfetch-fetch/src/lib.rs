// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # hopfetch Fetch
//!
//! Synchronous, redirect-following HTTP fetching.
//!
//! ## Fetcher
//!
//! - [`fetcher::RedirectingFetcher`] - Follows a redirect chain and delivers
//!   one outcome to a [`FetchCallback`](hopfetch_core::FetchCallback)
//! - [`redirect::RedirectChain`] - Per-fetch loop and limit bookkeeping
//! - [`connection::ConnectionGuard`] - Disconnects on every exit path
//! - [`settings::FetchSettings`] - Redirect limit, timeout, user agent
//!
//! ## Host APIs
//!
//! - [`host::http`] - Blocking reqwest transport with domain allowlist
//!
//! ## Example
//!
//! ```ignore
//! use hopfetch_core::FetchRequest;
//! use hopfetch_fetch::{FetchSettings, HttpTransport, RedirectingFetcher};
//!
//! let settings = FetchSettings::default();
//! let transport = HttpTransport::with_settings(&settings)?;
//! let fetcher = RedirectingFetcher::with_settings(transport, &settings);
//!
//! let outcome = fetcher.fetch(&FetchRequest::new("https://example.com/"));
//! ```

// Core modules
pub mod connection;
pub mod error;
pub mod fetcher;
pub mod host;
pub mod redirect;
pub mod settings;

// Re-export key types at crate root

// Errors
pub use error::HttpError;

// Host APIs
pub use host::http::{HttpConnection, HttpTransport};

// Fetcher
pub use connection::ConnectionGuard;
pub use fetcher::RedirectingFetcher;
pub use redirect::{DEFAULT_MAX_REDIRECTS, RedirectChain, is_redirect, is_success, resolve_location};
pub use settings::FetchSettings;
