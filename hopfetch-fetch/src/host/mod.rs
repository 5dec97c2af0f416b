//! Host APIs for hopfetch.
//!
//! - [`http`] - Blocking HTTP transport with tracing and domain allowlist

pub mod http;

// Re-export key types
pub use http::{HttpConnection, HttpTransport};
