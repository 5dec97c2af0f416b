//! Domain models for `hopfetch`.
//!
//! ## Submodules
//!
//! - [`request`] - What to fetch (FetchRequest)
//! - [`outcome`] - What a fetch produced (FetchOutcome, ResponseBody)

mod outcome;
mod request;

// Re-export everything at the models level
pub use outcome::{FetchOutcome, ResponseBody, UNKNOWN_CONTENT_LENGTH};
pub use request::FetchRequest;
