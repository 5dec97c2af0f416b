// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `hopfetch` Core
//!
//! Core types, errors, and traits shared by the `hopfetch` crates.
//!
//! This crate has no network code of its own. It describes:
//!
//! - Request and outcome models
//! - The fetch error taxonomy
//! - The seams a fetcher is built on: the result callback and the transport
//!
//! ## Key Types
//!
//! ### Models
//! - [`FetchRequest`] - Target URI plus an opaque caller context
//! - [`FetchOutcome`] - Terminal result of one fetch
//! - [`ResponseBody`] - Owned, readable response stream
//!
//! ### Traits
//! - [`FetchCallback`] - Receives exactly one terminal outcome
//! - [`Transport`] / [`Connection`] - Opens and drives single HTTP exchanges

pub mod error;
pub mod models;
pub mod traits;

// Re-export error types
pub use error::FetchError;

// Re-export all model types
pub use models::{FetchOutcome, FetchRequest, ResponseBody, UNKNOWN_CONTENT_LENGTH};

// Re-export traits
pub use traits::{Connection, FetchCallback, Transport};
