//! Target fetching.
//!
//! The core only needs a body or an error message per target; everything
//! HTTP-specific lives here.

pub mod http;

pub use http::{Fetch, HttpFetcher};
