//! Fetch layer: retrieves raw response bodies from the repository
//!
//! - [`fetcher`]: `Fetcher` trait, mockable in tests
//! - [`http`]: reqwest-backed implementation
//! - [`error`]: transport errors

pub mod error;
pub mod fetcher;
pub mod http;

pub use error::FetchError;
pub use fetcher::Fetcher;
pub use http::HttpFetcher;
