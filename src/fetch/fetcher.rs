//! Fetcher trait for retrieving raw response bodies

#[cfg(test)]
use mockall::automock;

use crate::fetch::error::FetchError;

/// Trait for retrieving the body behind a URL
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches the raw response body
    ///
    /// # Arguments
    /// * `url` - Absolute URL of the version listing or metadata manifest
    ///
    /// # Returns
    /// * `Ok(Vec<u8>)` - The body of a successful response
    /// * `Err(FetchError)` - If the request fails or the status is not a success
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}
