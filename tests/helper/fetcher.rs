//! Fetcher test utilities

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use maven_versions::check::VersionChecker;
use maven_versions::fetch::{FetchError, Fetcher};
use maven_versions::report::{PrefixQuery, PrefixReporter};

/// Fetcher serving canned bodies by URL
pub struct StaticFetcher {
    bodies: HashMap<String, Vec<u8>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self {
            bodies: HashMap::new(),
        }
    }

    pub fn with_body(mut self, url: &str, body: &str) -> Self {
        self.bodies.insert(url.to_string(), body.as_bytes().to_vec());
        self
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        match self.bodies.get(url) {
            Some(body) => Ok(body.clone()),
            None => Err(FetchError::UnexpectedStatus {
                status: 404,
                url: url.to_string(),
            }),
        }
    }
}

/// Create a checker over the given fetcher with the default entry limit
pub fn checker_with(fetcher: impl Fetcher + 'static) -> VersionChecker {
    VersionChecker::new(Arc::new(fetcher), PrefixReporter::default())
}

pub fn prefixes(items: &[&str]) -> Vec<PrefixQuery> {
    items
        .iter()
        .map(|p| PrefixQuery::new(*p).unwrap())
        .collect()
}
