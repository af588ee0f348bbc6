//! Parser trait definition

use crate::parser::types::{SourceFormat, VersionList};

/// Trait for extracting versions from a repository response body
pub trait VersionParser: Send + Sync {
    /// Format of the body this parser understands
    fn format(&self) -> SourceFormat;

    /// Parse the body and extract versions in source order
    fn parse(&self, body: &[u8]) -> Result<VersionList, ParseError>;
}

/// Error type for parsing operations
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Body is not valid JSON
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Body is valid but does not have the expected structure
    #[error("Unexpected response shape: {0}")]
    InvalidShape(String),

    /// Body is not well-formed XML
    #[error("Invalid XML: {0}")]
    InvalidXml(String),
}
