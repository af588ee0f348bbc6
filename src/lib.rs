//! Query a Maven repository for its published versions and report them
//! grouped by version prefix.
//!
//! - [`fetch`]: retrieves the version listing (JSON API) or `maven-metadata.xml`
//! - [`parser`]: extracts the ordered version list from either body format
//! - [`report`]: filters the list by prefix and renders the report
//! - [`check`]: ties the three together behind an injectable fetcher

pub mod check;
pub mod config;
pub mod fetch;
pub mod logging;
pub mod parser;
pub mod report;
