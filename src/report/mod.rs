//! Prefix filtering and report rendering
//!
//! # Modules
//!
//! - [`prefix`]: `PrefixQuery` and NeoForge prefix derivation
//! - [`format`]: Python-style list rendering used in report lines

pub mod format;
pub mod prefix;

use std::fmt;

use indexmap::IndexMap;

use crate::config::DEFAULT_MAX_REPORT_ENTRIES;
use crate::parser::types::VersionList;

pub use prefix::{EmptyPrefixError, PrefixQuery, neoforge_prefix};

/// Per-prefix matches, capped at the reporter's entry limit, plus the
/// size of the unfiltered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredReport {
    pub total: usize,
    pub matches: IndexMap<PrefixQuery, Vec<String>>,
}

impl FilteredReport {
    pub fn matches_for(&self, prefix: &str) -> Option<&[String]> {
        self.matches
            .iter()
            .find(|(query, _)| query.as_str() == prefix)
            .map(|(_, versions)| versions.as_slice())
    }
}

impl fmt::Display for FilteredReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Total versions: {}", self.total)?;
        for (prefix, versions) in &self.matches {
            write!(
                f,
                "\nVersions starting with {}: {}",
                prefix,
                format::list_repr(versions.as_slice())
            )?;
        }
        Ok(())
    }
}

/// Filters version lists by prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixReporter {
    max_entries: usize,
}

impl PrefixReporter {
    pub fn new(max_entries: usize) -> Self {
        Self { max_entries }
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Build the report. Prefixes are reported in the given order; a
    /// repeated prefix keeps its first position.
    pub fn report(&self, versions: &VersionList, prefixes: &[PrefixQuery]) -> FilteredReport {
        let mut matches: IndexMap<PrefixQuery, Vec<String>> =
            IndexMap::with_capacity(prefixes.len());
        for prefix in prefixes {
            if matches.contains_key(prefix) {
                continue;
            }
            let matched: Vec<String> = versions
                .iter()
                .filter(|v| prefix.matches(v))
                .take(self.max_entries)
                .map(str::to_string)
                .collect();
            matches.insert(prefix.clone(), matched);
        }

        FilteredReport {
            total: versions.len(),
            matches,
        }
    }
}

impl Default for PrefixReporter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_REPORT_ENTRIES)
    }
}
