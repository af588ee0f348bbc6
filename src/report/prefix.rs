//! Prefix queries used to filter version lists

use std::fmt;
use std::str::FromStr;

/// A non-empty string matched against the start of each version.
/// Matching is byte-wise and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PrefixQuery(String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("prefix must not be empty")]
pub struct EmptyPrefixError;

impl PrefixQuery {
    pub fn new(prefix: impl Into<String>) -> Result<Self, EmptyPrefixError> {
        let prefix = prefix.into();
        if prefix.is_empty() {
            return Err(EmptyPrefixError);
        }
        Ok(Self(prefix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn matches(&self, version: &str) -> bool {
        version.starts_with(self.0.as_str())
    }
}

impl FromStr for PrefixQuery {
    type Err = EmptyPrefixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for PrefixQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derive the NeoForge version prefix for a Minecraft version.
///
/// NeoForge numbers its releases after the Minecraft version without the
/// leading `1.`: Minecraft `1.20.4` maps to `20.4.`, and `1.21` to `21.0.`.
pub fn neoforge_prefix(minecraft_version: &str) -> Result<PrefixQuery, EmptyPrefixError> {
    if minecraft_version.is_empty() {
        return Err(EmptyPrefixError);
    }

    let parts: Vec<&str> = minecraft_version.split('.').collect();
    let prefix = if parts.len() >= 2 && parts[0] == "1" {
        let minor = parts.get(2).copied().unwrap_or("0");
        format!("{}.{}.", parts[1], minor)
    } else {
        format!("{}.", minecraft_version)
    };

    PrefixQuery::new(prefix)
}
