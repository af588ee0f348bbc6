//! Common types for parsers

/// Format of the response body returned by the repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    /// Version listing API (`{"versions": [...]}`)
    Json,
    /// Standard `maven-metadata.xml` manifest
    Xml,
}

impl SourceFormat {
    /// Returns the string representation of the source format
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceFormat::Json => "json",
            SourceFormat::Xml => "xml",
        }
    }
}

/// Ordered version identifiers, in the order the repository returned them.
/// Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionList {
    pub versions: Vec<String>,
}

impl VersionList {
    pub fn new(versions: Vec<String>) -> Self {
        Self { versions }
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.versions.iter().map(String::as_str)
    }
}

impl From<Vec<String>> for VersionList {
    fn from(versions: Vec<String>) -> Self {
        Self::new(versions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_list_keeps_duplicates_and_order() {
        let list = VersionList::from(vec![
            "1.0".to_string(),
            "0.9".to_string(),
            "1.0".to_string(),
        ]);

        assert_eq!(list.len(), 3);
        assert_eq!(list.iter().collect::<Vec<_>>(), vec!["1.0", "0.9", "1.0"]);
    }
}
