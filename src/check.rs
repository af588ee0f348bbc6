//! Version check coordinator
//!
//! Fetches a repository body, parses it in the requested format and builds
//! the prefix report. The fetcher is injected so checks run without network
//! access in tests.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::fetch::{FetchError, Fetcher};
use crate::parser::{self, ParseError, SourceFormat};
use crate::report::{FilteredReport, PrefixQuery, PrefixReporter};

/// Failure of a single check
#[derive(Debug, Error)]
pub enum CheckError {
    #[error(transparent)]
    Transport(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// What to query and how to report it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRequest {
    pub url: String,
    pub format: SourceFormat,
    pub prefixes: Vec<PrefixQuery>,
}

/// Runs checks against a repository through the given fetcher
pub struct VersionChecker {
    fetcher: Arc<dyn Fetcher>,
    reporter: PrefixReporter,
}

impl VersionChecker {
    pub fn new(fetcher: Arc<dyn Fetcher>, reporter: PrefixReporter) -> Self {
        Self { fetcher, reporter }
    }

    pub async fn check(&self, request: &CheckRequest) -> Result<FilteredReport, CheckError> {
        let body = self.fetcher.fetch(&request.url).await?;

        let parser = parser::parser_for(request.format);
        let versions = parser.parse(&body)?;
        debug!(
            "Parsed {} versions from {} ({})",
            versions.len(),
            request.url,
            parser.format().as_str()
        );

        let report = self.reporter.report(&versions, &request.prefixes);
        info!(
            total = report.total,
            prefixes = report.matches.len(),
            "Built version report"
        );

        Ok(report)
    }
}

/// Render the user-facing text for a check outcome.
///
/// Failures become a single `Error: <message>` line; they are reported,
/// not propagated.
pub fn render_outcome(outcome: &Result<FilteredReport, CheckError>) -> String {
    match outcome {
        Ok(report) => report.to_string(),
        Err(e) => format!("Error: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::fetcher::MockFetcher;

    const URL: &str = "https://maven.example.com/api/maven/versions/releases/net/neoforged/neoforge";

    fn request(format: SourceFormat, prefixes: &[&str]) -> CheckRequest {
        CheckRequest {
            url: URL.to_string(),
            format,
            prefixes: prefixes
                .iter()
                .map(|p| PrefixQuery::new(*p).unwrap())
                .collect(),
        }
    }

    fn checker_returning(body: &'static str) -> VersionChecker {
        let mut fetcher = MockFetcher::new();
        fetcher
            .expect_fetch()
            .withf(|url| url == URL)
            .times(1)
            .returning(move |_| Ok(body.as_bytes().to_vec()));
        VersionChecker::new(Arc::new(fetcher), PrefixReporter::default())
    }

    #[tokio::test]
    async fn check_reports_json_versions_by_prefix() {
        let checker = checker_returning(r#"{"versions": ["1.20.1", "1.20.2", "20.0.1"]}"#);

        let outcome = checker
            .check(&request(SourceFormat::Json, &["20.", "1.20"]))
            .await;

        assert_eq!(
            render_outcome(&outcome),
            "Total versions: 3\n\
             Versions starting with 20.: ['20.0.1']\n\
             Versions starting with 1.20: ['1.20.1', '1.20.2']"
        );
    }

    #[tokio::test]
    async fn check_reports_xml_versions_by_prefix() {
        let checker = checker_returning(
            "<metadata><versioning><versions>\
             <version>1.20.1-47.1.3</version><version>20.2.5</version>\
             </versions></versioning></metadata>",
        );

        let report = checker
            .check(&request(SourceFormat::Xml, &["20.", "1.20"]))
            .await
            .unwrap();

        assert_eq!(report.total, 2);
        assert_eq!(report.matches_for("20."), Some(&["20.2.5".to_string()][..]));
        assert_eq!(
            report.matches_for("1.20"),
            Some(&["1.20.1-47.1.3".to_string()][..])
        );
    }

    #[tokio::test]
    async fn check_treats_missing_key_as_empty_result() {
        let checker = checker_returning("{}");

        let outcome = checker.check(&request(SourceFormat::Json, &["20."])).await;

        assert_eq!(
            render_outcome(&outcome),
            "Total versions: 0\nVersions starting with 20.: []"
        );
    }

    #[tokio::test]
    async fn check_surfaces_parse_error_instead_of_empty_report() {
        let checker = checker_returning("not json");

        let outcome = checker.check(&request(SourceFormat::Json, &["20."])).await;

        assert!(matches!(outcome, Err(CheckError::Parse(ParseError::InvalidJson(_)))));
        let rendered = render_outcome(&outcome);
        assert!(rendered.starts_with("Error: Invalid JSON: "), "{}", rendered);
        assert!(!rendered.contains('\n'));
    }

    #[tokio::test]
    async fn check_surfaces_transport_error() {
        let mut fetcher = MockFetcher::new();
        fetcher.expect_fetch().times(1).returning(|url| {
            Err(FetchError::UnexpectedStatus {
                status: 503,
                url: url.to_string(),
            })
        });
        let checker = VersionChecker::new(Arc::new(fetcher), PrefixReporter::default());

        let outcome = checker.check(&request(SourceFormat::Xml, &["20."])).await;

        assert!(matches!(outcome, Err(CheckError::Transport(_))));
        assert_eq!(
            render_outcome(&outcome),
            format!("Error: Unexpected status 503 from {}", URL)
        );
    }
}
