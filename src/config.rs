use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::report::PrefixQuery;

// =============================================================================
// Defaults
// =============================================================================

/// Maximum number of matches shown per prefix
pub const DEFAULT_MAX_REPORT_ENTRIES: usize = 20;

/// Timeout for fetch operations in milliseconds (30 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 30_000;

/// NeoForge version listing API
pub const DEFAULT_JSON_URL: &str =
    "https://maven.neoforged.net/api/maven/versions/releases/net/neoforged/neoforge";

/// Legacy 1.20.1 forge artifact manifest published by NeoForged
pub const DEFAULT_XML_URL: &str =
    "https://maven.neoforged.net/releases/net/neoforged/forge/maven-metadata.xml";

/// Prefixes reported when none are configured
pub const DEFAULT_PREFIXES: [&str; 2] = ["20.", "1.20"];

const APP_NAME: &str = "maven-versions";

/// Application configuration, read from `config.json`
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    pub report: ReportConfig,
    pub fetch: FetchConfig,
}

/// Report-related configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ReportConfig {
    /// Caps displayed matches per prefix; the total count is unaffected
    pub max_report_entries: usize,
    pub prefixes: Vec<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            max_report_entries: DEFAULT_MAX_REPORT_ENTRIES,
            prefixes: DEFAULT_PREFIXES.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl ReportConfig {
    /// Returns the configured prefixes as queries, in order
    pub fn prefix_queries(&self) -> Result<Vec<PrefixQuery>, ConfigError> {
        self.prefixes
            .iter()
            .map(|p| {
                PrefixQuery::new(p.as_str())
                    .map_err(|e| ConfigError::Invalid(format!("report.prefixes: {}", e)))
            })
            .collect()
    }
}

/// HTTP-related configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct FetchConfig {
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_ms: FETCH_TIMEOUT_MS,
            user_agent: format!("{}/{}", APP_NAME, env!("CARGO_PKG_VERSION")),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl AppConfig {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the default location is
    /// used when present and built-in defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => {
                let path = config_path();
                if path.is_file() {
                    Self::from_file(&path)?
                } else {
                    Self::default()
                }
            }
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.report.max_report_entries == 0 {
            return Err(ConfigError::Invalid(
                "report.maxReportEntries must be at least 1".to_string(),
            ));
        }
        self.report.prefix_queries()?;
        Ok(())
    }
}

/// Returns the path to the configuration file.
/// Uses $XDG_CONFIG_HOME/maven-versions if XDG_CONFIG_HOME is set,
/// otherwise falls back to ~/.config/maven-versions,
/// or ./maven-versions if neither is available.
pub fn config_path() -> PathBuf {
    app_dir_with_env(
        std::env::var("XDG_CONFIG_HOME").ok(),
        dirs::home_dir(),
        ".config",
    )
    .join("config.json")
}

/// Returns the path to the default log file.
pub fn log_path() -> PathBuf {
    app_dir_with_env(
        std::env::var("XDG_DATA_HOME").ok(),
        dirs::home_dir(),
        ".local/share",
    )
    .join("maven-versions.log")
}

fn app_dir_with_env(xdg_home: Option<String>, home_dir: Option<PathBuf>, fallback: &str) -> PathBuf {
    let base = xdg_home
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(fallback)))
        .unwrap_or_else(|| PathBuf::from("."));

    base.join(APP_NAME)
}
