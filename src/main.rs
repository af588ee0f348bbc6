use std::path::PathBuf;
use std::sync::Arc;

use clap::{ArgAction, Parser, Subcommand};

use maven_versions::check::{CheckRequest, VersionChecker, render_outcome};
use maven_versions::config::{self, AppConfig, DEFAULT_JSON_URL, DEFAULT_XML_URL};
use maven_versions::fetch::HttpFetcher;
use maven_versions::logging::{self, LogOptions};
use maven_versions::parser::SourceFormat;
use maven_versions::report::{PrefixQuery, PrefixReporter, neoforge_prefix};

#[derive(Parser)]
#[command(name = "maven-versions")]
#[command(version, about = "Report Maven repository versions grouped by prefix")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Version prefix to report (repeatable, reported in order)
    #[arg(short, long = "prefix", global = true)]
    prefixes: Vec<PrefixQuery>,

    /// Also report the NeoForge prefix for this Minecraft version (e.g. 1.20.4)
    #[arg(long, global = true)]
    minecraft: Option<String>,

    /// Maximum matches shown per prefix
    #[arg(long, global = true, value_parser = parse_max_entries)]
    max_entries: Option<usize>,

    /// Configuration file (defaults to $XDG_CONFIG_HOME/maven-versions/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Write logs to a file instead of stderr (defaults to the data directory)
    #[arg(long, global = true, num_args = 0..=1, value_name = "PATH")]
    log_file: Option<Option<PathBuf>>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Query a version listing API returning {"versions": [...]}
    Json {
        #[arg(default_value = DEFAULT_JSON_URL)]
        url: String,
    },
    /// Query a maven-metadata.xml manifest
    Xml {
        #[arg(default_value = DEFAULT_XML_URL)]
        url: String,
    },
}

impl Cli {
    fn log_options(&self) -> LogOptions {
        LogOptions {
            verbosity: self.verbose,
            json: self.log_json,
            file: self
                .log_file
                .as_ref()
                .map(|path| path.clone().unwrap_or_else(config::log_path)),
        }
    }

    fn target(&self) -> (SourceFormat, &str) {
        match &self.command {
            None => (SourceFormat::Json, DEFAULT_JSON_URL),
            Some(Command::Json { url }) => (SourceFormat::Json, url.as_str()),
            Some(Command::Xml { url }) => (SourceFormat::Xml, url.as_str()),
        }
    }

    /// Combine flags with the configuration file; flags win.
    fn request(&self, config: &AppConfig) -> anyhow::Result<(CheckRequest, PrefixReporter)> {
        let (format, url) = self.target();

        let mut prefixes = if self.prefixes.is_empty() {
            config.report.prefix_queries()?
        } else {
            self.prefixes.clone()
        };
        if let Some(minecraft) = &self.minecraft {
            prefixes.push(neoforge_prefix(minecraft)?);
        }

        let max_entries = self
            .max_entries
            .unwrap_or(config.report.max_report_entries);

        Ok((
            CheckRequest {
                url: url.to_string(),
                format,
                prefixes,
            },
            PrefixReporter::new(max_entries),
        ))
    }
}

fn parse_max_entries(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

async fn run(cli: &Cli) -> anyhow::Result<String> {
    let config = AppConfig::load(cli.config.as_deref())?;
    let (request, reporter) = cli.request(&config)?;
    let fetcher = HttpFetcher::new(&config.fetch)?;

    let checker = VersionChecker::new(Arc::new(fetcher), reporter);
    let outcome = checker.check(&request).await;

    Ok(render_outcome(&outcome))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let _guard = match logging::init(&cli.log_options()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("warning: logging disabled: {}", e);
            None
        }
    };

    let output = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(run(&cli))
        .unwrap_or_else(|e| format!("Error: {}", e));

    // Failures are reported on stdout and the process still exits normally
    println!("{}", output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("maven-versions").chain(args.iter().copied()))
            .unwrap()
    }

    fn prefix_strings(request: &CheckRequest) -> Vec<&str> {
        request.prefixes.iter().map(PrefixQuery::as_str).collect()
    }

    #[test]
    fn no_subcommand_queries_default_json_url_with_default_prefixes() {
        let (request, reporter) = parse(&[]).request(&AppConfig::default()).unwrap();

        assert_eq!(request.format, SourceFormat::Json);
        assert_eq!(request.url, DEFAULT_JSON_URL);
        assert_eq!(prefix_strings(&request), vec!["20.", "1.20"]);
        assert_eq!(reporter.max_entries(), 20);
    }

    #[rstest]
    #[case(&["xml"], SourceFormat::Xml, DEFAULT_XML_URL)]
    #[case(&["json"], SourceFormat::Json, DEFAULT_JSON_URL)]
    #[case(&["xml", "https://example.com/maven-metadata.xml"], SourceFormat::Xml, "https://example.com/maven-metadata.xml")]
    #[case(&["json", "https://example.com/versions"], SourceFormat::Json, "https://example.com/versions")]
    fn subcommand_selects_format_and_url(
        #[case] args: &[&str],
        #[case] format: SourceFormat,
        #[case] url: &str,
    ) {
        let (request, _) = parse(args).request(&AppConfig::default()).unwrap();

        assert_eq!(request.format, format);
        assert_eq!(request.url, url);
    }

    #[test]
    fn prefix_flags_replace_configured_prefixes() {
        let cli = parse(&["xml", "-p", "1.21", "--prefix", "21."]);
        let (request, _) = cli.request(&AppConfig::default()).unwrap();

        assert_eq!(prefix_strings(&request), vec!["1.21", "21."]);
    }

    #[test]
    fn minecraft_flag_appends_neoforge_prefix() {
        let cli = parse(&["--minecraft", "1.20.4"]);
        let (request, _) = cli.request(&AppConfig::default()).unwrap();

        assert_eq!(prefix_strings(&request), vec!["20.", "1.20", "20.4."]);
    }

    #[test]
    fn max_entries_flag_overrides_config() {
        let mut config = AppConfig::default();
        config.report.max_report_entries = 7;

        let (_, from_config) = parse(&[]).request(&config).unwrap();
        let (_, from_flag) = parse(&["--max-entries", "3"]).request(&config).unwrap();

        assert_eq!(from_config.max_entries(), 7);
        assert_eq!(from_flag.max_entries(), 3);
    }

    #[rstest]
    #[case(&["--max-entries", "0"])]
    #[case(&["--max-entries", "many"])]
    #[case(&["--prefix", ""])]
    fn invalid_flags_are_rejected(#[case] args: &[&str]) {
        let result =
            Cli::try_parse_from(std::iter::once("maven-versions").chain(args.iter().copied()));

        assert!(result.is_err());
    }

    #[test]
    fn verbosity_and_log_flags_build_log_options() {
        let cli = parse(&["-vv", "--log-json", "--log-file", "/tmp/mv.log"]);

        assert_eq!(
            cli.log_options(),
            LogOptions {
                verbosity: 2,
                json: true,
                file: Some(PathBuf::from("/tmp/mv.log")),
            }
        );
    }

    #[test]
    fn log_file_flag_without_value_uses_data_directory() {
        let cli = parse(&["--log-file"]);

        assert_eq!(cli.log_options().file, Some(config::log_path()));
    }

    #[test]
    fn logs_go_to_stderr_by_default() {
        assert_eq!(parse(&[]).log_options().file, None);
    }
}
