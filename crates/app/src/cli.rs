//! Command line interface.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use gridcheck_application::HttpClientError;
use gridcheck_domain::{LogFlagError, LogOptions, RunnerConfig, Scenario, SuiteReport};
use gridcheck_infrastructure::{
    ConfigError, ReqwestHttpClient, SerializationError, SuiteRunner, grid_scenarios,
    load_config, load_scenarios, to_json_stable,
};
use thiserror::Error;

/// Runs request-assertion scenarios against a Selenoid grid.
#[derive(Parser, Debug)]
#[command(name = "gridcheck")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    GRIDCHECK_BASE_URL      Grid base URL (default: https://selenoid.autotests.cloud)
    GRIDCHECK_USERNAME      Basic auth username (default: user1)
    GRIDCHECK_PASSWORD      Basic auth password (default: 1234)
    GRIDCHECK_TIMEOUT_MS    Request timeout in milliseconds (default: 30000)
    GRIDCHECK_FLEET_SIZE    Expected total sessions (default: 20)
    GRIDCHECK_LOG           Exchange logging: uri,status,body | all | none
    RUST_LOG                Log filter (default: info)
"#)]
pub struct Cli {
    /// YAML or JSON config file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Scenario file to run instead of the built-in grid checks
    #[arg(long, value_name = "FILE")]
    pub scenarios: Option<PathBuf>,

    /// Grid base URL
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Only run scenarios whose name contains TEXT
    #[arg(long, value_name = "TEXT")]
    pub filter: Option<String>,

    /// Request timeout in milliseconds
    #[arg(long, value_name = "N")]
    pub timeout_ms: Option<u64>,

    /// Exchange logging: uri,status,body | all | none
    #[arg(long, value_name = "FLAGS")]
    pub log: Option<String>,

    /// Log filter, overrides RUST_LOG
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Print the selected scenario names and exit
    #[arg(long)]
    pub list: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Errors that stop the run before any scenario executes.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be assembled.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Scenario file could not be loaded.
    #[error("scenarios: {0}")]
    Scenarios(SerializationError),

    /// Report could not be rendered.
    #[error("report: {0}")]
    Report(SerializationError),

    /// `--log` holds an unknown flag.
    #[error(transparent)]
    LogFlags(#[from] LogFlagError),

    /// HTTP client could not be built.
    #[error("http client: {0}")]
    Client(#[from] HttpClientError),
}

impl Cli {
    /// Applies the CLI flags on top of a loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `--log` contains an unknown flag.
    pub fn apply(&self, config: &mut RunnerConfig) -> Result<(), CliError> {
        if let Some(base_url) = &self.base_url {
            config.base_url.clone_from(base_url);
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.timeout_ms = timeout_ms;
        }
        if let Some(flags) = &self.log {
            config.log = flags.parse::<LogOptions>()?;
        }
        Ok(())
    }

    /// Builds the final configuration: defaults, file, environment, flags.
    ///
    /// # Errors
    ///
    /// Returns an error if any layer is malformed.
    pub async fn resolve_config(&self) -> Result<RunnerConfig, CliError> {
        let mut config = load_config(self.config.as_deref()).await?;
        self.apply(&mut config)?;
        Ok(config)
    }

    /// Returns the scenarios to run: the scenario file if given, the built-in
    /// grid checks otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the scenario file cannot be loaded.
    pub async fn scenarios(&self, config: &RunnerConfig) -> Result<Vec<Scenario>, CliError> {
        match &self.scenarios {
            Some(path) => load_scenarios(path).await.map_err(CliError::Scenarios),
            None => Ok(grid_scenarios(config)),
        }
    }
}

/// Runs the CLI and writes the output to stdout.
///
/// Returns true when every selected scenario passed.
///
/// # Errors
///
/// Returns an error if configuration, scenarios or the client cannot be set up.
pub async fn run(cli: &Cli) -> Result<bool, CliError> {
    let config = cli.resolve_config().await?;
    let scenarios = cli.scenarios(&config).await?;

    let client = Arc::new(ReqwestHttpClient::new()?);
    let mut runner = SuiteRunner::new(client, &config);
    if let Some(filter) = &cli.filter {
        runner = runner.with_filter(filter.clone());
    }

    if cli.list {
        for scenario in scenarios.iter().filter(|s| runner.selects(s)) {
            println!("{}", scenario.name);
        }
        return Ok(true);
    }

    tracing::info!(
        base_url = %config.base_url,
        timeout = ?Duration::from_millis(config.timeout_ms),
        scenarios = scenarios.len(),
        "starting run"
    );
    let report = runner.run(&scenarios).await;

    if cli.json {
        print!("{}", to_json_stable(&report).map_err(CliError::Report)?);
    } else {
        print!("{}", render(&report));
    }
    Ok(report.all_passed())
}

/// Formats a report for the terminal.
#[must_use]
pub fn render(report: &SuiteReport) -> String {
    let mut out = String::new();
    for scenario in &report.scenarios {
        let status = scenario
            .status
            .map_or_else(|| "-".to_string(), |s| s.to_string());
        match &scenario.failure {
            None => out.push_str(&format!(
                "PASS  {} (status {status}, {} assertions, {}ms)\n",
                scenario.name, scenario.assertions_passed, scenario.duration_ms
            )),
            Some(failure) => out.push_str(&format!(
                "FAIL  {} (status {status}) [{}] {}\n",
                scenario.name, failure.kind, failure.message
            )),
        }
    }
    out.push_str(&format!(
        "\n{} scenarios: {} passed, {} failed ({}ms)\n",
        report.total, report.passed, report.failed, report.duration_ms
    ));
    out
}
