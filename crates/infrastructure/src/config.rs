//! Runner configuration loading.
//!
//! Layers, lowest to highest: built-in defaults, a YAML/JSON file, then
//! `GRIDCHECK_*` environment variables. CLI flags are applied by the binary.

use std::path::Path;

use gridcheck_domain::{Credentials, LogOptions, RunnerConfig};
use thiserror::Error;

use crate::serialization::{SerializationError, read_document};

/// Overrides the grid base URL.
pub const ENV_BASE_URL: &str = "GRIDCHECK_BASE_URL";
/// Overrides the Basic-auth username.
pub const ENV_USERNAME: &str = "GRIDCHECK_USERNAME";
/// Overrides the Basic-auth password.
pub const ENV_PASSWORD: &str = "GRIDCHECK_PASSWORD";
/// Overrides the default timeout, in milliseconds.
pub const ENV_TIMEOUT_MS: &str = "GRIDCHECK_TIMEOUT_MS";
/// Overrides the expected fleet size.
pub const ENV_FLEET_SIZE: &str = "GRIDCHECK_FLEET_SIZE";
/// Overrides the log flags (`uri,status,body`, `all`, `none`).
pub const ENV_LOG: &str = "GRIDCHECK_LOG";

/// Errors raised while assembling the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read or parsed.
    #[error("config file: {0}")]
    File(#[from] SerializationError),

    /// An environment variable holds an unusable value.
    #[error("invalid value for {var}: {message}")]
    InvalidEnv {
        /// Variable name.
        var: &'static str,
        /// What was wrong with it.
        message: String,
    },
}

/// Loads the configuration from an optional file plus the process environment.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if an
/// environment override is malformed.
pub async fn load_config(path: Option<&Path>) -> Result<RunnerConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config file");
            read_document(path).await?
        }
        None => RunnerConfig::default(),
    };
    apply_env(&mut config, |var| std::env::var(var).ok())?;
    Ok(config)
}

/// Applies `GRIDCHECK_*` overrides read through `lookup`.
///
/// A username or password override alone keeps the other half of the
/// configured credentials.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnv` for non-numeric timeouts or fleet sizes
/// and unknown log flags.
pub fn apply_env<F>(config: &mut RunnerConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(base_url) = lookup(ENV_BASE_URL) {
        config.base_url = base_url;
    }

    let username = lookup(ENV_USERNAME);
    let password = lookup(ENV_PASSWORD);
    if username.is_some() || password.is_some() {
        let current = config.credentials.take();
        let (old_user, old_pass) =
            current.map_or_else(Default::default, |c| (c.username, c.password));
        config.credentials = Some(Credentials::new(
            username.unwrap_or(old_user),
            password.unwrap_or(old_pass),
        ));
    }

    if let Some(raw) = lookup(ENV_TIMEOUT_MS) {
        config.timeout_ms = parse_number(ENV_TIMEOUT_MS, &raw)?;
    }
    if let Some(raw) = lookup(ENV_FLEET_SIZE) {
        config.fleet_size = parse_number(ENV_FLEET_SIZE, &raw)?;
    }
    if let Some(raw) = lookup(ENV_LOG) {
        config.log = raw
            .parse::<LogOptions>()
            .map_err(|e| ConfigError::InvalidEnv {
                var: ENV_LOG,
                message: e.to_string(),
            })?;
    }

    Ok(())
}

fn parse_number(var: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim().parse().map_err(|e| ConfigError::InvalidEnv {
        var,
        message: format!("'{raw}': {e}"),
    })
}
