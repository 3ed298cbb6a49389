//! Configuration loader
//!
//! Loads Go.Data connection settings from environment variables or files.
//!
//! ## Loading Strategy
//! 1. Loads a `.env` file into the process environment if one exists
//! 2. Attempts to load from environment variables
//! 3. If incomplete, falls back to loading from file
//! 4. Probes multiple paths for config files (JSON or TOML)
//!
//! ## Environment Variables
//! - `GODATA_API_URL`: API root, e.g. `https://godata.example.org/api`
//! - `GODATA_EMAIL`: login email
//! - `GODATA_PASSWORD`: login password
//! - `GODATA_TIMEOUT_SECS`: optional request timeout in seconds
//!
//! ## File Locations
//! `godata.{json,toml}` then `config.{json,toml}` in the current working
//! directory, its parent and grandparent, then next to the executable.

use std::path::{Path, PathBuf};

use godata_domain::{GoDataConfig, GoDataError, Result};
use url::Url;

use crate::errors::InfraError;

const FILE_STEMS: [&str; 2] = ["godata", "config"];
const EXTENSIONS: [&str; 2] = ["json", "toml"];

/// Load configuration with automatic fallback strategy.
///
/// # Errors
/// Returns `GoDataError::Config` if neither source yields a valid
/// configuration.
pub fn load() -> Result<GoDataConfig> {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env file"),
        Err(e) => tracing::debug!(error = %e, "No .env file loaded"),
    }

    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables.
///
/// # Errors
/// Returns `GoDataError::Config` if a required variable is missing or a
/// value is invalid.
pub fn load_from_env() -> Result<GoDataConfig> {
    let mut config = GoDataConfig::new(
        env_var("GODATA_API_URL")?,
        env_var("GODATA_EMAIL")?,
        env_var("GODATA_PASSWORD")?,
    );

    if let Ok(raw) = std::env::var("GODATA_TIMEOUT_SECS") {
        config.timeout_secs = raw
            .parse::<u64>()
            .map_err(|e| GoDataError::Config(format!("Invalid GODATA_TIMEOUT_SECS: {e}")))?;
    }

    validate(&config)?;
    Ok(config)
}

/// Load configuration from a file.
///
/// If `path` is `None`, probes the standard locations.
///
/// # Errors
/// Returns `GoDataError::Config` if the file is missing, cannot be parsed,
/// or fails validation.
pub fn load_from_file(path: Option<PathBuf>) -> Result<GoDataConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(GoDataError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            GoDataError::Config("No config file found in any of the standard locations".into())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path).map_err(InfraError::from)?;
    let config = parse_config(&contents, &config_path)?;
    validate(&config)?;
    Ok(config)
}

/// Check structural rules and that `api_url` is an absolute http(s) URL.
///
/// # Errors
/// Returns `GoDataError::Config` describing the first problem found.
pub fn validate(config: &GoDataConfig) -> Result<()> {
    config.validate()?;

    let url = Url::parse(&config.api_url)
        .map_err(|e| GoDataError::Config(format!("Invalid api_url '{}': {e}", config.api_url)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(GoDataError::Config(format!(
            "api_url must use http or https, got '{}'",
            url.scheme()
        )));
    }
    Ok(())
}

fn parse_config(contents: &str, path: &Path) -> Result<GoDataConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| GoDataError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| GoDataError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(GoDataError::Config(format!("Unsupported config format: {extension}"))),
    }
}

fn candidates_in(dir: &Path) -> impl Iterator<Item = PathBuf> + '_ {
    ["", "..", "../.."].into_iter().flat_map(move |up| {
        FILE_STEMS.into_iter().flat_map(move |stem| {
            EXTENSIONS.into_iter().map(move |ext| dir.join(up).join(format!("{stem}.{ext}")))
        })
    })
}

/// Probe the standard locations for a configuration file.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd);
    }
    if let Some(exe_dir) =
        std::env::current_exe().ok().and_then(|p| p.parent().map(Path::to_path_buf))
    {
        roots.push(exe_dir);
    }

    let found = roots.iter().flat_map(|root| candidates_in(root)).find(|path| path.exists());
    found
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| GoDataError::Config(format!("Missing required environment variable: {key}")))
}
