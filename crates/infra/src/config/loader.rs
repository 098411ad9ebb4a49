//! Configuration loader
//!
//! ## Loading Strategy
//! 1. `.env` in the working directory is applied to the process environment
//! 2. If `KEYSTONE_DB_PATH` is set, configuration comes from the environment
//! 3. Otherwise the first config file found by [`probe_config_paths`]
//! 4. Otherwise built-in defaults
//!
//! ## Environment Variables
//! - `KEYSTONE_DB_PATH`: Database file path (selects environment loading)
//! - `KEYSTONE_DB_POOL_SIZE`: Connection pool size
//! - `KEYSTONE_HOST`: Listen address
//! - `KEYSTONE_PORT`: Listen port
//! - `KEYSTONE_LOG_LEVEL`: Default log filter (`RUST_LOG` still wins)
//! - `KEYSTONE_LOG_JSON`: Emit JSON logs (true/false)
//!
//! ## File Locations
//! `config.{json,toml}` and `keystone.{json,toml}` in the working directory
//! and its parent, then next to the executable.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use keystone_domain::{Config, CrmError, Result};

const ENV_DB_PATH: &str = "KEYSTONE_DB_PATH";
const ENV_DB_POOL_SIZE: &str = "KEYSTONE_DB_POOL_SIZE";
const ENV_HOST: &str = "KEYSTONE_HOST";
const ENV_PORT: &str = "KEYSTONE_PORT";
const ENV_LOG_LEVEL: &str = "KEYSTONE_LOG_LEVEL";
const ENV_LOG_JSON: &str = "KEYSTONE_LOG_JSON";

const CONFIG_FILE_NAMES: [&str; 4] =
    ["config.json", "config.toml", "keystone.json", "keystone.toml"];

/// Load configuration with the fallback strategy described above.
///
/// # Errors
/// Returns `CrmError::Config` when an environment value or the discovered
/// file is invalid. A missing file is not an error.
pub fn load() -> Result<Config> {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "applied .env file"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "ignoring unreadable .env file"),
    }

    if std::env::var_os(ENV_DB_PATH).is_some() {
        let config = load_from_env()?;
        tracing::info!("Configuration loaded from environment variables");
        return Ok(config);
    }

    match probe_config_paths() {
        Some(path) => load_from_file(Some(path)),
        None => {
            tracing::info!("No configuration found, using defaults");
            Ok(Config::default())
        }
    }
}

/// Load configuration from environment variables.
///
/// `KEYSTONE_DB_PATH` is required; every other variable falls back to its
/// default.
///
/// # Errors
/// Returns `CrmError::Config` if the path is missing or a value does not
/// parse.
pub fn load_from_env() -> Result<Config> {
    let mut config = Config::default();

    config.database.path = env_var(ENV_DB_PATH)?;
    if let Some(pool_size) = env_parse::<u32>(ENV_DB_POOL_SIZE, "pool size")? {
        config.database.pool_size = pool_size;
    }
    if let Ok(host) = std::env::var(ENV_HOST) {
        config.server.host = host;
    }
    if let Some(port) = env_parse::<u16>(ENV_PORT, "port")? {
        config.server.port = port;
    }
    if let Ok(level) = std::env::var(ENV_LOG_LEVEL) {
        config.logging.level = level;
    }
    config.logging.json = env_bool(ENV_LOG_JSON, config.logging.json);

    Ok(config)
}

/// Load configuration from a file.
///
/// If `path` is `None`, probes the standard locations. Missing sections
/// and fields take their defaults.
///
/// # Errors
/// Returns `CrmError::Config` if the file is missing, unreadable or
/// malformed.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(CrmError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            CrmError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| CrmError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration, picking the format from the file extension.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| CrmError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| CrmError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(CrmError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Find the first existing config file.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd.join(".."));
        dirs.insert(0, cwd);
    }
    if let Some(exe_dir) = std::env::current_exe().ok().and_then(|p| p.parent().map(Path::to_path_buf))
    {
        dirs.push(exe_dir);
    }

    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.is_file())
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| CrmError::Config(format!("Missing required environment variable: {key}")))
}

/// Parse an optional variable; unset yields `None`.
fn env_parse<T>(key: &str, what: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| CrmError::Config(format!("Invalid {what} in {key}: {e}"))),
        Err(_) => Ok(None),
    }
}

/// Accepts `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive).
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
