//! Configuration file loading with precedence handling.

use crate::model::filter::FilterState;
use crate::state::catalog_state::CatalogSettings;
use crate::state::pagination::{PageSize, ALLOWED_PAGE_SIZES};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming an alternate config file.
pub const CONFIG_PATH_ENV: &str = "PLANT_CATALOG_CONFIG";

/// Environment variable overriding `api_base_url`.
pub const API_URL_ENV: &str = "PLANT_CATALOG_API_URL";

/// Environment variable overriding `search_debounce_ms`.
pub const DEBOUNCE_MS_ENV: &str = "PLANT_CATALOG_DEBOUNCE_MS";

const DEFAULT_API_BASE_URL: &str = "http://localhost:5001";
const DEFAULT_DEBOUNCE_MS: u64 = 500;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A setting parsed but is outside its allowed range.
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue {
        /// Config key or environment variable name.
        key: String,
        /// Why the value was rejected.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/plant-catalog/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Catalog server origin, e.g. `http://localhost:5001`.
    #[serde(default)]
    pub api_base_url: Option<String>,

    /// Quiet period for search keystrokes, in milliseconds.
    #[serde(default)]
    pub search_debounce_ms: Option<u64>,

    /// Initial page size. Must be one of 12, 24, 48, 96.
    #[serde(default)]
    pub default_page_size: Option<u32>,

    /// End-to-end timeout for each HTTP request, in seconds.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Catalog server origin.
    pub api_base_url: String,
    /// Search debounce delay.
    pub search_debounce: Duration,
    /// Initial page size.
    pub page_size: PageSize,
    /// HTTP request timeout.
    pub request_timeout: Duration,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            search_debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            page_size: PageSize::default(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Catalog core settings, seeded with `initial_filters`.
    pub fn to_settings(&self, initial_filters: FilterState) -> CatalogSettings {
        CatalogSettings {
            search_debounce: self.search_debounce,
            page_size: self.page_size,
            initial_filters,
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/plant-catalog/plant-catalog.log` on Linux,
/// or the platform state directory elsewhere.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("plant-catalog").join("plant-catalog.log")
    } else {
        PathBuf::from("plant-catalog.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/plant-catalog/config.toml` on Linux, appropriate path on
/// other platforms. Returns `None` if the config directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("plant-catalog").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `PLANT_CATALOG_CONFIG` environment variable
/// 3. Default path `~/.config/plant-catalog/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_PATH_ENV) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// # Errors
///
/// `InvalidValue` when `default_page_size` is not an allowed size.
pub fn merge_config(config_file: Option<ConfigFile>) -> Result<ResolvedConfig, ConfigError> {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return Ok(defaults);
    };

    let page_size = match config.default_page_size {
        Some(n) => PageSize::new(n).ok_or_else(|| ConfigError::InvalidValue {
            key: "default_page_size".to_string(),
            reason: format!("{n} is not one of {ALLOWED_PAGE_SIZES:?}"),
        })?,
        None => defaults.page_size,
    };

    Ok(ResolvedConfig {
        api_base_url: config.api_base_url.unwrap_or(defaults.api_base_url),
        search_debounce: config
            .search_debounce_ms
            .map(Duration::from_millis)
            .unwrap_or(defaults.search_debounce),
        page_size,
        request_timeout: config
            .request_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    })
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `PLANT_CATALOG_API_URL`: Override server origin
/// - `PLANT_CATALOG_DEBOUNCE_MS`: Override search debounce
///
/// # Errors
///
/// `InvalidValue` when the debounce variable is not a whole number.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> Result<ResolvedConfig, ConfigError> {
    if let Ok(url) = std::env::var(API_URL_ENV) {
        config.api_base_url = url;
    }

    if let Ok(raw) = std::env::var(DEBOUNCE_MS_ENV) {
        let ms: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: DEBOUNCE_MS_ENV.to_string(),
            reason: format!("expected milliseconds, got {raw:?}"),
        })?;
        config.search_debounce = Duration::from_millis(ms);
    }

    Ok(config)
}

/// Apply CLI argument overrides to resolved config.
///
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    api_url_override: Option<String>,
    debounce_ms_override: Option<u64>,
    page_size_override: Option<PageSize>,
) -> ResolvedConfig {
    if let Some(url) = api_url_override {
        config.api_base_url = url;
    }

    if let Some(ms) = debounce_ms_override {
        config.search_debounce = Duration::from_millis(ms);
    }

    if let Some(size) = page_size_override {
        config.page_size = size;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
