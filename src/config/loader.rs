//! Configuration file loading with precedence handling.

use crate::layout::GroupingSize;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV: &str = "HEXMARK_CONFIG";

/// Environment variable overriding the grouping size.
pub const GROUPING_ENV: &str = "HEXMARK_GROUPING";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permissions, not a regular file, ...).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML or a value of the wrong shape.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// An environment override holds a value that cannot be used.
    #[error("Invalid value {value:?} for {var}")]
    InvalidEnv {
        /// Variable name.
        var: &'static str,
        /// Value as set.
        value: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/hexmark/config.toml`.
///
/// ```toml
/// grouping_size = 4
/// scroll_lines = 3
/// log_file_path = "/tmp/hexmark.log"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Bytes per group: 1, 2 or 4.
    #[serde(default)]
    pub grouping_size: Option<GroupingSize>,

    /// Lines moved per scroll step.
    #[serde(default)]
    pub scroll_lines: Option<usize>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Grouping size the first file is laid out with.
    pub grouping: GroupingSize,
    /// Lines moved per scroll step (keys and mouse wheel).
    pub scroll_lines: usize,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            grouping: GroupingSize::One,
            scroll_lines: 1,
            log_file_path: default_log_path(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/hexmark/hexmark.log` on Linux, or the platform state
/// directory elsewhere. Falls back to the current directory.
pub fn default_log_path() -> PathBuf {
    match dirs::state_dir() {
        Some(state_dir) => state_dir.join("hexmark").join("hexmark.log"),
        None => PathBuf::from("hexmark.log"),
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

/// Resolve default config file path: `~/.config/hexmark/config.toml` on Linux.
///
/// Returns `None` if the config directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("hexmark").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `HEXMARK_CONFIG` environment variable
/// 3. Default path `~/.config/hexmark/config.toml`
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        return load_config_file(PathBuf::from(env_path));
    }

    match default_config_path() {
        Some(default_path) => load_config_file(default_path),
        None => Ok(None),
    }
}

/// Merge config file into defaults to create resolved config.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        grouping: config.grouping_size.unwrap_or(defaults.grouping),
        scroll_lines: config.scroll_lines.unwrap_or(defaults.scroll_lines),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks `HEXMARK_GROUPING` (one of `1`, `2`, `4`).
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnv` if the variable is set to anything else.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> Result<ResolvedConfig, ConfigError> {
    if let Ok(value) = std::env::var(GROUPING_ENV) {
        config.grouping = parse_grouping(&value).ok_or(ConfigError::InvalidEnv {
            var: GROUPING_ENV,
            value,
        })?;
    }

    Ok(config)
}

fn parse_grouping(value: &str) -> Option<GroupingSize> {
    let n: u8 = value.trim().parse().ok()?;
    GroupingSize::try_from(n).ok()
}

/// Apply CLI argument overrides to resolved config.
///
/// Only flags the user actually passed override anything.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    grouping_override: Option<GroupingSize>,
) -> ResolvedConfig {
    if let Some(grouping) = grouping_override {
        config.grouping = grouping;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
