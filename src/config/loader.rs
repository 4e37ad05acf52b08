//! Configuration file loading with precedence handling.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const ENV_CONFIG: &str = "CCLOG_CONFIG";
/// Environment variable overriding `projects_dir`.
pub const ENV_PROJECTS_DIR: &str = "CCLOG_PROJECTS_DIR";
/// Environment variable overriding `log_file_path`.
pub const ENV_LOG_FILE: &str = "CCLOG_LOG_FILE";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, directory instead of file).
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
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/cclog/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Root directory holding one sub-directory per project.
    #[serde(default)]
    pub projects_dir: Option<PathBuf>,

    /// Print the latest todo list in the summary.
    #[serde(default)]
    pub show_todos: Option<bool>,

    /// Print every dropped line in the summary.
    #[serde(default)]
    pub show_errors: Option<bool>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub log_file_path: PathBuf,
    pub projects_dir: PathBuf,
    pub show_todos: bool,
    pub show_errors: bool,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            log_file_path: default_log_path(),
            projects_dir: default_projects_dir(),
            show_todos: true,
            show_errors: false,
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/cclog/cclog.log` on Linux, or the platform state
/// directory elsewhere. Falls back to the current directory when no state
/// directory exists (macOS, Windows).
pub fn default_log_path() -> PathBuf {
    match dirs::state_dir() {
        Some(state_dir) => state_dir.join("cclog").join("cclog.log"),
        None => PathBuf::from("cclog.log"),
    }
}

/// Resolve the default transcript root, `~/.claude/projects`.
pub fn default_projects_dir() -> PathBuf {
    let claude = match dirs::home_dir() {
        Some(home) => home.join(".claude"),
        None => PathBuf::from(".claude"),
    };
    claude.join("projects")
}

/// Resolve default config file path.
///
/// Returns `~/.config/cclog/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("cclog").join("config.toml"))
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

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `CCLOG_CONFIG` environment variable
/// 3. Default path `~/.config/cclog/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
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

    if let Ok(env_path) = std::env::var(ENV_CONFIG) {
        return load_config_file(PathBuf::from(env_path));
    }

    match default_config_path() {
        Some(default_path) => load_config_file(default_path),
        None => Ok(None),
    }
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        projects_dir: config.projects_dir.unwrap_or(defaults.projects_dir),
        show_todos: config.show_todos.unwrap_or(defaults.show_todos),
        show_errors: config.show_errors.unwrap_or(defaults.show_errors),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `CCLOG_PROJECTS_DIR`: Override projects directory
/// - `CCLOG_LOG_FILE`: Override log file path
///
/// Empty values are ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Some(dir) = non_empty_env(ENV_PROJECTS_DIR) {
        config.projects_dir = PathBuf::from(dir);
    }

    if let Some(path) = non_empty_env(ENV_LOG_FILE) {
        config.log_file_path = PathBuf::from(path);
    }

    config
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

/// CLI flags that take part in config resolution.
///
/// `None` means the flag was not given and the lower layers decide.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub projects_dir: Option<PathBuf>,
    pub show_todos: Option<bool>,
    pub show_errors: Option<bool>,
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, cli: CliOverrides) -> ResolvedConfig {
    if let Some(dir) = cli.projects_dir {
        config.projects_dir = dir;
    }

    if let Some(show_todos) = cli.show_todos {
        config.show_todos = show_todos;
    }

    if let Some(show_errors) = cli.show_errors {
        config.show_errors = show_errors;
    }

    config
}

/// Run the whole precedence chain.
///
/// # Errors
///
/// Returns error if a config file exists but cannot be read or parsed.
pub fn resolve_config(
    config_path: Option<PathBuf>,
    cli: CliOverrides,
) -> Result<ResolvedConfig, ConfigError> {
    let file = load_config_with_precedence(config_path)?;
    let config = apply_env_overrides(merge_config(file));
    Ok(apply_cli_overrides(config, cli))
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
