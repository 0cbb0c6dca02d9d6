//! Configuration file loading with precedence handling.

use crate::state::{InputBarOptions, DEFAULT_RIGHT_SLOT_WIDTH, OVERLAY_ROW_HEIGHT};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
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
/// Corresponds to `~/.config/growbar/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Fixed growth bound for the text area, in rows.
    #[serde(default)]
    pub max_height: Option<u16>,

    /// Recompute the growth bound when the terminal is resized.
    #[serde(default)]
    pub auto_update_max_height: Option<bool>,

    /// Keep the text area pinned to the growth bound.
    #[serde(default)]
    pub force_max_height: Option<bool>,

    /// Rows per overlay entry.
    #[serde(default)]
    pub overlay_row_height: Option<u16>,

    /// Columns reserved for the left slot.
    #[serde(default)]
    pub left_slot_width: Option<u16>,

    /// Columns reserved for the right slot.
    #[serde(default)]
    pub right_slot_width: Option<u16>,

    /// Draw without a background fill.
    #[serde(default)]
    pub translucent: Option<bool>,

    /// Duration of animated layout transitions.
    #[serde(default)]
    pub animation_ms: Option<u64>,

    /// Overlay candidates offered after `#`.
    #[serde(default)]
    pub tags: Option<Vec<String>>,

    /// Overlay candidates offered after `@`.
    #[serde(default)]
    pub mentions: Option<Vec<String>>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Fixed growth bound. `None` derives it from the terminal size.
    pub max_height: Option<u16>,
    /// Recompute the growth bound when the terminal is resized.
    pub auto_update_max_height: bool,
    /// Keep the text area pinned to the growth bound.
    pub force_max_height: bool,
    /// Height of one overlay row.
    pub overlay_row_height: u16,
    /// Columns reserved for the left slot.
    pub left_slot_width: u16,
    /// Columns reserved for the right slot.
    pub right_slot_width: u16,
    /// Draw without a background fill.
    pub translucent: bool,
    /// Duration of animated layout transitions, in milliseconds.
    pub animation_ms: u64,
    /// Overlay candidates offered after `#`.
    pub tags: Vec<String>,
    /// Overlay candidates offered after `@`.
    pub mentions: Vec<String>,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            max_height: None,
            auto_update_max_height: true,
            force_max_height: false,
            overlay_row_height: OVERLAY_ROW_HEIGHT,
            left_slot_width: 4,
            right_slot_width: DEFAULT_RIGHT_SLOT_WIDTH,
            translucent: false,
            animation_ms: 150,
            tags: ["# urgent", "# later", "# idea", "# bug", "# release"]
                .map(String::from)
                .to_vec(),
            mentions: ["@ alice", "@ bob", "@ carol"].map(String::from).to_vec(),
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Input bar construction options for this config.
    ///
    /// A fixed `max_height` turns auto-update off.
    pub fn bar_options(&self) -> InputBarOptions {
        InputBarOptions {
            max_height: self.max_height,
            auto_update_max_height: self.auto_update_max_height && self.max_height.is_none(),
            force_max_height: self.force_max_height,
            overlay_row_height: self.overlay_row_height,
            left_slot_width: self.left_slot_width,
            right_slot_width: self.right_slot_width,
            translucent: self.translucent,
            animation_duration: Duration::from_millis(self.animation_ms),
            ..InputBarOptions::default()
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/growbar/growbar.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("growbar").join("growbar.log")
    } else {
        PathBuf::from("growbar.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
/// Returns `Err` if file exists but cannot be read or parsed.
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
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
/// Returns `~/.config/growbar/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("growbar").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (like CLI `--config`)
/// 2. `GROWBAR_CONFIG` environment variable
/// 3. Default path `~/.config/growbar/config.toml`
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

    if let Ok(env_path) = std::env::var("GROWBAR_CONFIG") {
        if env_path.is_empty() {
            return Err(ConfigError::InvalidPath(env_path));
        }
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `GROWBAR_MAX_HEIGHT`: fixed growth bound in rows
/// - `GROWBAR_TRANSLUCENT`: `1`/`true` or `0`/`false`
///
/// Unparseable values are logged and ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(raw) = std::env::var("GROWBAR_MAX_HEIGHT") {
        match raw.parse::<u16>() {
            Ok(max_height) => config.max_height = Some(max_height),
            Err(e) => warn!(value = %raw, error = %e, "Ignoring invalid GROWBAR_MAX_HEIGHT"),
        }
    }

    if let Ok(raw) = std::env::var("GROWBAR_TRANSLUCENT") {
        match raw.to_ascii_lowercase().as_str() {
            "1" | "true" => config.translucent = true,
            "0" | "false" => config.translucent = false,
            _ => warn!(value = %raw, "Ignoring invalid GROWBAR_TRANSLUCENT"),
        }
    }

    config
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
        max_height: config.max_height.or(defaults.max_height),
        auto_update_max_height: config
            .auto_update_max_height
            .unwrap_or(defaults.auto_update_max_height),
        force_max_height: config.force_max_height.unwrap_or(defaults.force_max_height),
        overlay_row_height: config
            .overlay_row_height
            .unwrap_or(defaults.overlay_row_height),
        left_slot_width: config.left_slot_width.unwrap_or(defaults.left_slot_width),
        right_slot_width: config.right_slot_width.unwrap_or(defaults.right_slot_width),
        translucent: config.translucent.unwrap_or(defaults.translucent),
        animation_ms: config.animation_ms.unwrap_or(defaults.animation_ms),
        tags: config.tags.unwrap_or(defaults.tags),
        mentions: config.mentions.unwrap_or(defaults.mentions),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    max_height_override: Option<u16>,
    force_max_override: Option<bool>,
    translucent_override: Option<bool>,
) -> ResolvedConfig {
    if let Some(max_height) = max_height_override {
        config.max_height = Some(max_height);
    }

    if let Some(force_max) = force_max_override {
        config.force_max_height = force_max;
    }

    if let Some(translucent) = translucent_override {
        config.translucent = translucent;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
