//! Editor configuration module.
//!
//! Handles loading and validating an optional `config.toml`. Nothing in it is
//! required: stock defaults cover every key, and a user file only needs the
//! values it overrides.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [fonts]
//! family = "sans-serif"     # Family used for overlay text
//! dirs = []                 # Extra directories scanned for .ttf/.otf/.ttc
//!
//! [http]
//! user_agent = "image-editor-pro/<version>"
//! timeout_secs = 30         # Per-download timeout
//! ```
//!
//! ## Partial Configuration
//!
//! ```toml
//! # Only add a font directory
//! [fonts]
//! dirs = ["/usr/share/fonts/custom"]
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Editor configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    /// Font lookup for text overlays.
    pub fonts: FontsConfig,
    /// Image download settings.
    pub http: HttpConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FontsConfig {
    /// Generic or concrete family name; falls back to any installed face.
    pub family: String,
    /// Loaded in addition to the system fonts.
    pub dirs: Vec<PathBuf>,
}

impl Default for FontsConfig {
    fn default() -> Self {
        Self {
            family: "sans-serif".to_string(),
            dirs: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HttpConfig {
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("image-editor-pro/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
        }
    }
}

impl EditorConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fonts.family.trim().is_empty() {
            return Err(ConfigError::Validation(
                "fonts.family must not be empty".into(),
            ));
        }
        if self.http.user_agent.trim().is_empty() {
            return Err(ConfigError::Validation(
                "http.user_agent must not be empty".into(),
            ));
        }
        if self.http.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "http.timeout_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(EditorConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load config from an optional file.
///
/// `None` yields the stock defaults. A named file that does not exist is an
/// error: the user asked for it explicitly.
pub fn load_config(path: Option<&Path>) -> Result<EditorConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            let overlay: toml::Value = toml::from_str(&content)?;
            merge_toml(base, overlay)
        }
        None => base,
    };
    let config: EditorConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Image Editor Pro Configuration
# ==============================
#
# All options are optional. Only specify what you want to override.
# Pass this file with `image-editor-pro --config config.toml render ...`.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Fonts used for text overlays and text watermarks
# ---------------------------------------------------------------------------
[fonts]
# Family name requested for all overlay text. Generic names (sans-serif,
# serif, monospace) resolve through the system font configuration. When the
# family is missing, any installed face is used instead.
family = "sans-serif"

# Extra directories scanned for .ttf/.otf/.ttc files, on top of system fonts.
dirs = []

# ---------------------------------------------------------------------------
# Image downloads
# ---------------------------------------------------------------------------
[http]
# Sent with every image request.
user_agent = "image-editor-pro"

# Seconds before a single download is abandoned.
timeout_secs = 30
"##
}
