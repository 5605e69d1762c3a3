//! Configuration settings for essay-timer.
//!
//! Settings are loaded from `~/.essay-timer/config.yaml`.

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::core::OverrunStyle;
use crate::error::EssayError;
use crate::session::TaskCatalog;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Timer display settings.
    pub display: DisplayConfig,
    /// Task types offered for new sessions; the first is the default.
    pub catalog: TaskCatalog,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    /// Color output setting.
    #[serde(default = "default_color")]
    pub color: ColorSetting,
}

/// Color output setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

/// Timer display settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayConfig {
    /// How an overdue countdown is shown.
    #[serde(default)]
    pub overrun: OverrunStyle,
    /// Countdown refresh interval in the TUI, in milliseconds.
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

// Default value functions for serde
const fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

const fn default_color() -> ColorSetting {
    ColorSetting::Auto
}

const fn default_tick_rate_ms() -> u64 {
    1000
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
            color: default_color(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            overrun: OverrunStyle::default(),
            tick_rate_ms: default_tick_rate_ms(),
        }
    }
}

impl Config {
    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, EssayError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            EssayError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        let config: Self = serde_yaml::from_str(&contents).map_err(|e| {
            EssayError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })?;

        tracing::debug!(
            path = %path.display(),
            task_types = config.catalog.len(),
            "loaded config"
        );
        Ok(config)
    }

    /// Load configuration, falling back to defaults if the file is broken.
    ///
    /// Used when starting the TUI.
    #[must_use]
    pub fn load_or_default(path: &std::path::Path) -> Self {
        Self::load_from_path(path).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "ignoring unreadable config");
            Self::default()
        })
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), EssayError> {
        let contents = serde_yaml::to_string(self)
            .map_err(|e| EssayError::Config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, contents).map_err(|e| {
            EssayError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }
}
