//! Configuration management for essay-timer.
//!
//! This module handles loading and saving configuration from `~/.essay-timer/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{ColorSetting, Config, DisplayConfig, GeneralConfig};
