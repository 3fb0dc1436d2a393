//! Configuration management for Audio Pitch Changer.
//!
//! This module provides:
//! - TOML-based configuration with logical sections
//! - Atomic file writes (write to temp, then rename)
//! - Section-level updates (only changed section is modified)
//! - Cleanup on load with automatic defaults
//!
//! # Example
//!
//! ```no_run
//! use pitch_core::config::{ConfigManager, ConfigSection};
//!
//! let path = ConfigManager::default_path(pitch_core::APP_NAME).unwrap();
//! let mut config = ConfigManager::new(path);
//! config.load_or_create().unwrap();
//!
//! config.settings_mut().processing.resample_rate = 48000;
//! config.update_section(ConfigSection::Processing).unwrap();
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult, CONFIG_FILE_NAME};
pub use settings::{ConfigSection, LoggingSettings, ProcessingSettings, Settings, ToolSettings};
