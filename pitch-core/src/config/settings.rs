//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.
//! Each section can be updated independently for atomic section-level updates.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::command::STANDARD_SAMPLE_RATE;
use crate::logging::LogLevel;
use crate::APP_NAME;

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Where the bundled tools are extracted.
    #[serde(default)]
    pub tools: ToolSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,

    /// Transcode settings.
    #[serde(default)]
    pub processing: ProcessingSettings,
}

/// Tool extraction location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSettings {
    /// Directory name under the user config directory.
    #[serde(default = "default_app_dir_name")]
    pub app_dir_name: String,

    /// Explicit extraction directory. Empty means the user config directory.
    #[serde(default)]
    pub tools_dir: String,
}

fn default_app_dir_name() -> String {
    APP_NAME.to_string()
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            app_dir_name: default_app_dir_name(),
            tools_dir: String::new(),
        }
    }
}

impl ToolSettings {
    /// Explicit extraction directory, if one is configured.
    pub fn tools_dir(&self) -> Option<PathBuf> {
        if self.tools_dir.trim().is_empty() {
            None
        } else {
            Some(PathBuf::from(&self.tools_dir))
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Default level when `RUST_LOG` is not set.
    #[serde(default)]
    pub level: LogLevel,
}

/// Transcode configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingSettings {
    /// Nominal sample rate for the tempo-changing (resample) shift.
    #[serde(default = "default_resample_rate")]
    pub resample_rate: u32,
}

fn default_resample_rate() -> u32 {
    STANDARD_SAMPLE_RATE
}

impl Default for ProcessingSettings {
    fn default() -> Self {
        Self {
            resample_rate: default_resample_rate(),
        }
    }
}

/// Config sections for atomic updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSection {
    Tools,
    Logging,
    Processing,
}

impl ConfigSection {
    /// All sections, in file order.
    pub const ALL: [ConfigSection; 3] = [
        ConfigSection::Tools,
        ConfigSection::Logging,
        ConfigSection::Processing,
    ];

    /// Get the TOML table name for this section.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConfigSection::Tools => "tools",
            ConfigSection::Logging => "logging",
            ConfigSection::Processing => "processing",
        }
    }

    /// Comment written above the section.
    pub fn description(&self) -> &'static str {
        match self {
            ConfigSection::Tools => "Bundled ffmpeg/ffprobe extraction",
            ConfigSection::Logging => "Logging configuration",
            ConfigSection::Processing => "Pitch shift processing",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_serializes() {
        let settings = Settings::default();
        let toml = toml::to_string_pretty(&settings).unwrap();
        assert!(toml.contains("[tools]"));
        assert!(toml.contains("[processing]"));
        assert!(toml.contains("resample_rate = 44100"));
    }

    #[test]
    fn missing_fields_use_defaults() {
        let minimal = "[processing]\nresample_rate = 48000";
        let parsed: Settings = toml::from_str(minimal).unwrap();
        assert_eq!(parsed.processing.resample_rate, 48000);
        assert_eq!(parsed.tools.app_dir_name, APP_NAME);
        assert_eq!(parsed.logging.level, LogLevel::Info);
    }

    #[test]
    fn empty_tools_dir_means_default_location() {
        let mut tools = ToolSettings::default();
        assert_eq!(tools.tools_dir(), None);

        tools.tools_dir = "/opt/pitch".to_string();
        assert_eq!(tools.tools_dir(), Some(PathBuf::from("/opt/pitch")));
    }
}
