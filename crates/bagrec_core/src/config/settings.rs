//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.
//! Each section can be updated independently for atomic section-level
//! updates.

use serde::{Deserialize, Serialize};

use crate::command::DEFAULT_PROGRAM;
use crate::profile::default_profile_dir;
use crate::topics::DEFAULT_TOPIC_TOOL;

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Path-related settings.
    #[serde(default)]
    pub paths: PathSettings,

    /// External recorder tooling.
    #[serde(default)]
    pub recorder: RecorderSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Directories and remembered paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSettings {
    /// Directory where profiles are stored.
    #[serde(default = "default_profile_dir_string")]
    pub profile_dir: String,

    /// Folder for log files.
    #[serde(default = "default_logs_folder")]
    pub logs_folder: String,

    /// Last bag file chosen in the explicit-file save mode.
    #[serde(default = "default_bag_file")]
    pub last_bag_file: String,
}

fn default_profile_dir_string() -> String {
    default_profile_dir().to_string_lossy().to_string()
}

fn default_logs_folder() -> String {
    ".logs".to_string()
}

fn default_bag_file() -> String {
    "./example.bag".to_string()
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            profile_dir: default_profile_dir_string(),
            logs_folder: default_logs_folder(),
            last_bag_file: default_bag_file(),
        }
    }
}

/// Which external tools to drive and how often to poll them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecorderSettings {
    /// Recorder program name.
    #[serde(default = "default_program")]
    pub program: String,

    /// Topic discovery program name.
    #[serde(default = "default_topic_tool")]
    pub topic_tool: String,

    /// Poll cadence for a running recording, in seconds.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

fn default_program() -> String {
    DEFAULT_PROGRAM.to_string()
}

fn default_topic_tool() -> String {
    DEFAULT_TOPIC_TOOL.to_string()
}

fn default_poll_interval() -> u64 {
    1
}

impl Default for RecorderSettings {
    fn default() -> Self {
        Self {
            program: default_program(),
            topic_tool: default_topic_tool(),
            poll_interval_secs: default_poll_interval(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Fallback log level when RUST_LOG is unset.
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

/// Names of config sections for targeted updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigSection {
    Paths,
    Recorder,
    Logging,
}

impl ConfigSection {
    /// Get the TOML table name for this section.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConfigSection::Paths => "paths",
            ConfigSection::Recorder => "recorder",
            ConfigSection::Logging => "logging",
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
        assert!(toml.contains("[paths]"));
        assert!(toml.contains("[recorder]"));
        assert!(toml.contains("profile_dir"));
    }

    #[test]
    fn settings_round_trip() {
        let settings = Settings::default();
        let toml = toml::to_string_pretty(&settings).unwrap();
        let parsed: Settings = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.recorder.program, settings.recorder.program);
        assert_eq!(parsed.paths.profile_dir, settings.paths.profile_dir);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let minimal = "[recorder]\nprogram = \"ros2\"";
        let parsed: Settings = toml::from_str(minimal).unwrap();
        // Custom value preserved
        assert_eq!(parsed.recorder.program, "ros2");
        // Defaults applied for missing
        assert_eq!(parsed.recorder.topic_tool, "rostopic");
        assert_eq!(parsed.recorder.poll_interval_secs, 1);
        assert_eq!(parsed.logging.level, "info");
    }
}
