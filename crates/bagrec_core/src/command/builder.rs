//! Recorder command options builder.
//!
//! Builds the `<program> record [flags...] [topics...]` token list from a
//! `RecordingConfig` snapshot. Token order is fixed and deterministic:
//! boolean compression/transport flags first, then valued limit flags,
//! then output-mode flags, then the positional topic names.

use crate::models::{OutputMode, RecordCommand, RecordingConfig};

/// Default recorder program.
pub const DEFAULT_PROGRAM: &str = "rosbag";

/// Subcommand that starts a recording.
pub const RECORD_SUBCOMMAND: &str = "record";

// Defaults substituted for enabled-but-blank limit fields. "0" means
// infinite for size, splits, and message limit.
const DEFAULT_SIZE_MB: &str = "0";
const DEFAULT_DURATION: &str = "99h";
const DEFAULT_MAX_SPLITS: &str = "0";
const DEFAULT_BUFFER_MB: &str = "256";
const DEFAULT_CHUNK_KB: &str = "768";
const DEFAULT_MESSAGE_LIMIT: &str = "0";

/// Builder for recorder command-line tokens.
///
/// Generates a list of string tokens ready to spawn, or `None` when the
/// topic set is empty ("nothing to record", a no-op for callers).
pub struct RecordCommandBuilder<'a> {
    config: &'a RecordingConfig,
    program: &'a str,
}

impl<'a> RecordCommandBuilder<'a> {
    /// Create a builder for the given configuration snapshot.
    pub fn new(config: &'a RecordingConfig, program: &'a str) -> Self {
        Self { config, program }
    }

    /// Build the complete command token list.
    ///
    /// Returns `None` when no topics are selected; callers treat this as
    /// "do nothing", never as an error.
    pub fn build(&self) -> Option<RecordCommand> {
        if self.config.topics.is_empty() {
            return None;
        }

        let mut tokens = vec![self.program.to_string(), RECORD_SUBCOMMAND.to_string()];

        self.add_flag_options(&mut tokens);
        self.add_limit_options(&mut tokens);
        self.add_output_options(&mut tokens);

        tokens.extend(self.config.topics.iter().cloned());

        tracing::debug!("built recorder command: {}", tokens.join(" "));

        RecordCommand::from_tokens(tokens)
    }

    /// Boolean flags, in fixed order.
    fn add_flag_options(&self, tokens: &mut Vec<String>) {
        let cfg = self.config;

        if cfg.bz2 {
            tokens.push("-j".to_string());
        }
        if cfg.lz4 {
            tokens.push("--lz4".to_string());
        }
        // Split only takes effect alongside a size or duration limit.
        if cfg.split && (cfg.max_duration.enabled || cfg.max_size_mb.enabled) {
            tokens.push("--split".to_string());
        }
        if cfg.publish_on_start {
            tokens.push("-p".to_string());
        }
        if cfg.suppress_output {
            tokens.push("-q".to_string());
        }
        if cfg.repeat_latched {
            tokens.push("--repeat-latched".to_string());
        }
        if cfg.tcp_nodelay {
            tokens.push("--tcpnodelay".to_string());
        }
        if cfg.udp {
            tokens.push("--udp".to_string());
        }
    }

    /// Valued limit flags. Enabled-but-blank fields take their documented
    /// default; the node filter is skipped instead.
    fn add_limit_options(&self, tokens: &mut Vec<String>) {
        let cfg = self.config;

        if let Some(value) = cfg.max_size_mb.resolve(DEFAULT_SIZE_MB) {
            tokens.push("--size".to_string());
            tokens.push(value);
        }
        if let Some(value) = cfg.max_duration.resolve(DEFAULT_DURATION) {
            tokens.push("--duration".to_string());
            tokens.push(value);
        }
        if let Some(value) = cfg.max_splits.resolve(DEFAULT_MAX_SPLITS) {
            tokens.push("--max-splits".to_string());
            tokens.push(value);
        }
        if let Some(value) = cfg.buffer_size_mb.resolve(DEFAULT_BUFFER_MB) {
            tokens.push("-b".to_string());
            tokens.push(value);
        }
        if let Some(value) = cfg.chunk_size_kb.resolve(DEFAULT_CHUNK_KB) {
            tokens.push("--chunksize".to_string());
            tokens.push(value);
        }
        if let Some(value) = cfg.message_limit.resolve(DEFAULT_MESSAGE_LIMIT) {
            tokens.push("--limit".to_string());
            tokens.push(value);
        }
        if let Some(value) = cfg.node_filter.resolve_or_skip() {
            tokens.push("--node".to_string());
            tokens.push(value);
        }
    }

    /// Output placement tokens. CurrentDirectory emits nothing.
    fn add_output_options(&self, tokens: &mut Vec<String>) {
        match &self.config.output {
            OutputMode::CurrentDirectory => {}
            OutputMode::PrefixPath(prefix) => {
                tokens.push("-o".to_string());
                tokens.push(prefix.clone());
            }
            OutputMode::ExplicitFile(path) => {
                tokens.push("-O".to_string());
                tokens.push(path.to_string_lossy().to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LimitField;
    use std::path::PathBuf;

    fn config_with_topics(topics: &[&str]) -> RecordingConfig {
        RecordingConfig {
            topics: topics.iter().map(|t| t.to_string()).collect(),
            ..RecordingConfig::default()
        }
    }

    fn build(config: &RecordingConfig) -> Option<Vec<String>> {
        RecordCommandBuilder::new(config, DEFAULT_PROGRAM)
            .build()
            .map(|c| c.tokens().to_vec())
    }

    #[test]
    fn empty_topics_build_nothing() {
        let mut config = config_with_topics(&[]);
        config.bz2 = true;
        config.split = true;
        config.max_size_mb = LimitField::on("100");
        config.output = OutputMode::PrefixPath("run".to_string());

        assert!(build(&config).is_none());
    }

    #[test]
    fn bare_config_is_program_subcommand_topics() {
        let config = config_with_topics(&["/imu", "/camera/image_raw"]);
        let tokens = build(&config).unwrap();

        assert_eq!(
            tokens,
            vec!["rosbag", "record", "/imu", "/camera/image_raw"]
        );
    }

    #[test]
    fn topics_keep_given_order_and_come_last() {
        let mut config = config_with_topics(&["/b", "/a", "/c"]);
        config.suppress_output = true;

        let tokens = build(&config).unwrap();
        assert_eq!(tokens[tokens.len() - 3..], ["/b", "/a", "/c"]);
    }

    #[test]
    fn boolean_flags_in_fixed_order() {
        let mut config = config_with_topics(&["/imu"]);
        config.suppress_output = true;
        config.bz2 = true;
        config.lz4 = true;
        config.tcp_nodelay = true;
        config.udp = true;
        config.publish_on_start = true;
        config.repeat_latched = true;

        let tokens = build(&config).unwrap();
        assert_eq!(
            tokens,
            vec![
                "rosbag",
                "record",
                "-j",
                "--lz4",
                "-p",
                "-q",
                "--repeat-latched",
                "--tcpnodelay",
                "--udp",
                "/imu"
            ]
        );
    }

    #[test]
    fn split_requires_a_size_or_duration_limit() {
        let mut config = config_with_topics(&["/imu"]);
        config.split = true;
        assert!(!build(&config).unwrap().contains(&"--split".to_string()));

        config.max_size_mb = LimitField::on("100");
        let tokens = build(&config).unwrap();
        assert!(tokens.contains(&"--split".to_string()));

        config.max_size_mb = LimitField::off();
        config.max_duration = LimitField::on("30m");
        let tokens = build(&config).unwrap();
        assert!(tokens.contains(&"--split".to_string()));
    }

    #[test]
    fn blank_enabled_fields_take_documented_defaults() {
        let mut config = config_with_topics(&["/imu"]);
        config.max_size_mb = LimitField::on("");
        config.max_duration = LimitField::on("");
        config.max_splits = LimitField::on("");
        config.buffer_size_mb = LimitField::on("");
        config.chunk_size_kb = LimitField::on("");
        config.message_limit = LimitField::on("");

        let tokens = build(&config).unwrap();
        assert_eq!(
            tokens,
            vec![
                "rosbag",
                "record",
                "--size",
                "0",
                "--duration",
                "99h",
                "--max-splits",
                "0",
                "-b",
                "256",
                "--chunksize",
                "768",
                "--limit",
                "0",
                "/imu"
            ]
        );
    }

    #[test]
    fn entered_values_pass_through_verbatim() {
        let mut config = config_with_topics(&["/imu"]);
        config.max_size_mb = LimitField::on("2048");
        config.max_duration = LimitField::on("45m");

        let tokens = build(&config).unwrap();
        assert_eq!(
            tokens,
            vec![
                "rosbag", "record", "--size", "2048", "--duration", "45m", "/imu"
            ]
        );
    }

    #[test]
    fn blank_node_filter_is_omitted_not_defaulted() {
        let mut config = config_with_topics(&["/imu"]);
        config.node_filter = LimitField::on("");
        assert!(!build(&config).unwrap().contains(&"--node".to_string()));

        config.node_filter = LimitField::on("/my_node");
        let tokens = build(&config).unwrap();
        assert_eq!(
            tokens,
            vec!["rosbag", "record", "--node", "/my_node", "/imu"]
        );
    }

    #[test]
    fn output_mode_tokens() {
        let mut config = config_with_topics(&["/imu"]);
        assert_eq!(build(&config).unwrap(), vec!["rosbag", "record", "/imu"]);

        config.output = OutputMode::PrefixPath("session_".to_string());
        assert_eq!(
            build(&config).unwrap(),
            vec!["rosbag", "record", "-o", "session_", "/imu"]
        );

        config.output = OutputMode::ExplicitFile(PathBuf::from("./example.bag"));
        assert_eq!(
            build(&config).unwrap(),
            vec!["rosbag", "record", "-O", "./example.bag", "/imu"]
        );
    }

    #[test]
    fn valued_flags_come_before_output_mode() {
        let mut config = config_with_topics(&["/imu"]);
        config.bz2 = true;
        config.message_limit = LimitField::on("500");
        config.output = OutputMode::PrefixPath("run_".to_string());

        let tokens = build(&config).unwrap();
        assert_eq!(
            tokens,
            vec![
                "rosbag", "record", "-j", "--limit", "500", "-o", "run_", "/imu"
            ]
        );
    }

    #[test]
    fn custom_program_token() {
        let config = config_with_topics(&["/imu"]);
        let command = RecordCommandBuilder::new(&config, "ros2-recorder")
            .build()
            .unwrap();
        assert_eq!(command.program(), "ros2-recorder");
    }
}
