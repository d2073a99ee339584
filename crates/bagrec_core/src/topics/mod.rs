//! Topic discovery.
//!
//! Asks the discovery tool (`rostopic list` by default) for the currently
//! available topic names. Discovery runs once at UI construction; failures
//! and empty output both yield an empty selectable set, never an error.

use std::process::Command;

/// Default discovery tool.
pub const DEFAULT_TOPIC_TOOL: &str = "rostopic";

/// Runs the external topic discovery tool.
pub struct TopicSource {
    tool: String,
}

impl TopicSource {
    pub fn new(tool: impl Into<String>) -> Self {
        Self { tool: tool.into() }
    }

    /// Fetch the available topic names.
    pub fn fetch(&self) -> Vec<String> {
        let output = match Command::new(&self.tool).arg("list").output() {
            Ok(output) => output,
            Err(err) => {
                tracing::warn!("topic discovery '{}' failed to run: {err}", self.tool);
                return Vec::new();
            }
        };

        if !output.status.success() {
            tracing::warn!(
                "topic discovery '{}' exited with {}",
                self.tool,
                output.status
            );
        }

        parse_topic_list(&String::from_utf8_lossy(&output.stdout))
    }
}

/// One topic name per whitespace-separated token.
pub fn parse_topic_list(stdout: &str) -> Vec<String> {
    stdout.split_whitespace().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_one_name_per_line() {
        let stdout = "/rosout\n/tf\n/camera/image_raw\n";
        assert_eq!(
            parse_topic_list(stdout),
            vec!["/rosout", "/tf", "/camera/image_raw"]
        );
    }

    #[test]
    fn empty_output_is_empty_set() {
        assert!(parse_topic_list("").is_empty());
        assert!(parse_topic_list("\n\n").is_empty());
    }

    #[test]
    fn missing_tool_yields_empty_set() {
        let source = TopicSource::new("/nonexistent/topic-tool");
        assert!(source.fetch().is_empty());
    }

    #[test]
    fn captures_tool_stdout() {
        // `echo list` prints its argument; enough to exercise the capture path.
        let source = TopicSource::new("echo");
        assert_eq!(source.fetch(), vec!["list"]);
    }
}
