//! A built recorder command line.

use std::fmt;

/// An ordered, non-empty list of command-line tokens: program name,
/// subcommand, flags, and positional topic names.
///
/// The "nothing selected" sentinel of the builder is `Option<RecordCommand>`;
/// a `RecordCommand` value always holds at least one token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordCommand {
    tokens: Vec<String>,
}

impl RecordCommand {
    /// Wrap a token list. Returns `None` for an empty list.
    pub fn from_tokens(tokens: Vec<String>) -> Option<Self> {
        if tokens.is_empty() {
            None
        } else {
            Some(Self { tokens })
        }
    }

    /// The full token list.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// The program token (first token).
    pub fn program(&self) -> &str {
        &self.tokens[0]
    }

    /// Serialize as a single space-joined line, the profile format.
    pub fn to_line(&self) -> String {
        self.tokens.join(" ")
    }
}

impl fmt::Display for RecordCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_line())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_token_list_is_none() {
        assert!(RecordCommand::from_tokens(vec![]).is_none());
    }

    #[test]
    fn line_is_space_joined() {
        let cmd = RecordCommand::from_tokens(vec![
            "rosbag".to_string(),
            "record".to_string(),
            "/imu".to_string(),
        ])
        .unwrap();
        assert_eq!(cmd.to_line(), "rosbag record /imu");
        assert_eq!(cmd.program(), "rosbag");
    }
}
