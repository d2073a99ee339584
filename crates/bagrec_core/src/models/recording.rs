//! Recording configuration snapshot.
//!
//! A `RecordingConfig` is built fresh from current UI state each time a
//! command is requested; it is never persisted as an object. Saved state
//! lives in profiles (see `crate::profile`) as the finished command line.

use std::path::PathBuf;

/// An optional valued flag: a toggle paired with a free-text value.
///
/// Disabled fields are omitted from the command entirely. Enabled fields
/// with a blank value fall back to a per-flag default supplied by the
/// command builder (the node filter is the exception and is skipped).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LimitField {
    pub enabled: bool,
    pub value: String,
}

impl LimitField {
    /// An enabled field carrying the given text (may be blank).
    pub fn on(value: impl Into<String>) -> Self {
        Self {
            enabled: true,
            value: value.into(),
        }
    }

    /// A disabled field.
    pub fn off() -> Self {
        Self::default()
    }

    /// Resolve to the token value: `None` when disabled, the default when
    /// enabled but blank, otherwise the entered text verbatim.
    pub fn resolve(&self, default: &str) -> Option<String> {
        if !self.enabled {
            return None;
        }
        if self.value.is_empty() {
            Some(default.to_string())
        } else {
            Some(self.value.clone())
        }
    }

    /// Resolve without a default: `None` when disabled or blank.
    ///
    /// Used for the node filter, which is omitted rather than defaulted.
    pub fn resolve_or_skip(&self) -> Option<String> {
        if self.enabled && !self.value.is_empty() {
            Some(self.value.clone())
        } else {
            None
        }
    }
}

/// Where the recorder writes its output bag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Record into the current working directory (no extra tokens).
    #[default]
    CurrentDirectory,
    /// Prepend a prefix to generated bag names (`-o <prefix>`).
    PrefixPath(String),
    /// Record to an explicit file path (`-O <path>`).
    ExplicitFile(PathBuf),
}

/// Immutable snapshot of every recording option the UI exposes.
#[derive(Debug, Clone, Default)]
pub struct RecordingConfig {
    /// `-q`: suppress console output.
    pub suppress_output: bool,
    /// `-j`: BZ2 compression.
    pub bz2: bool,
    /// `--lz4`: LZ4 compression.
    pub lz4: bool,
    /// `--tcpnodelay`: TCP_NODELAY transport hint.
    pub tcp_nodelay: bool,
    /// `--udp`: UDP transport hint.
    pub udp: bool,
    /// `--split`: split the bag when a size or duration limit is reached.
    /// Only takes effect if `max_size_mb` or `max_duration` is enabled.
    pub split: bool,
    /// `-p`: publish a message when the recording begins.
    pub publish_on_start: bool,
    /// `--repeat-latched`: repeat latched messages at the start of each
    /// new bag file.
    pub repeat_latched: bool,

    /// `--size`: maximum bag size in MB.
    pub max_size_mb: LimitField,
    /// `--duration`: maximum duration (seconds, or with `m`/`h` suffix).
    pub max_duration: LimitField,
    /// `--max-splits`: keep at most N bag files.
    pub max_splits: LimitField,
    /// `-b`: internal buffer size in MB.
    pub buffer_size_mb: LimitField,
    /// `--chunksize`: chunk size in KB.
    pub chunk_size_kb: LimitField,
    /// `--limit`: record at most N messages per topic.
    pub message_limit: LimitField,
    /// `--node`: record all topics subscribed to by a specific node.
    /// Skipped entirely when enabled but blank.
    pub node_filter: LimitField,

    /// Output placement.
    pub output: OutputMode,

    /// Selected topic names, in selection order. An empty set means
    /// "nothing to record" and no command is built.
    pub topics: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_field_resolution() {
        assert_eq!(LimitField::off().resolve("0"), None);
        assert_eq!(LimitField::on("").resolve("0"), Some("0".to_string()));
        assert_eq!(LimitField::on("42").resolve("0"), Some("42".to_string()));
    }

    #[test]
    fn limit_field_skip_resolution() {
        assert_eq!(LimitField::off().resolve_or_skip(), None);
        assert_eq!(LimitField::on("").resolve_or_skip(), None);
        assert_eq!(
            LimitField::on("/my_node").resolve_or_skip(),
            Some("/my_node".to_string())
        );
    }
}
