//! Profile persistence: saved, reloadable recording command lines.
//!
//! A profile is one line of whitespace-separated tokens, exactly the
//! command the builder produced. Loading re-validates the line before it
//! may be executed: the expected program invocation must be present and
//! none of the shell metacharacters `;`, `|`, `&` may appear anywhere.
//! The check is a deliberate conservative substring denylist, not shell
//! parsing; it guards against profile files smuggling in pipelines.

use std::fs;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::command::RECORD_SUBCOMMAND;
use crate::models::RecordCommand;

/// File name offered by default when saving a profile.
pub const DEFAULT_PROFILE_FILENAME: &str = "default.profile";

/// Characters that reject a profile line outright, wherever they appear.
const FORBIDDEN_CHARS: [char; 3] = [';', '|', '&'];

/// Errors from profile operations.
///
/// The validation variants are "rejections": the caller logs them and
/// treats the load as a no-op rather than an alarm.
#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("failed to read profile {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write profile {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("profile {0} is empty")]
    Empty(PathBuf),

    #[error("profile does not contain the expected '{expected}' invocation")]
    MissingPrefix { expected: String },

    #[error("profile contains the forbidden character '{0}'")]
    ForbiddenCharacter(char),
}

impl ProfileError {
    /// True for load-time validation failures ("not a profile").
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            ProfileError::Empty(_)
                | ProfileError::MissingPrefix { .. }
                | ProfileError::ForbiddenCharacter(_)
        )
    }
}

/// Result type for profile operations.
pub type ProfileResult<T> = Result<T, ProfileError>;

/// Per-user directory where profiles live by default.
pub fn default_profile_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bagrec")
}

/// Serialize a built command to a single-line profile file.
///
/// The parent directory is created if absent; an existing file is
/// overwritten.
pub fn save_profile(command: &RecordCommand, path: &Path) -> ProfileResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ProfileError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }

    fs::write(path, command.to_line()).map_err(|source| ProfileError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!("saved profile: {}", path.display());
    Ok(())
}

/// Validate a profile line against the safety policy.
pub fn validate_profile_line(line: &str, program: &str) -> ProfileResult<()> {
    let expected = format!("{program} {RECORD_SUBCOMMAND}");
    if !line.contains(&expected) {
        return Err(ProfileError::MissingPrefix { expected });
    }

    for ch in FORBIDDEN_CHARS {
        if line.contains(ch) {
            return Err(ProfileError::ForbiddenCharacter(ch));
        }
    }

    Ok(())
}

/// Read the first line of a profile file and validate it.
///
/// Only the first line is considered; anything after it is ignored.
pub fn load_profile(path: &Path, program: &str) -> ProfileResult<RecordCommand> {
    let file = fs::File::open(path).map_err(|source| ProfileError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut line = String::new();
    BufReader::new(file)
        .read_line(&mut line)
        .map_err(|source| ProfileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    let line = line.trim_end_matches(['\r', '\n']);

    validate_profile_line(line, program)?;

    let tokens: Vec<String> = line.split_whitespace().map(str::to_string).collect();
    let command = RecordCommand::from_tokens(tokens)
        .ok_or_else(|| ProfileError::Empty(path.to_path_buf()))?;

    tracing::info!("loaded profile: {}", path.display());
    Ok(command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{RecordCommandBuilder, DEFAULT_PROGRAM};
    use crate::models::{LimitField, RecordingConfig};
    use tempfile::tempdir;

    fn sample_command() -> RecordCommand {
        let config = RecordingConfig {
            bz2: true,
            max_duration: LimitField::on("30m"),
            topics: vec!["/imu".to_string(), "/odom".to_string()],
            ..RecordingConfig::default()
        };
        RecordCommandBuilder::new(&config, DEFAULT_PROGRAM)
            .build()
            .unwrap()
    }

    #[test]
    fn save_load_round_trip_preserves_tokens() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("profiles").join(DEFAULT_PROFILE_FILENAME);

        let command = sample_command();
        save_profile(&command, &path).unwrap();

        let loaded = load_profile(&path, DEFAULT_PROGRAM).unwrap();
        assert_eq!(loaded, command);
    }

    #[test]
    fn save_creates_missing_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("c.profile");

        save_profile(&sample_command(), &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn only_the_first_line_is_loaded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("two_lines.profile");
        std::fs::write(&path, "rosbag record /imu\nrm -rf /\n").unwrap();

        let loaded = load_profile(&path, DEFAULT_PROGRAM).unwrap();
        assert_eq!(loaded.tokens(), ["rosbag", "record", "/imu"]);
    }

    #[test]
    fn missing_prefix_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.profile");
        std::fs::write(&path, "rostopic echo /imu").unwrap();

        let err = load_profile(&path, DEFAULT_PROGRAM).unwrap_err();
        assert!(err.is_rejection());
        assert!(matches!(err, ProfileError::MissingPrefix { .. }));
    }

    #[test]
    fn shell_metacharacters_are_rejected_anywhere() {
        for line in [
            "rosbag record /imu; rm -rf /",
            "rosbag record /imu | tee /tmp/x",
            "rosbag record /imu & echo done",
            // Quoting does not rescue a denylisted character.
            "rosbag record -O \"a;b.bag\" /imu",
        ] {
            let err = validate_profile_line(line, DEFAULT_PROGRAM).unwrap_err();
            assert!(
                matches!(err, ProfileError::ForbiddenCharacter(_)),
                "line not rejected: {line}"
            );
        }
    }

    #[test]
    fn prefix_check_follows_the_configured_program() {
        assert!(validate_profile_line("myrecorder record /imu", "myrecorder").is_ok());
        assert!(validate_profile_line("rosbag record /imu", "myrecorder").is_err());
    }

    #[test]
    fn empty_file_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.profile");
        std::fs::write(&path, "").unwrap();

        let err = load_profile(&path, DEFAULT_PROGRAM).unwrap_err();
        assert!(err.is_rejection());
    }
}
