//! Data models for recording configuration, commands, and session status.

mod command;
mod recording;
mod status;

pub use command::RecordCommand;
pub use recording::{LimitField, OutputMode, RecordingConfig};
pub use status::SessionStatus;
