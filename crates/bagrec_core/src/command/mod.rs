//! Recorder command-line construction.

mod builder;

pub use builder::{RecordCommandBuilder, DEFAULT_PROGRAM, RECORD_SUBCOMMAND};
