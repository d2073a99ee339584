//! Bagrec Core - Backend logic for Smart Bag Recorder
//!
//! This crate contains all business logic with zero UI dependencies:
//! building `rosbag record` command lines from a configuration snapshot,
//! supervising the recorder subprocess, and saving/loading command-line
//! profiles. It can be used by the GUI application or a CLI tool.

pub mod command;
pub mod config;
pub mod logging;
pub mod models;
pub mod profile;
pub mod session;
pub mod topics;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_returns_value() {
        assert!(!version().is_empty());
    }
}
