//! Observable session status.

/// What a recording session reports to the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionStatus {
    /// No recording has been started.
    #[default]
    Idle,
    /// The recorder process is running; `elapsed_secs` counts completed
    /// one-second poll intervals.
    Recording { elapsed_secs: u64 },
    /// The process exited cleanly (code 0) or was stopped by the user.
    Stopped,
    /// The process exited with a nonzero code or died on a signal;
    /// `detail` carries its captured standard-error output.
    Failed { detail: String },
}

impl SessionStatus {
    /// True while the process is believed to be running.
    pub fn is_recording(&self) -> bool {
        matches!(self, SessionStatus::Recording { .. })
    }

    /// True once the session reached `Stopped` or `Failed`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionStatus::Stopped | SessionStatus::Failed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_predicates() {
        assert!(SessionStatus::Recording { elapsed_secs: 3 }.is_recording());
        assert!(!SessionStatus::Idle.is_recording());
        assert!(SessionStatus::Stopped.is_terminal());
        assert!(SessionStatus::Failed { detail: String::new() }.is_terminal());
        assert!(!SessionStatus::Idle.is_terminal());
    }
}
