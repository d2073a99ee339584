//! Recording session lifecycle.
//!
//! `RecordingSession` owns at most one recorder process at a time and
//! drives the Idle → Recording → {Stopped, Failed} state machine. The
//! presentation layer calls `poll()` on a one-second cadence and `stop()`
//! on user request; neither ever panics or propagates process I/O errors.

mod process;

use std::io;

use thiserror::Error;

use crate::models::{RecordCommand, SessionStatus};
use process::RecorderProcess;

/// Errors surfaced by session operations.
#[derive(Error, Debug)]
pub enum SessionError {
    /// The recorder executable could not be started.
    #[error("failed to spawn '{program}': {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: io::Error,
    },
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Supervises one external recorder process.
#[derive(Default)]
pub struct RecordingSession {
    process: Option<RecorderProcess>,
    status: SessionStatus,
    elapsed_secs: u64,
}

impl RecordingSession {
    /// A fresh idle session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last observed status.
    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    /// True while a recorder process is believed to be running.
    pub fn is_recording(&self) -> bool {
        self.status.is_recording()
    }

    /// Spawn the recorder with the given command.
    ///
    /// A spawn failure both transitions the session to `Failed` and
    /// returns the error, so callers can report it immediately.
    ///
    /// Starting while already `Recording` is a caller contract violation
    /// (the UI disables the trigger); the previous handle is dropped.
    pub fn start(&mut self, command: &RecordCommand) -> SessionResult<()> {
        if self.is_recording() {
            tracing::warn!("start requested while a recording is active; replacing session");
        }

        tracing::info!("recording command is: {}", command);

        match RecorderProcess::spawn(command) {
            Ok(process) => {
                self.process = Some(process);
                self.elapsed_secs = 0;
                self.status = SessionStatus::Recording { elapsed_secs: 0 };
                Ok(())
            }
            Err(source) => {
                let err = SessionError::SpawnFailed {
                    program: command.program().to_string(),
                    source,
                };
                self.status = SessionStatus::Failed {
                    detail: err.to_string(),
                };
                self.process = None;
                Err(err)
            }
        }
    }

    /// One cooperative poll tick.
    ///
    /// While `Recording`: exit code 0 transitions to `Stopped`, any other
    /// exit (nonzero code or signal death) transitions to `Failed` with
    /// the captured stderr as detail, and a still-running process bumps
    /// the elapsed counter by one. Terminal states are sticky: further
    /// polls return them unchanged and never advance the counter.
    pub fn poll(&mut self) -> SessionStatus {
        if !self.status.is_recording() {
            return self.status.clone();
        }

        let Some(process) = self.process.as_mut() else {
            // Recording without a handle cannot happen through the public
            // API; normalize to Stopped.
            self.status = SessionStatus::Stopped;
            return self.status.clone();
        };

        match process.poll_exit() {
            Some(exit) if exit.code() == Some(0) => {
                tracing::info!("recording has been stopped");
                self.status = SessionStatus::Stopped;
            }
            Some(exit) => {
                let detail = process.read_stderr();
                match exit.code() {
                    Some(code) => {
                        tracing::error!("recorder exited with code {code}: {detail}")
                    }
                    None => tracing::error!("recorder was killed by a signal: {detail}"),
                }
                self.status = SessionStatus::Failed { detail };
            }
            None => {
                self.elapsed_secs += 1;
                self.status = SessionStatus::Recording {
                    elapsed_secs: self.elapsed_secs,
                };
            }
        }

        self.status.clone()
    }

    /// Stop the recording, if one is running.
    ///
    /// Probes liveness before signalling so a stale pid is never
    /// signalled, absorbs every probe/delivery error, and is idempotent:
    /// stopping an already-stopped (or exited) session does nothing. A
    /// `Failed` session keeps its failure detail.
    pub fn stop(&mut self) {
        if !self.status.is_recording() {
            return;
        }

        if let Some(process) = self.process.as_mut() {
            if process.is_alive() {
                process.terminate();
                tracing::info!("recording has been stopped");
            }
        }

        self.status = SessionStatus::Stopped;
    }
}

impl Drop for RecordingSession {
    /// No recorder outlives its session: a still-running process gets the
    /// same probe-then-terminate treatment as an explicit stop.
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    fn sh(script: &str) -> RecordCommand {
        RecordCommand::from_tokens(vec![
            "/bin/sh".to_string(),
            "-c".to_string(),
            script.to_string(),
        ])
        .unwrap()
    }

    /// Poll until the session leaves `Recording`, with a bounded wait.
    fn poll_until_terminal(session: &mut RecordingSession) -> SessionStatus {
        for _ in 0..100 {
            let status = session.poll();
            if status.is_terminal() {
                return status;
            }
            thread::sleep(Duration::from_millis(20));
        }
        panic!("session never reached a terminal state");
    }

    #[test]
    fn new_session_is_idle() {
        let session = RecordingSession::new();
        assert_eq!(*session.status(), SessionStatus::Idle);
        assert!(!session.is_recording());
    }

    #[test]
    fn spawn_failure_is_failed_and_reported() {
        let mut session = RecordingSession::new();
        let command = RecordCommand::from_tokens(vec![
            "/nonexistent/recorder-binary".to_string(),
            "record".to_string(),
            "/imu".to_string(),
        ])
        .unwrap();

        let err = session.start(&command).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/recorder-binary"));
        assert!(matches!(session.status(), SessionStatus::Failed { .. }));
    }

    #[test]
    fn clean_exit_transitions_to_stopped_and_sticks() {
        let mut session = RecordingSession::new();
        session.start(&sh("exit 0")).unwrap();

        assert_eq!(poll_until_terminal(&mut session), SessionStatus::Stopped);

        // Terminal state is sticky and the counter no longer advances.
        assert_eq!(session.poll(), SessionStatus::Stopped);
        assert_eq!(session.poll(), SessionStatus::Stopped);
    }

    #[test]
    fn nonzero_exit_is_failed_with_stderr_detail() {
        let mut session = RecordingSession::new();
        session.start(&sh("echo boom >&2; exit 1")).unwrap();

        match poll_until_terminal(&mut session) {
            SessionStatus::Failed { detail } => assert!(detail.contains("boom")),
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn elapsed_counter_increments_per_poll() {
        let mut session = RecordingSession::new();
        session.start(&sh("sleep 10")).unwrap();

        assert_eq!(session.poll(), SessionStatus::Recording { elapsed_secs: 1 });
        assert_eq!(session.poll(), SessionStatus::Recording { elapsed_secs: 2 });

        session.stop();
    }

    #[test]
    fn stop_is_idempotent() {
        let mut session = RecordingSession::new();
        session.start(&sh("sleep 10")).unwrap();
        assert!(session.is_recording());

        session.stop();
        assert_eq!(*session.status(), SessionStatus::Stopped);

        session.stop();
        assert_eq!(*session.status(), SessionStatus::Stopped);
    }

    #[test]
    fn stop_after_process_exited_is_a_noop() {
        let mut session = RecordingSession::new();
        session.start(&sh("exit 0")).unwrap();

        // Give the child time to exit without poll observing it.
        thread::sleep(Duration::from_millis(100));

        session.stop();
        assert_eq!(*session.status(), SessionStatus::Stopped);
    }

    #[test]
    fn stop_on_idle_session_does_nothing() {
        let mut session = RecordingSession::new();
        session.stop();
        assert_eq!(*session.status(), SessionStatus::Idle);
    }
}
