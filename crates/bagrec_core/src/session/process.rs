//! Low-level wrapper around the recorder child process.
//!
//! Owns the spawned child and provides the three process-contract
//! primitives the session needs: non-blocking exit query, liveness probe,
//! and graceful termination. Probe and signal failures are absorbed and
//! treated as "process already gone".

use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};

use crate::models::RecordCommand;

/// A running (or recently exited) recorder process.
pub(crate) struct RecorderProcess {
    child: Child,
}

impl RecorderProcess {
    /// Spawn the command with stdout and stderr captured.
    pub(crate) fn spawn(command: &RecordCommand) -> std::io::Result<Self> {
        let child = Command::new(command.program())
            .args(&command.tokens()[1..])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        tracing::debug!("spawned recorder process pid {}", child.id());

        Ok(Self { child })
    }

    /// Non-blocking exit query. `None` while still running; probe errors
    /// are absorbed and reported as still running.
    pub(crate) fn poll_exit(&mut self) -> Option<ExitStatus> {
        match self.child.try_wait() {
            Ok(status) => status,
            Err(err) => {
                tracing::warn!("exit status query failed: {err}");
                None
            }
        }
    }

    /// Liveness probe: does the pid still refer to a running process?
    ///
    /// Sends signal 0, which checks deliverability without delivering
    /// anything. Any error means the process is gone.
    #[cfg(unix)]
    pub(crate) fn is_alive(&mut self) -> bool {
        use nix::sys::signal;
        use nix::unistd::Pid;

        signal::kill(Pid::from_raw(self.child.id() as i32), None).is_ok()
    }

    #[cfg(not(unix))]
    pub(crate) fn is_alive(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(None))
    }

    /// Send a graceful termination signal. Delivery failures are absorbed:
    /// the process has already exited and will be reaped by the next
    /// `poll_exit`.
    #[cfg(unix)]
    pub(crate) fn terminate(&mut self) {
        use nix::sys::signal::{self, Signal};
        use nix::unistd::Pid;

        if let Err(err) = signal::kill(Pid::from_raw(self.child.id() as i32), Signal::SIGTERM) {
            tracing::debug!("termination signal not delivered: {err}");
        }
    }

    #[cfg(not(unix))]
    pub(crate) fn terminate(&mut self) {
        if let Err(err) = self.child.kill() {
            tracing::debug!("termination failed: {err}");
        }
    }

    /// Drain captured stderr. Only called after the process has been
    /// observed as exited, so the read is bounded.
    pub(crate) fn read_stderr(&mut self) -> String {
        let Some(mut stderr) = self.child.stderr.take() else {
            return String::new();
        };

        let mut buf = Vec::new();
        if let Err(err) = stderr.read_to_end(&mut buf) {
            tracing::warn!("failed to read recorder stderr: {err}");
            return String::new();
        }

        String::from_utf8_lossy(&buf).trim_end().to_string()
    }
}
