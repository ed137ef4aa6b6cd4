//! Broadcaster process lifecycle
//!
//! Owns at most one child process at a time. Starting while a process is
//! owned terminates the old one first, so reconfiguration never leaves a
//! second broadcaster running.

use crate::error::{Result, SimulcastError};
use std::path::Path;
use std::process::{Child, Command};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Supervisor state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorState {
    /// No process owned
    Idle,
    /// A broadcaster process handle is owned
    Running,
}

/// Supervises the external broadcaster process
pub struct ProcessSupervisor {
    child: Option<Child>,
    /// Bounded wait for a cooperative exit before the hard kill
    stop_grace: Duration,
}

impl ProcessSupervisor {
    /// Create an idle supervisor
    ///
    /// `stop_grace` bounds how long `stop()` waits for the broadcaster to
    /// exit on its own before killing it.
    pub fn new(stop_grace: Duration) -> Self {
        Self {
            child: None,
            stop_grace,
        }
    }

    /// Current state
    pub fn state(&self) -> SupervisorState {
        if self.child.is_some() {
            SupervisorState::Running
        } else {
            SupervisorState::Idle
        }
    }

    /// Whether an owned process is still alive
    ///
    /// Reaps a broadcaster that exited on its own and releases its handle.
    pub fn is_running(&mut self) -> bool {
        match self.child.as_mut() {
            Some(child) => match child.try_wait() {
                Ok(Some(status)) => {
                    info!("Broadcaster exited on its own: {}", status);
                    self.child = None;
                    false
                }
                Ok(None) => true,
                Err(e) => {
                    warn!("Failed to poll broadcaster status: {}", e);
                    true
                }
            },
            None => false,
        }
    }

    /// Process id of the owned broadcaster, if any
    pub fn pid(&self) -> Option<u32> {
        self.child.as_ref().map(Child::id)
    }

    /// Launch the broadcaster, replacing any previously owned process
    ///
    /// With `skip_spawn` the intent is logged and success reported without
    /// owning a process (test mode). A missing executable fails before
    /// anything else happens, leaving prior state untouched.
    pub fn start(&mut self, executable: &Path, working_dir: &Path, skip_spawn: bool) -> Result<()> {
        if !executable.exists() {
            return Err(SimulcastError::ExecutableNotFound(executable.to_path_buf()));
        }

        if skip_spawn {
            info!("Test mode enabled, broadcaster will not be launched");
            return Ok(());
        }

        // No two broadcasters may run at once
        if self.child.is_some() {
            debug!("Broadcaster already owned, terminating it before relaunch");
            self.terminate_owned();
        }

        let child = Command::new(executable)
            .current_dir(working_dir)
            .spawn()
            .map_err(|e| SimulcastError::io(executable, e))?;

        info!(
            "Launched broadcaster {:?} (pid {})",
            executable,
            child.id()
        );
        self.child = Some(child);
        Ok(())
    }

    /// Terminate the owned broadcaster, if any
    ///
    /// No-op when idle. Never fails: termination problems are logged, the
    /// handle is always released.
    pub fn stop(&mut self) {
        if self.child.is_none() {
            debug!("Stop requested with no broadcaster owned");
            return;
        }
        self.terminate_owned();
    }

    fn terminate_owned(&mut self) {
        let Some(mut child) = self.child.take() else {
            return;
        };
        let pid = child.id();

        // Give a cooperative broadcaster a bounded window to exit, then kill.
        let deadline = Instant::now() + self.stop_grace;
        loop {
            match child.try_wait() {
                Ok(Some(status)) => {
                    info!("Broadcaster (pid {}) exited: {}", pid, status);
                    return;
                }
                Ok(None) => {}
                Err(e) => {
                    warn!("Failed to poll broadcaster (pid {}): {}", pid, e);
                    break;
                }
            }
            if Instant::now() >= deadline {
                break;
            }
            std::thread::sleep(Duration::from_millis(50));
        }

        if let Err(e) = child.kill() {
            warn!("Failed to kill broadcaster (pid {}): {}", pid, e);
        }
        // Reap so the handle never lingers as a zombie
        match child.wait() {
            Ok(status) => info!("Broadcaster (pid {}) terminated: {}", pid, status),
            Err(e) => warn!("Failed to reap broadcaster (pid {}): {}", pid, e),
        }
    }
}

impl Drop for ProcessSupervisor {
    fn drop(&mut self) {
        // A dropped supervisor must not orphan its broadcaster
        self.stop();
    }
}
