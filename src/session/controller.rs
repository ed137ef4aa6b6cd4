//! Orchestration of a streaming session
//!
//! Sequences credential validation, descriptor writes, and process
//! supervision on start, and supervisor teardown on stop. The front end
//! only invokes these operations and displays returned state.

use crate::audit::AuditLog;
use crate::broadcast::{ConfigWriter, Credentials, ProcessSupervisor};
use crate::config::AppConfig;
use crate::device::{DeviceEnumerator, DeviceList, DeviceSelection};
use crate::error::{Result, SimulcastError};
use crate::session::SessionTimer;
use std::time::Duration;
use tracing::info;

/// Dry-run behavior for a start request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestMode {
    /// Normal operation: write configuration and launch the broadcaster
    Off,
    /// Write all configuration, skip only the launch
    SkipSpawn,
    /// Validate credentials and stop: nothing written, nothing launched,
    /// no session claimed
    SkipAll,
}

/// Drives the core components through a session lifecycle
pub struct StreamController {
    config: AppConfig,
    supervisor: ProcessSupervisor,
    timer: SessionTimer,
    audit: AuditLog,
    /// Whether the current session owns a real broadcaster process
    spawned: bool,
}

impl StreamController {
    /// Create an idle controller from configuration
    pub fn new(config: AppConfig) -> Self {
        let audit = AuditLog::new(config.audit_log.clone());
        let supervisor = ProcessSupervisor::new(Duration::from_millis(config.stop_grace_ms));
        Self {
            config,
            supervisor,
            timer: SessionTimer::new(),
            audit,
            spawned: false,
        }
    }

    /// The audit log this controller appends to
    pub fn audit(&self) -> &AuditLog {
        &self.audit
    }

    /// Enumerate capture devices and record the result in the audit log
    pub fn load_devices(&self) -> Result<DeviceList> {
        let devices = DeviceEnumerator::new(&self.config.ffmpeg_path).enumerate();
        self.audit
            .append(&format!("Video devices: {:?}", devices.video))?;
        self.audit
            .append(&format!("Audio devices: {:?}", devices.audio))?;
        Ok(devices)
    }

    /// Start a streaming session
    ///
    /// Validates both keys, persists them for the next launch, writes the
    /// three descriptor files, and launches the broadcaster. Any failure
    /// leaves the controller usable for a retry.
    pub fn start_stream(
        &mut self,
        credentials: &Credentials,
        selection: &DeviceSelection,
        test_mode: TestMode,
    ) -> Result<()> {
        if credentials.youtube.trim().is_empty() {
            return Err(SimulcastError::missing_credentials("YouTube"));
        }
        if credentials.facebook.trim().is_empty() {
            return Err(SimulcastError::missing_credentials("Facebook"));
        }

        if test_mode == TestMode::SkipAll {
            info!("Test mode (skip all): credentials validated, nothing written");
            self.audit
                .append("Test mode (skip all): dry run, no configuration written")?;
            return Ok(());
        }

        credentials.save(&self.config.credentials_file)?;

        let writer = ConfigWriter::new(&self.config, self.audit.clone());
        writer.write_stream_targets(credentials.youtube.trim())?;
        writer.write_service(credentials.facebook.trim())?;
        writer.write_device_selection(selection)?;

        let skip_spawn = test_mode == TestMode::SkipSpawn;
        self.supervisor.start(
            &self.config.obs_path,
            &self.config.obs_working_dir(),
            skip_spawn,
        )?;
        self.spawned = !skip_spawn;
        if skip_spawn {
            self.audit
                .append("Test mode enabled, broadcaster will not be launched")?;
        }

        self.timer.start();
        self.audit.append("Streaming started")?;
        Ok(())
    }

    /// Stop the session: terminate the broadcaster and clear the timer
    pub fn stop_stream(&mut self) -> Result<()> {
        self.supervisor.stop();
        self.spawned = false;
        self.timer.reset();
        self.audit.append("Streaming stopped")
    }

    /// Whether a session is active
    ///
    /// In skip-spawn test mode the session is the timer itself; otherwise
    /// a broadcaster that exited on its own ends the session.
    pub fn is_streaming(&mut self) -> bool {
        if !self.timer.is_running() {
            return false;
        }
        !self.spawned || self.supervisor.is_running()
    }

    /// Elapsed session time as HH:MM:SS, if a session is active
    pub fn timer_display(&self) -> Option<String> {
        self.timer.display()
    }
}
