//! Elapsed streaming time, display only

use std::time::{Duration, Instant};

/// Tracks elapsed time since a session started
///
/// Advisory display state only; nothing here is persisted or transmitted.
#[derive(Debug, Default)]
pub struct SessionTimer {
    started: Option<Instant>,
}

impl SessionTimer {
    /// Create a stopped timer
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current instant as session start
    pub fn start(&mut self) {
        self.started = Some(Instant::now());
    }

    /// Clear the recorded start instant
    pub fn reset(&mut self) {
        self.started = None;
    }

    /// Whether a start instant is recorded
    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }

    /// Time since start, or None when stopped
    ///
    /// Safe to poll after reset: a stray tick gets None, not a panic.
    pub fn elapsed(&self) -> Option<Duration> {
        self.started.map(|t| t.elapsed())
    }

    /// Elapsed time formatted as HH:MM:SS, or None when stopped
    pub fn display(&self) -> Option<String> {
        self.elapsed().map(format_elapsed)
    }
}

/// Format a duration as zero-padded HH:MM:SS
///
/// Hours are uncapped; only minutes and seconds are derived from the
/// remainder, so a 25-hour session reads "25:00:00".
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_hours_minutes_seconds() {
        assert_eq!(format_elapsed(Duration::from_secs(3725)), "01:02:05");
    }

    #[test]
    fn test_format_zero() {
        assert_eq!(format_elapsed(Duration::from_secs(0)), "00:00:00");
    }

    #[test]
    fn test_format_does_not_wrap_hours() {
        assert_eq!(format_elapsed(Duration::from_secs(90_000)), "25:00:00");
    }

    #[test]
    fn test_stopped_timer_yields_none() {
        let mut timer = SessionTimer::new();
        assert_eq!(timer.elapsed(), None);

        timer.start();
        assert!(timer.is_running());
        assert!(timer.elapsed().is_some());

        timer.reset();
        assert_eq!(timer.elapsed(), None);
        assert_eq!(timer.display(), None);
    }
}
