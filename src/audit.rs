//! Append-only audit log of user-visible streaming events
//!
//! Distinct from tracing: this file is a stable artifact the user can read
//! back after a session, one line per event.

use crate::error::{Result, SimulcastError};
use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Timestamp format used for every audit line
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Append-only event log
#[derive(Debug, Clone)]
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    /// Create a logger appending to the given file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the underlying log file
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Append one event line: `YYYY-MM-DD HH:MM:SS - message`
    pub fn append(&self, message: &str) -> Result<()> {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT);
        let line = format!("{} - {}\n", timestamp, message);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| SimulcastError::io(&self.path, e))?;

        file.write_all(line.as_bytes())
            .map_err(|e| SimulcastError::io(&self.path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_append_line_format() {
        let dir = tempdir().unwrap();
        let log = AuditLog::new(dir.path().join("events.txt"));

        log.append("App started").unwrap();
        log.append("Streaming started").unwrap();

        let content = std::fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        // "YYYY-MM-DD HH:MM:SS - message"
        for line in &lines {
            assert_eq!(&line[10..11], " ");
            assert_eq!(&line[19..22], " - ");
        }
        assert!(lines[0].ends_with("App started"));
        assert!(lines[1].ends_with("Streaming started"));
    }

    #[test]
    fn test_append_creates_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("events.txt");
        assert!(!path.exists());

        AuditLog::new(&path).append("hello").unwrap();
        assert!(path.exists());
    }
}
