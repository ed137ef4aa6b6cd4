//! Stream-key persistence for prefilling the next session
//!
//! Separate from the broadcaster-facing descriptors: this file exists only
//! so previously entered keys can be offered again at the next launch.

use crate::error::{Result, SimulcastError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

/// Saved stream keys for both platforms
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Credentials {
    pub youtube: String,
    pub facebook: String,
}

impl Credentials {
    /// Load saved keys, treating a missing file as "no saved credentials"
    ///
    /// An unreadable or unparsable file also degrades to empty keys so the
    /// application stays usable; the user just types them again.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            debug!("No credentials file at {:?}, starting empty", path);
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(credentials) => credentials,
                Err(e) => {
                    warn!("Failed to parse credentials file {:?}: {}", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read credentials file {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Save both keys, overwriting any previous file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| SimulcastError::io(parent, e))?;
            }
        }

        let content = serde_json::to_string_pretty(self).map_err(|e| {
            SimulcastError::io(path, std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })?;

        std::fs::write(path, content).map_err(|e| SimulcastError::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stream_keys.json");

        let credentials = Credentials {
            youtube: "k1".to_string(),
            facebook: "k2".to_string(),
        };
        credentials.save(&path).unwrap();

        assert_eq!(Credentials::load(&path), credentials);
    }

    #[test]
    fn test_missing_file_defaults_to_empty() {
        let dir = tempdir().unwrap();
        let loaded = Credentials::load(dir.path().join("does-not-exist.json"));
        assert_eq!(loaded, Credentials::default());
    }

    #[test]
    fn test_corrupt_file_defaults_to_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stream_keys.json");
        std::fs::write(&path, "{not json").unwrap();

        assert_eq!(Credentials::load(&path), Credentials::default());
    }

    #[test]
    fn test_missing_fields_default_to_empty_strings() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stream_keys.json");
        std::fs::write(&path, r#"{"youtube": "only-yt"}"#).unwrap();

        let loaded = Credentials::load(&path);
        assert_eq!(loaded.youtube, "only-yt");
        assert_eq!(loaded.facebook, "");
    }
}
