//! Application configuration file support
//!
//! Every path the core touches lives here so components can be constructed
//! with injected temporary paths in tests instead of process-wide constants.

use crate::error::{Result, SimulcastError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration loaded from TOML file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Path to the device-listing tool (ffmpeg)
    pub ffmpeg_path: PathBuf,

    /// Path to the broadcaster executable (OBS)
    pub obs_path: PathBuf,

    /// Broadcaster profile directory holding the two descriptor files
    pub profile_dir: PathBuf,

    /// Multi-target descriptor file name inside the profile directory
    pub output_file_name: String,

    /// Service descriptor file name inside the profile directory
    pub service_file_name: String,

    /// Device-selection descriptor path
    pub device_file: PathBuf,

    /// Saved stream-key file path
    pub credentials_file: PathBuf,

    /// Append-only audit log path
    pub audit_log: PathBuf,

    /// Milliseconds to wait for the broadcaster to exit after a stop
    /// request before it is forcibly killed
    pub stop_grace_ms: u64,

    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Log file path (empty = console logging only)
    #[serde(default)]
    pub log_file: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: default_ffmpeg_path(),
            obs_path: default_obs_path(),
            profile_dir: default_profile_dir(),
            output_file_name: "obs-multi-rtmp.json".to_string(),
            service_file_name: "service.json".to_string(),
            device_file: PathBuf::from("obs_device_config.json"),
            credentials_file: PathBuf::from("stream_keys.json"),
            audit_log: PathBuf::from("stream_log.txt"),
            stop_grace_ms: 5000,
            log_level: "info".to_string(),
            log_file: String::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| SimulcastError::io(path.as_ref(), e))?;

        toml::from_str(&content).map_err(|e| SimulcastError::ConfigParse {
            path: path.as_ref().to_path_buf(),
            source: e,
        })
    }

    /// Load configuration from default locations
    ///
    /// Searches in order:
    /// 1. Same directory as executable: simulcast.toml
    /// 2. Platform config dir: simulcast/config.toml
    pub fn load_default() -> Result<Self> {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let config_path = exe_dir.join("simulcast.toml");
                if config_path.exists() {
                    return Self::load(&config_path);
                }
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("simulcast").join("config.toml");
            if config_path.exists() {
                return Self::load(&config_path);
            }
        }

        Ok(Self::default())
    }

    /// Save configuration to a TOML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| {
            SimulcastError::io(
                path.as_ref(),
                std::io::Error::new(std::io::ErrorKind::InvalidData, e),
            )
        })?;

        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent).map_err(|e| SimulcastError::io(parent, e))?;
        }

        std::fs::write(path.as_ref(), content).map_err(|e| SimulcastError::io(path.as_ref(), e))
    }

    /// Full path of the multi-target descriptor file
    pub fn output_file(&self) -> PathBuf {
        self.profile_dir.join(&self.output_file_name)
    }

    /// Full path of the service descriptor file
    pub fn service_file(&self) -> PathBuf {
        self.profile_dir.join(&self.service_file_name)
    }

    /// Working directory for the spawned broadcaster (its own directory)
    pub fn obs_working_dir(&self) -> PathBuf {
        self.obs_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Generate a sample configuration file content
    pub fn sample_config() -> String {
        let defaults = Self::default();
        format!(
            r#"# simulcast configuration
# All paths may be absolute or relative to the working directory.

# Device-listing tool (must support "-list_devices true -f dshow -i dummy")
ffmpeg_path = {ffmpeg:?}

# Broadcaster executable
obs_path = {obs:?}

# Broadcaster profile directory (receives the two descriptor files)
profile_dir = {profile:?}

# Descriptor file names inside the profile directory
output_file_name = "obs-multi-rtmp.json"
service_file_name = "service.json"

# Device-selection descriptor
device_file = "obs_device_config.json"

# Saved stream keys, prefilled on the next start
credentials_file = "stream_keys.json"

# Append-only audit log
audit_log = "stream_log.txt"

# Grace period before the broadcaster is force-killed on stop (milliseconds)
stop_grace_ms = 5000

# Log level: trace, debug, info, warn, error
log_level = "info"

# Log file path (empty = console logging only)
log_file = ""
"#,
            ffmpeg = defaults.ffmpeg_path,
            obs = defaults.obs_path,
            profile = defaults.profile_dir,
        )
    }
}

#[cfg(windows)]
fn default_ffmpeg_path() -> PathBuf {
    // ffmpeg is shipped beside the executable on Windows
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bin")
        .join("ffmpeg.exe")
}

#[cfg(not(windows))]
fn default_ffmpeg_path() -> PathBuf {
    PathBuf::from("/usr/bin/ffmpeg")
}

#[cfg(windows)]
fn default_obs_path() -> PathBuf {
    PathBuf::from(r"C:\Program Files\obs-studio\bin\64bit\obs64.exe")
}

#[cfg(not(windows))]
fn default_obs_path() -> PathBuf {
    PathBuf::from("/usr/bin/obs")
}

fn default_profile_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("obs-studio")
        .join("basic")
        .join("profiles")
        .join("Untitled")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_sample_config_parses() {
        let config: AppConfig = toml::from_str(&AppConfig::sample_config()).unwrap();
        assert_eq!(config.output_file_name, "obs-multi-rtmp.json");
        assert_eq!(config.stop_grace_ms, 5000);
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.obs_path = PathBuf::from("/opt/obs/obs");
        config.stop_grace_ms = 1234;
        config.save(&path).unwrap();

        let loaded = AppConfig::load(&path).unwrap();
        assert_eq!(loaded.obs_path, PathBuf::from("/opt/obs/obs"));
        assert_eq!(loaded.stop_grace_ms, 1234);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "stop_grace_ms = 100\n").unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.stop_grace_ms, 100);
        assert_eq!(config.service_file_name, "service.json");
    }

    #[test]
    fn test_descriptor_paths_join_profile_dir() {
        let mut config = AppConfig::default();
        config.profile_dir = PathBuf::from("/tmp/profile");
        assert_eq!(
            config.output_file(),
            PathBuf::from("/tmp/profile/obs-multi-rtmp.json")
        );
        assert_eq!(
            config.service_file(),
            PathBuf::from("/tmp/profile/service.json")
        );
    }
}
