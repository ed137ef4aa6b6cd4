//! Descriptor files consumed by the broadcaster
//!
//! Three artifacts, each fully overwritten on every write: the multi-target
//! descriptor (YouTube), the service descriptor (Facebook), and the
//! device-selection descriptor. The broadcaster reads them at launch.

use crate::audit::AuditLog;
use crate::config::AppConfig;
use crate::device::DeviceSelection;
use crate::error::{Result, SimulcastError};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Fixed YouTube RTMP ingest endpoint
pub const YOUTUBE_INGEST_URL: &str = "rtmp://a.rtmp.youtube.com/live2";

/// Fixed Facebook RTMPS ingest endpoint
pub const FACEBOOK_INGEST_URL: &str = "rtmps://live-api-s.facebook.com:443/rtmp/";

/// Target id the multi-output plugin expects
const YOUTUBE_TARGET_ID: &str = "1835122281";

/// Multi-target descriptor root
#[derive(Debug, Serialize)]
struct OutputDescriptor {
    audio_configs: Vec<serde_json::Value>,
    targets: Vec<Target>,
    video_configs: Vec<serde_json::Value>,
}

#[derive(Debug, Serialize)]
struct Target {
    id: String,
    name: String,
    #[serde(rename = "output-param")]
    output_param: OutputParam,
    protocol: String,
    #[serde(rename = "service-param")]
    service_param: ServiceParam,
}

#[derive(Debug, Serialize)]
struct OutputParam {
    bind_ip: String,
    drop_threshold_ms: u32,
    max_shutdown_time_sec: u32,
    pframe_drop_threshold_ms: u32,
}

#[derive(Debug, Serialize)]
struct ServiceParam {
    key: String,
    server: String,
}

/// Service descriptor root
#[derive(Debug, Serialize)]
struct ServiceDescriptor {
    settings: ServiceSettings,
    #[serde(rename = "type")]
    service_type: String,
    service: String,
}

#[derive(Debug, Serialize)]
struct ServiceSettings {
    server: String,
    key: String,
}

/// Device-selection descriptor
#[derive(Debug, Serialize)]
struct DeviceDescriptor {
    video_device: String,
    audio_device: String,
}

/// Writes the broadcaster-facing descriptor files
pub struct ConfigWriter {
    output_file: PathBuf,
    service_file: PathBuf,
    device_file: PathBuf,
    audit: AuditLog,
}

impl ConfigWriter {
    /// Create a writer targeting the paths from the given configuration
    pub fn new(config: &AppConfig, audit: AuditLog) -> Self {
        Self {
            output_file: config.output_file(),
            service_file: config.service_file(),
            device_file: config.device_file.clone(),
            audit,
        }
    }

    /// Write the YouTube multi-target descriptor
    ///
    /// Audio/video sub-config lists stay empty: the broadcaster manages
    /// those through its own active scene.
    pub fn write_stream_targets(&self, youtube_key: &str) -> Result<()> {
        let descriptor = OutputDescriptor {
            audio_configs: Vec::new(),
            targets: vec![Target {
                id: YOUTUBE_TARGET_ID.to_string(),
                name: "Youtube".to_string(),
                output_param: OutputParam {
                    bind_ip: "default".to_string(),
                    drop_threshold_ms: 700,
                    max_shutdown_time_sec: 30,
                    pframe_drop_threshold_ms: 900,
                },
                protocol: "RTMP".to_string(),
                service_param: ServiceParam {
                    key: youtube_key.to_string(),
                    server: YOUTUBE_INGEST_URL.to_string(),
                },
            }],
            video_configs: Vec::new(),
        };

        write_json(&self.output_file, &descriptor)?;
        self.audit
            .append("YouTube stream key written to outputs file")?;
        info!("Wrote multi-target descriptor to {:?}", self.output_file);
        Ok(())
    }

    /// Write the Facebook service descriptor
    pub fn write_service(&self, facebook_key: &str) -> Result<()> {
        let descriptor = ServiceDescriptor {
            settings: ServiceSettings {
                server: FACEBOOK_INGEST_URL.to_string(),
                key: facebook_key.to_string(),
            },
            service_type: "rtmp_custom".to_string(),
            service: "Facebook".to_string(),
        };

        write_json(&self.service_file, &descriptor)?;
        self.audit
            .append("Facebook stream key written to service file")?;
        info!("Wrote service descriptor to {:?}", self.service_file);
        Ok(())
    }

    /// Write the camera/microphone selection descriptor
    pub fn write_device_selection(&self, selection: &DeviceSelection) -> Result<()> {
        let descriptor = DeviceDescriptor {
            video_device: selection.video.clone(),
            audio_device: selection.audio.clone(),
        };

        write_json(&self.device_file, &descriptor)?;
        self.audit.append(&format!(
            "Broadcaster configured with camera: {}, mic: {}",
            selection.video, selection.audio
        ))?;
        info!("Wrote device selection to {:?}", self.device_file);
        Ok(())
    }
}

/// Serialize pretty JSON to `path`, creating parent directories first
fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| SimulcastError::io(parent, e))?;
        }
    }

    let content = serde_json::to_string_pretty(value)
        .map_err(|e| SimulcastError::io(path, std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;

    std::fs::write(path, content).map_err(|e| SimulcastError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn writer_in(dir: &Path) -> ConfigWriter {
        let mut config = AppConfig::default();
        config.profile_dir = dir.join("profile");
        config.device_file = dir.join("obs_device_config.json");
        let audit = AuditLog::new(dir.join("stream_log.txt"));
        ConfigWriter::new(&config, audit)
    }

    #[test]
    fn test_stream_targets_descriptor_shape() {
        let dir = tempdir().unwrap();
        let writer = writer_in(dir.path());

        writer.write_stream_targets("abc123").unwrap();

        let content =
            std::fs::read_to_string(dir.path().join("profile/obs-multi-rtmp.json")).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&content).unwrap();

        assert_eq!(doc["targets"][0]["service-param"]["key"], "abc123");
        assert_eq!(
            doc["targets"][0]["service-param"]["server"],
            YOUTUBE_INGEST_URL
        );
        assert_eq!(doc["targets"][0]["output-param"]["drop_threshold_ms"], 700);
        assert_eq!(doc["targets"][0]["protocol"], "RTMP");
        assert_eq!(doc["audio_configs"], serde_json::json!([]));
        assert_eq!(doc["video_configs"], serde_json::json!([]));
    }

    #[test]
    fn test_service_descriptor_shape() {
        let dir = tempdir().unwrap();
        let writer = writer_in(dir.path());

        writer.write_service("fb-key").unwrap();

        let content = std::fs::read_to_string(dir.path().join("profile/service.json")).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&content).unwrap();

        assert_eq!(doc["settings"]["key"], "fb-key");
        assert_eq!(doc["settings"]["server"], FACEBOOK_INGEST_URL);
        assert_eq!(doc["type"], "rtmp_custom");
        assert_eq!(doc["service"], "Facebook");
    }

    #[test]
    fn test_device_selection_descriptor() {
        let dir = tempdir().unwrap();
        let writer = writer_in(dir.path());

        let selection = DeviceSelection {
            video: "Integrated Webcam".to_string(),
            audio: String::new(),
        };
        writer.write_device_selection(&selection).unwrap();

        let content =
            std::fs::read_to_string(dir.path().join("obs_device_config.json")).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&content).unwrap();

        assert_eq!(doc["video_device"], "Integrated Webcam");
        assert_eq!(doc["audio_device"], "");
    }

    #[test]
    fn test_writes_overwrite_fully() {
        let dir = tempdir().unwrap();
        let writer = writer_in(dir.path());

        writer.write_stream_targets("first-key").unwrap();
        writer.write_stream_targets("second").unwrap();

        let content =
            std::fs::read_to_string(dir.path().join("profile/obs-multi-rtmp.json")).unwrap();
        assert!(content.contains("second"));
        assert!(!content.contains("first-key"));
    }

    #[test]
    fn test_each_write_appends_audit_line() {
        let dir = tempdir().unwrap();
        let writer = writer_in(dir.path());

        writer.write_stream_targets("k").unwrap();
        writer.write_service("k").unwrap();

        let log = std::fs::read_to_string(dir.path().join("stream_log.txt")).unwrap();
        assert_eq!(log.lines().count(), 2);
    }
}
