//! Capture-device enumeration via ffmpeg's DirectShow listing
//!
//! ffmpeg prints the device listing on stderr, not stdout; that is a
//! property of the `-list_devices` convention and is relied on here.

use crate::error::Result;
use std::path::PathBuf;
use std::process::Command;
use tracing::{debug, warn};

/// Ordered capture-device names, partitioned by kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceList {
    /// Video capture devices in listing order
    pub video: Vec<String>,
    /// Audio capture devices in listing order
    pub audio: Vec<String>,
}

impl DeviceList {
    /// Whether the listing produced no devices at all
    pub fn is_empty(&self) -> bool {
        self.video.is_empty() && self.audio.is_empty()
    }
}

/// The camera/microphone pair chosen from the most recent enumeration
///
/// Empty strings mean "nothing selected"; the broadcaster treats them as
/// "keep the active scene's source".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceSelection {
    pub video: String,
    pub audio: String,
}

/// Enumerates capture devices by invoking the external listing tool
pub struct DeviceEnumerator {
    ffmpeg_path: PathBuf,
}

impl DeviceEnumerator {
    /// Create an enumerator using the given listing tool
    pub fn new(ffmpeg_path: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
        }
    }

    /// Run the listing tool and parse its output
    ///
    /// Re-invokes the tool on every call; no caching. If the tool cannot
    /// be invoked at all the result is two empty lists, never an error,
    /// so callers can still render an empty selector.
    pub fn enumerate(&self) -> DeviceList {
        let listing = match self.run_listing() {
            Ok(listing) => listing,
            Err(e) => {
                warn!(
                    "Degrading to empty device lists ({}): {}",
                    self.ffmpeg_path.display(),
                    e
                );
                return DeviceList::default();
            }
        };

        let devices = parse_listing(&listing);
        debug!(
            "Enumerated {} video and {} audio devices",
            devices.video.len(),
            devices.audio.len()
        );
        devices
    }

    /// Invoke the listing tool and return its diagnostic-stream text
    fn run_listing(&self) -> Result<String> {
        let output = Command::new(&self.ffmpeg_path)
            .args(["-list_devices", "true", "-f", "dshow", "-i", "dummy"])
            .output()?;

        // The listing goes to the diagnostic stream
        Ok(String::from_utf8_lossy(&output.stderr).into_owned())
    }
}

/// Parse a device listing into ordered video/audio name lists
///
/// A line counts as a video device when it contains "video device"
/// (case-insensitive) and as an audio device when it contains
/// "audio device"; the name is whatever follows the last colon, trimmed.
/// Anything else is ignored. Duplicates are preserved.
pub fn parse_listing(listing: &str) -> DeviceList {
    let mut devices = DeviceList::default();

    for line in listing.lines() {
        let lower = line.to_lowercase();
        if lower.contains("video device") {
            devices.video.push(device_name(line));
        }
        if lower.contains("audio device") {
            devices.audio.push(device_name(line));
        }
    }

    devices
}

fn device_name(line: &str) -> String {
    line.rsplit(':').next().unwrap_or(line).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partitions_by_kind_in_order() {
        let listing = "\
[dshow @ 000001] DirectShow capture listing follows
[dshow @ 000001] Video Device: Integrated Webcam
[dshow @ 000001] Video Device: USB Capture HDMI
[dshow @ 000001] Audio Device:  Microphone (Realtek Audio)
dummy: Immediate exit requested
";
        let devices = parse_listing(listing);
        assert_eq!(devices.video, vec!["Integrated Webcam", "USB Capture HDMI"]);
        assert_eq!(devices.audio, vec!["Microphone (Realtek Audio)"]);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        let devices = parse_listing("info: VIDEO DEVICE: Cam\ninfo: audio DEVICE: Mic\n");
        assert_eq!(devices.video, vec!["Cam"]);
        assert_eq!(devices.audio, vec!["Mic"]);
    }

    #[test]
    fn test_parse_takes_segment_after_last_colon() {
        let devices = parse_listing("[x] video device: alt name: Elgato: HD60\n");
        assert_eq!(devices.video, vec!["HD60"]);
    }

    #[test]
    fn test_parse_keeps_duplicates() {
        let devices = parse_listing("a video device: Cam\nb video device: Cam\n");
        assert_eq!(devices.video, vec!["Cam", "Cam"]);
    }

    #[test]
    fn test_parse_ignores_unrelated_lines() {
        let listing = "ffmpeg version 6.0\nbuilt with gcc\nerror: dummy not found\n";
        assert!(parse_listing(listing).is_empty());
    }

    #[test]
    fn test_enumerate_missing_tool_degrades_to_empty() {
        let enumerator = DeviceEnumerator::new("/nonexistent/ffmpeg-for-test");
        let devices = enumerator.enumerate();
        assert!(devices.is_empty());
    }
}
