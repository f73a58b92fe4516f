//! ffmpeg/ffprobe discovery and probing
//!
//! Audio and video previews shell out to the ffmpeg suite. Executable paths
//! are detected once per process.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::OnceLock;

use serde::Deserialize;

use crate::error::{QuickviewError, Result};

/// Cached ffmpeg path detection
static FFMPEG_PATH: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Cached ffprobe path detection
static FFPROBE_PATH: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Locate an executable: well-known install prefixes first, then `which`
fn locate(name: &str) -> Option<PathBuf> {
    let candidates = ["/usr/bin", "/usr/local/bin", "/opt/homebrew/bin"];
    for dir in candidates {
        let p = Path::new(dir).join(name);
        if p.exists() {
            return Some(p);
        }
    }
    // Fallback: which <name>
    Command::new("which")
        .arg(name)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| PathBuf::from(s.trim()))
        .filter(|p| p.exists())
}

/// Find ffmpeg executable path (lazy detection with caching)
pub fn find_ffmpeg() -> Option<&'static PathBuf> {
    FFMPEG_PATH.get_or_init(|| locate("ffmpeg")).as_ref()
}

/// Find ffprobe executable path (lazy detection with caching)
pub fn find_ffprobe() -> Option<&'static PathBuf> {
    FFPROBE_PATH.get_or_init(|| locate("ffprobe")).as_ref()
}

/// ffmpeg path or a `MissingTool` error
pub fn require_ffmpeg() -> Result<&'static PathBuf> {
    find_ffmpeg().ok_or_else(|| QuickviewError::missing_tool("ffmpeg"))
}

/// ffprobe path or a `MissingTool` error
pub fn require_ffprobe() -> Result<&'static PathBuf> {
    find_ffprobe().ok_or_else(|| QuickviewError::missing_tool("ffprobe"))
}

/// Subset of `ffprobe -print_format json -show_format -show_streams`
#[derive(Debug, Default, Deserialize)]
pub struct ProbeOutput {
    #[serde(default)]
    pub format: ProbeFormat,
    #[serde(default)]
    pub streams: Vec<ProbeStream>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProbeFormat {
    /// Seconds, as a decimal string
    pub duration: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProbeStream {
    pub codec_type: Option<String>,
    pub codec_name: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub channels: Option<u32>,
    /// Hz, as a decimal string
    pub sample_rate: Option<String>,
    pub bits_per_sample: Option<u32>,
    pub bits_per_raw_sample: Option<String>,
    pub duration: Option<String>,
}

impl ProbeOutput {
    /// Parse ffprobe JSON
    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| QuickviewError::decode("ffprobe output", e))
    }

    /// First stream of the given type (`"audio"`, `"video"`)
    pub fn stream(&self, codec_type: &str) -> Option<&ProbeStream> {
        self.streams
            .iter()
            .find(|s| s.codec_type.as_deref() == Some(codec_type))
    }

    /// Container duration, falling back to the first stream that has one
    pub fn duration_secs(&self) -> Option<f64> {
        self.format
            .duration
            .as_deref()
            .and_then(|d| d.parse::<f64>().ok())
            .or_else(|| {
                self.streams
                    .iter()
                    .filter_map(|s| s.duration.as_deref())
                    .find_map(|d| d.parse::<f64>().ok())
            })
    }
}

/// Run ffprobe on a file and parse its JSON report
pub fn probe(path: &Path) -> Result<ProbeOutput> {
    let ffprobe = require_ffprobe()?;

    // ffprobe -v quiet -print_format json -show_format -show_streams <input>
    let output = Command::new(ffprobe)
        .args(["-v", "quiet"])
        .args(["-print_format", "json"])
        .args(["-show_format", "-show_streams"])
        .arg(path)
        .stdin(Stdio::null())
        .output()?;

    if !output.status.success() {
        return Err(QuickviewError::decode(
            "media",
            "ffprobe could not read the file",
        ));
    }

    ProbeOutput::parse(&String::from_utf8_lossy(&output.stdout))
}
