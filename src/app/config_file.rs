//! Configuration file loading and parsing
//!
//! Loads configuration from `~/.config/quickview/config.toml`, or from the
//! path in `QUICKVIEW_CONFIG` when set.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{QuickviewError, Result};

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "QUICKVIEW_CONFIG";

/// Main configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    /// General settings
    pub general: GeneralConfig,
    /// Preview settings shared by several viewers
    pub preview: PreviewConfig,
    /// Image and SVG settings
    pub image: ImageConfig,
    /// Audio waveform settings
    pub audio: AudioConfig,
    /// Video animation settings
    pub video: VideoConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable mouse wheel scrolling
    pub mouse_enabled: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            mouse_enabled: true,
        }
    }
}

/// Preview-related settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Maximum entries to list in archive preview
    pub max_archive_entries: usize,
    /// Files larger than this are shown without syntax highlighting
    pub highlight_max_bytes: u64,
    /// Alternate row background in tables
    pub zebra_stripes: bool,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            max_archive_entries: 10_000,
            highlight_max_bytes: 1024 * 1024,
            zebra_stripes: true,
        }
    }
}

/// How raster images are drawn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageMode {
    /// True-color half-block cells
    #[default]
    Halfblock,
    /// Grayscale character ramp
    Ascii,
}

/// Image and SVG settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    /// Target width in terminal columns
    pub width: u32,
    pub mode: ImageMode,
    /// Target width for rasterised SVG
    pub svg_width: u32,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            width: 120,
            mode: ImageMode::Halfblock,
            svg_width: 100,
        }
    }
}

/// Audio waveform settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub waveform_width: usize,
    pub waveform_height: usize,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            waveform_width: 100,
            waveform_height: 20,
        }
    }
}

/// Video animation settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    /// Frame width in terminal columns
    pub width: u32,
    pub min_frames: usize,
    pub max_frames: usize,
    /// Delay between frames
    pub frame_interval_ms: u64,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            width: 80,
            min_frames: 8,
            max_frames: 20,
            frame_interval_ms: 500,
        }
    }
}

impl ConfigFile {
    /// Get the config directory path (~/.config/quickview)
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("quickview"))
    }

    /// Get the config file path, honoring `QUICKVIEW_CONFIG`
    pub fn config_path() -> Option<PathBuf> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) if !path.is_empty() => Some(PathBuf::from(path)),
            _ => Self::config_dir().map(|p| p.join("config.toml")),
        }
    }

    /// Load configuration from file
    ///
    /// Returns default config if file doesn't exist or can't be parsed
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "loaded config file");
                config
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring config file");
                Self::default()
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| QuickviewError::config(e.to_string()))
    }
}
