//! Video viewer: evenly spaced frames played back as a loop
//!
//! Frames are extracted with ffmpeg into a temporary directory that is
//! removed as soon as they have been decoded.

use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Duration;

use crate::app::config_file::{ConfigFile, VideoConfig};
use crate::error::{QuickviewError, Result};
use crate::render::halfblock::PixelGrid;
use crate::render::preview::{AnimationPreview, Preview};

use super::tools::{probe, require_ffmpeg, require_ffprobe};

/// Number of preview frames for a clip: one per second, clamped to the configured range
pub fn frame_count(duration_secs: f64, min_frames: usize, max_frames: usize) -> usize {
    let per_second = duration_secs.max(0.0).floor() as usize;
    per_second.max(min_frames).min(max_frames)
}

/// Seek positions that split the clip into `count + 1` equal parts
pub fn frame_timestamps(duration_secs: f64, count: usize) -> Vec<f64> {
    let interval = duration_secs / (count as f64 + 1.0);
    (0..count).map(|i| interval * (i as f64 + 1.0)).collect()
}

/// Grab one frame at `timestamp` into `output`; false when ffmpeg produced nothing
fn extract_frame(ffmpeg: &Path, video: &Path, timestamp: f64, output: &Path) -> Result<bool> {
    // ffmpeg -y -ss <t> -i <input> -vframes 1 <output.png>
    // -ss before -i for faster seeking
    let status = Command::new(ffmpeg)
        .args(["-y", "-v", "error", "-nostdin"])
        .args(["-ss", &format!("{:.3}", timestamp)])
        .arg("-i")
        .arg(video)
        .args(["-vframes", "1"])
        .arg(output)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()?;
    Ok(status.success() && output.exists())
}

/// Frames and source resolution
struct Frames {
    grids: Vec<PixelGrid>,
    resolution: (u32, u32),
}

fn extract_frames(path: &Path, duration: f64, settings: &VideoConfig) -> Result<Frames> {
    let ffmpeg = require_ffmpeg()?;
    let count = frame_count(duration, settings.min_frames, settings.max_frames);
    let temp_dir = tempfile::Builder::new().prefix("quickview_").tempdir()?;
    tracing::debug!(count, dir = %temp_dir.path().display(), "extracting video frames");

    let mut grids = Vec::with_capacity(count);
    let mut resolution = (0, 0);
    for (i, timestamp) in frame_timestamps(duration, count).into_iter().enumerate() {
        let output = temp_dir.path().join(format!("frame_{:03}.png", i));
        if !extract_frame(ffmpeg, path, timestamp, &output)? {
            tracing::warn!(timestamp, "ffmpeg produced no frame");
            continue;
        }
        let img = match ::image::open(&output) {
            Ok(img) => img,
            Err(e) => {
                tracing::warn!(timestamp, error = %e, "unreadable frame");
                continue;
            }
        };
        if grids.is_empty() {
            resolution = (img.width(), img.height());
        }
        grids.push(PixelGrid::from_image(&img).fit_width(settings.width));
    }

    Ok(Frames { grids, resolution })
}

/// Load a video file
pub fn load(path: &Path, config: &ConfigFile) -> Result<Preview> {
    require_ffprobe()?;
    let duration = probe(path)?
        .duration_secs()
        .filter(|d| *d > 0.0)
        .ok_or_else(|| QuickviewError::decode("video", "Could not read video duration"))?;

    let frames = extract_frames(path, duration, &config.video)?;
    if frames.grids.is_empty() {
        return Err(QuickviewError::decode(
            "video",
            "Could not extract frames from video",
        ));
    }

    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let caption = format!(
        "Video: {} | {}x{} | {:.1}s | {} preview frames",
        filename,
        frames.resolution.0,
        frames.resolution.1,
        duration,
        frames.grids.len()
    );

    Ok(Preview::Animation(AnimationPreview::new(
        caption,
        frames.grids,
        Duration::from_millis(config.video.frame_interval_ms.max(1)),
    )))
}
