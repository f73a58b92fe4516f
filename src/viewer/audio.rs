//! Audio viewer: metadata header and a block-glyph waveform
//!
//! Decoding goes through ffmpeg (mono, signed 16-bit PCM on stdout); the
//! stream properties come from ffprobe.

use std::path::Path;
use std::process::{Command, Stdio};

use ratatui::style::{Color, Modifier, Style};

use crate::app::config_file::ConfigFile;
use crate::error::{QuickviewError, Result};
use crate::render::preview::common::format_thousands;
use crate::render::preview::text::{dim_style, heading_style};
use crate::render::preview::{Preview, StyledLine, TextPreview};

use super::tools::{probe, require_ffmpeg, ProbeOutput};

/// Bar glyphs from empty to full
const BLOCK_CHARS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Stream properties shown above the waveform
#[derive(Debug, Clone, PartialEq)]
pub struct AudioInfo {
    pub duration_secs: f64,
    pub channels: u32,
    pub sample_rate: u32,
    pub bit_depth: u32,
}

impl AudioInfo {
    /// Extract audio properties from an ffprobe report
    pub fn from_probe(probe: &ProbeOutput) -> Result<Self> {
        let stream = probe
            .stream("audio")
            .ok_or_else(|| QuickviewError::decode("audio", "no audio stream"))?;

        let bit_depth = stream
            .bits_per_sample
            .filter(|b| *b > 0)
            .or_else(|| {
                stream
                    .bits_per_raw_sample
                    .as_deref()
                    .and_then(|b| b.parse().ok())
            })
            .unwrap_or(16);

        Ok(Self {
            duration_secs: probe.duration_secs().unwrap_or(0.0),
            channels: stream.channels.unwrap_or(1),
            sample_rate: stream
                .sample_rate
                .as_deref()
                .and_then(|r| r.parse().ok())
                .unwrap_or(0),
            bit_depth,
        })
    }

    /// `M:SS.ss`
    pub fn format_duration(&self) -> String {
        let secs = self.duration_secs.max(0.0);
        let minutes = (secs / 60.0).floor();
        format!("{}:{:05.2}", minutes as u64, secs - minutes * 60.0)
    }

    /// `Mono`, `Stereo` or `Nch`
    pub fn channel_label(&self) -> String {
        match self.channels {
            1 => "Mono".to_string(),
            2 => "Stereo".to_string(),
            n => format!("{}ch", n),
        }
    }
}

/// Append one glyph, merging with the previous segment when the style matches
fn push_glyph(line: &mut StyledLine, glyph: char, style: Style) {
    match line.segments.last_mut() {
        Some(last) if last.style == style => last.text.push(glyph),
        _ => line.push(glyph.to_string(), style),
    }
}

/// Block-glyph waveform: `height` rows around a centre line plus a time axis
pub fn generate_waveform(samples: &[i16], width: usize, height: usize) -> Vec<StyledLine> {
    if samples.is_empty() {
        return vec![StyledLine::styled("<No audio data>", dim_style())];
    }

    let n = samples.len();
    let per_column = (n / width.max(1)).max(1);

    // Min/max of every column
    let columns: Vec<(i32, i32)> = (0..width)
        .map(|i| {
            let start = i * per_column;
            let end = (start + per_column).min(n);
            if start >= end {
                return (0, 0);
            }
            let chunk = &samples[start..end];
            let min = chunk.iter().copied().min().unwrap_or(0) as i32;
            let max = chunk.iter().copied().max().unwrap_or(0) as i32;
            (min, max)
        })
        .collect();

    let peak = columns
        .iter()
        .map(|(lo, hi)| lo.abs().max(hi.abs()))
        .max()
        .filter(|p| *p > 0)
        .unwrap_or(1) as f64;

    let half = (height / 2) as i32;
    let upper = Style::default().fg(Color::Cyan);
    let lower = Style::default().fg(Color::Blue);
    let centre_hit = Style::default().fg(Color::Green);

    let mut lines = Vec::with_capacity(height + 1);
    for row in 0..height as i32 {
        let from_centre = row - half;
        let mut line = StyledLine::blank();

        for &(lo, hi) in &columns {
            // Truncation toward zero, matching integer scaling of the amplitude
            let norm_min = (lo as f64 / peak * half as f64) as i32;
            let norm_max = (hi as f64 / peak * half as f64) as i32;

            if from_centre == 0 {
                let style = if norm_min <= 0 && 0 <= norm_max {
                    centre_hit
                } else {
                    dim_style()
                };
                push_glyph(&mut line, '─', style);
            } else if from_centre < 0 {
                let threshold = -from_centre;
                if norm_max >= threshold {
                    let level = ((norm_max - threshold + 1) as f64 / half as f64 * 8.0) as usize;
                    push_glyph(&mut line, BLOCK_CHARS[(level + 4).min(8)], upper);
                } else {
                    push_glyph(&mut line, ' ', Style::default());
                }
            } else {
                let threshold = -from_centre;
                if norm_min <= threshold {
                    let level = ((threshold - norm_min + 1) as f64 / half as f64 * 8.0) as usize;
                    push_glyph(&mut line, BLOCK_CHARS[(level + 4).min(8)], lower);
                } else {
                    push_glyph(&mut line, ' ', Style::default());
                }
            }
        }
        lines.push(line);
    }

    lines.push(StyledLine::styled(
        format!("0:00{}END", " ".repeat(width.saturating_sub(10))),
        dim_style(),
    ));
    lines
}

fn labelled(label: &str, value: String) -> StyledLine {
    let mut line = StyledLine::styled(label, dim_style());
    line.push(value, Style::default());
    line
}

/// Header, waveform and closing rule
pub fn audio_lines(
    filename: &str,
    info: &AudioInfo,
    samples: &[i16],
    width: usize,
    height: usize,
) -> Vec<StyledLine> {
    let mut lines = vec![
        StyledLine::styled(format!("♫ Audio File: {}", filename), heading_style()),
        StyledLine::blank(),
        labelled("Duration:  ", info.format_duration()),
        labelled(
            "Channels:  ",
            format!("{} ({})", info.channels, info.channel_label()),
        ),
        labelled(
            "Sample Rate: ",
            format!("{} Hz", format_thousands(info.sample_rate as u64)),
        ),
        labelled("Bit Depth:  ", format!("{}-bit", info.bit_depth)),
        StyledLine::blank(),
        StyledLine::styled("Waveform:", Style::default().add_modifier(Modifier::BOLD)),
        StyledLine::blank(),
    ];
    lines.extend(generate_waveform(samples, width, height));
    lines.push(StyledLine::blank());
    lines.push(StyledLine::styled("─".repeat(width), dim_style()));
    lines
}

/// Little-endian 16-bit PCM bytes to samples; a trailing odd byte is dropped
pub fn pcm_samples(bytes: &[u8]) -> Vec<i16> {
    bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect()
}

/// Decode the whole file to mono 16-bit samples
pub fn decode_samples(path: &Path) -> Result<Vec<i16>> {
    let ffmpeg = require_ffmpeg()?;

    // ffmpeg -v error -i <input> -ac 1 -f s16le -acodec pcm_s16le -
    let output = Command::new(ffmpeg)
        .args(["-v", "error", "-nostdin"])
        .arg("-i")
        .arg(path)
        .args(["-ac", "1", "-f", "s16le", "-acodec", "pcm_s16le", "-"])
        .stdin(Stdio::null())
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let reason = stderr.lines().last().unwrap_or("ffmpeg failed").to_string();
        return Err(QuickviewError::decode("audio", reason));
    }

    Ok(pcm_samples(&output.stdout))
}

/// Load an audio file
pub fn load(path: &Path, config: &ConfigFile) -> Result<Preview> {
    let info = AudioInfo::from_probe(&probe(path)?)?;
    let samples = decode_samples(path)?;
    tracing::debug!(samples = samples.len(), channels = info.channels, "decoded audio");

    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let lines = audio_lines(
        &filename,
        &info,
        &samples,
        config.audio.waveform_width,
        config.audio.waveform_height,
    );
    Ok(Preview::Text(TextPreview::from_lines(lines)))
}
