//! Format detection and viewer dispatch
//!
//! Each submodule decodes one family of formats and maps it onto a generic
//! [`Preview`]. [`ViewerKind::detect`] picks the adapter from the file
//! extension and [`load_preview`] runs it, turning any failure into an inline
//! error preview.

pub mod archive;
pub mod audio;
pub mod csv;
pub mod docx;
pub mod excel;
pub mod image;
pub mod pdf;
pub mod svg;
pub mod text;
pub mod tools;
pub mod video;

use std::path::Path;
use std::time::Instant;

use crate::app::config_file::ConfigFile;
use crate::core::Notice;
use crate::error::Result;
use crate::render::preview::{ErrorPreview, Preview};

/// Every supported viewer, in detection priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewerKind {
    Csv,
    Excel,
    Pdf,
    Archive,
    Docx,
    Audio,
    Image,
    Svg,
    Video,
    Text,
}

impl ViewerKind {
    /// All kinds in the order detection tries them
    pub const ALL: [ViewerKind; 10] = [
        ViewerKind::Csv,
        ViewerKind::Excel,
        ViewerKind::Pdf,
        ViewerKind::Archive,
        ViewerKind::Docx,
        ViewerKind::Audio,
        ViewerKind::Image,
        ViewerKind::Svg,
        ViewerKind::Video,
        ViewerKind::Text,
    ];

    /// Lowercase extensions handled by this viewer (without the dot)
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            ViewerKind::Csv => &["csv", "tsv"],
            ViewerKind::Excel => &["xlsx", "xls", "xlsm", "xlsb", "ods"],
            ViewerKind::Pdf => &["pdf"],
            ViewerKind::Archive => &["zip", "jar", "tgz"],
            ViewerKind::Docx => &["docx"],
            ViewerKind::Audio => &["mp3", "wav", "flac", "ogg", "m4a", "aac", "wma"],
            ViewerKind::Image => &["jpg", "jpeg", "png", "gif", "bmp", "webp"],
            ViewerKind::Svg => &["svg"],
            ViewerKind::Video => &["mp4", "mkv", "avi", "mov", "webm", "wmv", "flv", "m4v"],
            ViewerKind::Text => &[],
        }
    }

    /// Name accepted by `--as` and shown in the header
    pub fn name(self) -> &'static str {
        match self {
            ViewerKind::Csv => "csv",
            ViewerKind::Excel => "excel",
            ViewerKind::Pdf => "pdf",
            ViewerKind::Archive => "archive",
            ViewerKind::Docx => "docx",
            ViewerKind::Audio => "audio",
            ViewerKind::Image => "image",
            ViewerKind::Svg => "svg",
            ViewerKind::Video => "video",
            ViewerKind::Text => "text",
        }
    }

    /// Parse a viewer name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Pick the viewer for a path; total, unknown extensions map to `Text`
    pub fn detect(path: &Path) -> Self {
        if archive::is_tar_gz_file(path) {
            return ViewerKind::Archive;
        }
        let Some(ext) = extension_of(path) else {
            return ViewerKind::Text;
        };
        Self::ALL
            .into_iter()
            .find(|kind| kind.extensions().contains(&ext.as_str()))
            .unwrap_or(ViewerKind::Text)
    }
}

/// Lowercase extension of a path
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// Result of running a viewer
#[derive(Debug, Clone)]
pub struct Loaded {
    pub preview: Preview,
    /// Summary shown in the footer
    pub notice: Option<Notice>,
}

impl Loaded {
    pub fn with_notice(preview: Preview, notice: Option<Notice>) -> Self {
        Self { preview, notice }
    }
}

impl From<Preview> for Loaded {
    fn from(preview: Preview) -> Self {
        Self {
            preview,
            notice: None,
        }
    }
}

/// Run the adapter for `kind`; failures become an inline error preview
pub fn load_preview(path: &Path, kind: ViewerKind, config: &ConfigFile) -> Loaded {
    let started = Instant::now();
    tracing::debug!(path = %path.display(), viewer = kind.name(), "loading preview");

    match run_viewer(path, kind, config) {
        Ok(loaded) => {
            tracing::info!(
                viewer = kind.name(),
                preview = loaded.preview.kind(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "preview ready"
            );
            loaded
        }
        Err(e) => {
            tracing::error!(viewer = kind.name(), path = %path.display(), error = %e, "preview failed");
            Preview::Error(ErrorPreview::from(&e)).into()
        }
    }
}

fn run_viewer(path: &Path, kind: ViewerKind, config: &ConfigFile) -> Result<Loaded> {
    match kind {
        ViewerKind::Csv => csv::load(path, config).map(Loaded::from),
        ViewerKind::Excel => excel::load(path, config).map(Loaded::from),
        ViewerKind::Pdf => pdf::load(path),
        ViewerKind::Archive => archive::load(path, config),
        ViewerKind::Docx => docx::load(path).map(Loaded::from),
        ViewerKind::Audio => audio::load(path, config).map(Loaded::from),
        ViewerKind::Image => image::load(path, config).map(Loaded::from),
        ViewerKind::Svg => svg::load(path, config).map(Loaded::from),
        ViewerKind::Video => video::load(path, config).map(Loaded::from),
        ViewerKind::Text => text::load(path, config).map(Loaded::from),
    }
}
