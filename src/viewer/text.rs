//! Plain text fallback viewer

use std::path::Path;

use crate::app::config_file::ConfigFile;
use crate::error::Result;
use crate::render::preview::{Preview, TextPreview};

/// Build a numbered text preview, highlighting only below `highlight_max_bytes`
pub fn preview_for(bytes: &[u8], path: &Path, highlight_max_bytes: u64) -> TextPreview {
    let content = String::from_utf8_lossy(bytes);
    let preview = if bytes.len() as u64 <= highlight_max_bytes {
        TextPreview::with_highlighting(&content, path)
    } else {
        tracing::debug!(size = bytes.len(), "file too large for highlighting");
        TextPreview::new(&content)
    };
    preview.numbered()
}

/// Load any file as text
pub fn load(path: &Path, config: &ConfigFile) -> Result<Preview> {
    let bytes = std::fs::read(path)?;
    Ok(Preview::Text(preview_for(
        &bytes,
        path,
        config.preview.highlight_max_bytes,
    )))
}
