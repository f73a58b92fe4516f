//! Raster image viewer

use std::path::Path;

use ::image::{DynamicImage, ImageReader};

use crate::app::config_file::{ConfigFile, ImageMode};
use crate::error::{QuickviewError, Result};
use crate::render::halfblock::PixelGrid;
use crate::render::preview::{CanvasBody, CanvasPreview, Preview};

/// Decode an image, trusting content over extension
pub fn decode(path: &Path) -> Result<DynamicImage> {
    ImageReader::open(path)?
        .with_guessed_format()?
        .decode()
        .map_err(|e| QuickviewError::decode("image", e))
}

/// Map a decoded image onto a canvas at `width` columns
pub fn canvas_for(img: &DynamicImage, width: u32, mode: ImageMode) -> CanvasPreview {
    let grid = PixelGrid::from_image(img);
    let width = width.max(1);

    match mode {
        ImageMode::Halfblock => {
            let fitted = grid.fit_width(width);
            let caption = format!(
                "Image: {}x{} → {}x{}",
                grid.width(),
                grid.height(),
                fitted.width(),
                fitted.height()
            );
            CanvasPreview::new(caption, CanvasBody::HalfBlock(fitted))
        }
        ImageMode::Ascii => {
            // Character cells are about twice as tall as wide
            let height = if grid.is_empty() {
                0
            } else {
                ((width as u64 * grid.height() as u64 / grid.width() as u64) / 2).max(1) as u32
            };
            let resized = grid.resize(width, height);
            let caption = format!(
                "Image: {}x{} → {}x{} (ascii)",
                grid.width(),
                grid.height(),
                resized.width(),
                resized.height()
            );
            CanvasPreview::new(caption, CanvasBody::Ascii(resized.to_ascii_lines()))
        }
    }
}

/// Load an image file
pub fn load(path: &Path, config: &ConfigFile) -> Result<Preview> {
    let img = decode(path)?;
    tracing::debug!(width = img.width(), height = img.height(), "decoded image");
    Ok(Preview::Canvas(canvas_for(
        &img,
        config.image.width,
        config.image.mode,
    )))
}
