//! SVG viewer: rasterised with resvg, drawn as half-blocks

use std::path::Path;

use resvg::{tiny_skia, usvg};

use crate::app::config_file::ConfigFile;
use crate::error::{QuickviewError, Result};
use crate::render::halfblock::{PixelGrid, DARK_BACKGROUND};
use crate::render::preview::{CanvasBody, CanvasPreview, Preview};

/// Rasterise SVG data at `target_width` pixels, keeping the aspect ratio.
/// Returns the grid and the document's own size.
pub fn rasterize(data: &[u8], target_width: u32) -> Result<(PixelGrid, (u32, u32))> {
    let options = usvg::Options::default();
    let tree = usvg::Tree::from_data(data, &options).map_err(|e| QuickviewError::decode("SVG", e))?;

    let size = tree.size();
    let (orig_w, orig_h) = (size.width(), size.height());
    let width = target_width.max(1);
    let scale = width as f32 / orig_w;
    let height = ((orig_h * scale) as u32).max(1);
    let height = height + (height % 2);

    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| QuickviewError::internal("invalid SVG raster size"))?;
    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, height as f32 / orig_h),
        &mut pixmap.as_mut(),
    );

    let rgba: Vec<u8> = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();

    Ok((
        PixelGrid::from_rgba(width, height, &rgba, DARK_BACKGROUND),
        (orig_w.round() as u32, orig_h.round() as u32),
    ))
}

/// Load an SVG file
pub fn load(path: &Path, config: &ConfigFile) -> Result<Preview> {
    let data = std::fs::read(path)?;
    let (grid, (orig_w, orig_h)) = rasterize(&data, config.image.svg_width)?;
    let caption = format!(
        "SVG: {}x{} → {}x{}",
        orig_w,
        orig_h,
        grid.width(),
        grid.height()
    );
    Ok(Preview::Canvas(CanvasPreview::new(
        caption,
        CanvasBody::HalfBlock(grid),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED_SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="10">
        <rect x="0" y="0" width="20" height="10" fill="#ff0000"/>
    </svg>"##;

    #[test]
    fn test_rasterize_scales_to_width() {
        let (grid, orig) = rasterize(RED_SQUARE.as_bytes(), 10).unwrap();
        assert_eq!(orig, (20, 10));
        assert_eq!((grid.width(), grid.height()), (10, 6));
        assert_eq!(grid.get(5, 2), (255, 0, 0));
    }

    #[test]
    fn test_transparent_blends_onto_dark_background() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="4"></svg>"#;
        let (grid, _) = rasterize(svg.as_bytes(), 4).unwrap();
        assert_eq!(grid.get(0, 0), (30, 30, 30));
    }

    #[test]
    fn test_invalid_svg() {
        assert!(matches!(
            rasterize(b"<not-svg", 10),
            Err(QuickviewError::Decode { .. })
        ));
    }
}
