//! Half-block rendering of true-color pixel grids
//!
//! Two vertically stacked pixels share one terminal cell: the top pixel is
//! the foreground of `▀`, the bottom pixel its background. Source images are
//! reduced by area averaging before they reach the cell mapping.

use image::DynamicImage;
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

/// Upper half block glyph
pub const UPPER_HALF_BLOCK: &str = "\u{2580}";

/// Grayscale ramp used by the ASCII image mode (dark to bright)
pub const ASCII_RAMP: &[u8] = b" .:-=+*#%@";

/// Background value transparent pixels are blended onto
pub const DARK_BACKGROUND: u8 = 30;

pub type Rgb = (u8, u8, u8);

/// Owned RGB raster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl PixelGrid {
    /// Build a grid from row-major pixels; missing pixels are black
    pub fn new(width: u32, height: u32, mut pixels: Vec<Rgb>) -> Self {
        pixels.resize((width as usize) * (height as usize), (0, 0, 0));
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Build a grid from straight (non-premultiplied) RGBA bytes,
    /// blending translucent pixels onto `background`
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8], background: u8) -> Self {
        let pixels = rgba
            .chunks_exact(4)
            .map(|px| {
                let a = px[3] as u32;
                if a == 255 {
                    (px[0], px[1], px[2])
                } else {
                    let bg = background as u32 * (255 - a);
                    (
                        ((px[0] as u32 * a + bg) / 255) as u8,
                        ((px[1] as u32 * a + bg) / 255) as u8,
                        ((px[2] as u32 * a + bg) / 255) as u8,
                    )
                }
            })
            .collect();
        Self::new(width, height, pixels)
    }

    /// Build a grid from a decoded image, blending alpha onto the dark background
    pub fn from_image(img: &DynamicImage) -> Self {
        let rgba = img.to_rgba8();
        Self::from_rgba(rgba.width(), rgba.height(), rgba.as_raw(), DARK_BACKGROUND)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Pixel at (x, y); out of range reads as black
    pub fn get(&self, x: u32, y: u32) -> Rgb {
        if x >= self.width || y >= self.height {
            return (0, 0, 0);
        }
        self.pixels[(y * self.width + x) as usize]
    }

    /// Height that keeps the aspect ratio at `target_width` columns,
    /// rounded up to an even number so every cell has two pixels
    pub fn fitted_height(&self, target_width: u32) -> u32 {
        if self.is_empty() {
            return 0;
        }
        let h = (target_width as u64 * self.height as u64 / self.width as u64) as u32;
        let h = h.max(1);
        h + (h % 2)
    }

    /// Resize to `target_width` columns for half-block display
    pub fn fit_width(&self, target_width: u32) -> PixelGrid {
        let height = self.fitted_height(target_width);
        self.resize(target_width, height)
    }

    /// Resize by averaging the source block behind every target pixel
    pub fn resize(&self, target_width: u32, target_height: u32) -> PixelGrid {
        if self.is_empty() || target_width == 0 || target_height == 0 {
            return PixelGrid::new(0, 0, Vec::new());
        }

        let mut pixels = Vec::with_capacity((target_width * target_height) as usize);
        for ty in 0..target_height {
            let y_start = (ty as u64 * self.height as u64 / target_height as u64) as u32;
            let y_end = ((ty as u64 + 1) * self.height as u64 / target_height as u64) as u32;
            for tx in 0..target_width {
                let x_start = (tx as u64 * self.width as u64 / target_width as u64) as u32;
                let x_end = ((tx as u64 + 1) * self.width as u64 / target_width as u64) as u32;
                pixels.push(self.area_average(x_start, x_end, y_start, y_end));
            }
        }

        PixelGrid::new(target_width, target_height, pixels)
    }

    /// Calculate area average for a rectangular region
    fn area_average(&self, x_start: u32, x_end: u32, y_start: u32, y_end: u32) -> Rgb {
        let x_start = x_start.min(self.width - 1);
        let x_end = x_end.min(self.width).max(x_start + 1);
        let y_start = y_start.min(self.height - 1);
        let y_end = y_end.min(self.height).max(y_start + 1);

        let mut r_sum: u64 = 0;
        let mut g_sum: u64 = 0;
        let mut b_sum: u64 = 0;
        let mut count: u64 = 0;

        for y in y_start..y_end {
            for x in x_start..x_end {
                let (r, g, b) = self.pixels[(y * self.width + x) as usize];
                r_sum += r as u64;
                g_sum += g as u64;
                b_sum += b as u64;
                count += 1;
            }
        }

        (
            (r_sum / count) as u8,
            (g_sum / count) as u8,
            (b_sum / count) as u8,
        )
    }

    /// Number of terminal rows in half-block form
    pub fn cell_rows(&self) -> usize {
        (self.height as usize).div_ceil(2)
    }

    /// One terminal row of half-block cells, starting at column `skip`
    pub fn halfblock_line(&self, row: usize, skip: usize, max_cols: usize) -> Line<'static> {
        let top_y = (row * 2) as u32;
        // Odd heights repeat the last pixel row
        let bottom_y = (top_y + 1).min(self.height.saturating_sub(1));

        let spans: Vec<Span<'static>> = (skip as u32..self.width)
            .take(max_cols)
            .map(|x| {
                let (r1, g1, b1) = self.get(x, top_y);
                let (r2, g2, b2) = self.get(x, bottom_y);
                Span::styled(
                    UPPER_HALF_BLOCK,
                    Style::default()
                        .fg(Color::Rgb(r1, g1, b1))
                        .bg(Color::Rgb(r2, g2, b2)),
                )
            })
            .collect();

        Line::from(spans)
    }

    /// All rows in half-block form
    pub fn to_halfblock_lines(&self) -> Vec<Line<'static>> {
        (0..self.cell_rows())
            .map(|row| self.halfblock_line(row, 0, self.width as usize))
            .collect()
    }

    /// Grayscale ASCII rendering, one character per pixel
    pub fn to_ascii_lines(&self) -> Vec<String> {
        (0..self.height)
            .map(|y| {
                (0..self.width)
                    .map(|x| ascii_for(luma(self.get(x, y))))
                    .collect()
            })
            .collect()
    }
}

/// ITU-R 601 luma, as used by common grayscale conversions
pub fn luma((r, g, b): Rgb) -> u8 {
    ((r as u32 * 299 + g as u32 * 587 + b as u32 * 114) / 1000) as u8
}

/// Map a gray level onto the ASCII ramp
pub fn ascii_for(gray: u8) -> char {
    let idx = (gray as usize * ASCII_RAMP.len() / 256).min(ASCII_RAMP.len() - 1);
    ASCII_RAMP[idx] as char
}
