//! Pixel canvas (images, SVG)

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::common::{apply_scroll, get_border_style, HORIZONTAL_STEP};
use crate::core::ScrollState;
use crate::handler::KeyAction;
use crate::render::halfblock::PixelGrid;

/// What the canvas draws
#[derive(Debug, Clone)]
pub enum CanvasBody {
    /// True-color half-block cells
    HalfBlock(PixelGrid),
    /// Grayscale character art
    Ascii(Vec<String>),
}

impl CanvasBody {
    /// Terminal rows needed
    pub fn rows(&self) -> usize {
        match self {
            CanvasBody::HalfBlock(grid) => grid.cell_rows(),
            CanvasBody::Ascii(lines) => lines.len(),
        }
    }

    /// Terminal columns needed
    pub fn cols(&self) -> usize {
        match self {
            CanvasBody::HalfBlock(grid) => grid.width() as usize,
            CanvasBody::Ascii(lines) => lines.iter().map(|l| l.chars().count()).max().unwrap_or(0),
        }
    }

    /// Lines for rows `start..start + height`, skipping `skip` columns
    pub fn lines(&self, start: usize, height: usize, skip: usize, width: usize) -> Vec<Line<'static>> {
        let end = (start + height).min(self.rows());
        match self {
            CanvasBody::HalfBlock(grid) => (start..end)
                .map(|row| grid.halfblock_line(row, skip, width))
                .collect(),
            CanvasBody::Ascii(lines) => lines[start..end]
                .iter()
                .map(|l| Line::from(l.chars().skip(skip).take(width).collect::<String>()))
                .collect(),
        }
    }
}

/// Static picture with a caption line
#[derive(Debug, Clone)]
pub struct CanvasPreview {
    pub caption: String,
    pub body: CanvasBody,
    pub scroll: ScrollState,
    pub hscroll: ScrollState,
}

impl CanvasPreview {
    pub fn new(caption: impl Into<String>, body: CanvasBody) -> Self {
        Self {
            caption: caption.into(),
            scroll: ScrollState::viewport(body.rows()),
            hscroll: ScrollState::viewport(body.cols()),
            body,
        }
    }

    pub fn navigate(&mut self, action: KeyAction) {
        apply_scroll(&mut self.scroll, &mut self.hscroll, action, HORIZONTAL_STEP);
    }
}

/// Caption style shared with the animation widget
pub fn caption_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Render a caption line above a canvas body; returns the body area
pub fn render_caption(frame: &mut Frame, caption: &str, area: Rect) -> Rect {
    let chunks = Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).split(area);
    frame.render_widget(Paragraph::new(caption.to_string()).style(caption_style()), chunks[0]);
    chunks[1]
}

/// Render canvas preview
pub fn render_canvas_preview(frame: &mut Frame, preview: &mut CanvasPreview, area: Rect, title: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title))
        .border_style(get_border_style());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let body_area = render_caption(frame, &preview.caption, inner);
    preview.scroll.set_viewport(body_area.height as usize);
    preview.hscroll.set_viewport(body_area.width as usize);

    let lines = preview.body.lines(
        preview.scroll.position(),
        body_area.height as usize,
        preview.hscroll.position(),
        body_area.width as usize,
    );
    frame.render_widget(Paragraph::new(lines), body_area);
}
