//! Looping frame animation (video previews)

use std::time::{Duration, Instant};

use ratatui::{
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::canvas::render_caption;
use super::common::{apply_scroll, get_border_style, HORIZONTAL_STEP};
use crate::core::ScrollState;
use crate::handler::KeyAction;
use crate::render::halfblock::PixelGrid;

/// Frames shown one after another at a fixed interval
#[derive(Debug, Clone)]
pub struct AnimationPreview {
    pub caption: String,
    pub frames: Vec<PixelGrid>,
    pub interval: Duration,
    pub paused: bool,
    current: usize,
    last_switch: Instant,
    pub scroll: ScrollState,
    pub hscroll: ScrollState,
}

impl AnimationPreview {
    pub fn new(caption: impl Into<String>, frames: Vec<PixelGrid>, interval: Duration) -> Self {
        let rows = frames.iter().map(PixelGrid::cell_rows).max().unwrap_or(0);
        let cols = frames.iter().map(|f| f.width() as usize).max().unwrap_or(0);
        Self {
            caption: caption.into(),
            frames,
            interval,
            paused: false,
            current: 0,
            last_switch: Instant::now(),
            scroll: ScrollState::viewport(rows),
            hscroll: ScrollState::viewport(cols),
        }
    }

    /// Index of the frame on screen
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn current_frame(&self) -> Option<&PixelGrid> {
        self.frames.get(self.current)
    }

    /// Advance to the next frame if the interval has elapsed; returns true
    /// when a redraw is needed
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.paused || self.frames.len() < 2 {
            return false;
        }
        if now.saturating_duration_since(self.last_switch) < self.interval {
            return false;
        }
        self.current = (self.current + 1) % self.frames.len();
        self.last_switch = now;
        true
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        self.last_switch = Instant::now();
    }

    pub fn navigate(&mut self, action: KeyAction) {
        match action {
            KeyAction::TogglePause => self.toggle_pause(),
            _ => apply_scroll(&mut self.scroll, &mut self.hscroll, action, HORIZONTAL_STEP),
        }
    }
}

/// Render animation preview
pub fn render_animation_preview(
    frame: &mut Frame,
    preview: &mut AnimationPreview,
    area: Rect,
    title: &str,
) {
    let state = if preview.paused { " [paused]" } else { "" };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(
            " {} ({}/{}){} ",
            title,
            preview.current + 1,
            preview.frames.len(),
            state
        ))
        .border_style(get_border_style());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let body_area = render_caption(frame, &preview.caption, inner);
    preview.scroll.set_viewport(body_area.height as usize);
    preview.hscroll.set_viewport(body_area.width as usize);

    let Some(grid) = preview.frames.get(preview.current) else {
        return;
    };
    let start = preview.scroll.position();
    let end = (start + body_area.height as usize).min(grid.cell_rows());
    let lines: Vec<Line> = (start..end)
        .map(|row| grid.halfblock_line(row, preview.hscroll.position(), body_area.width as usize))
        .collect();
    frame.render_widget(Paragraph::new(lines), body_area);
}
