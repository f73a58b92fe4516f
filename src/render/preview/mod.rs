//! Generic preview widgets
//!
//! Every viewer maps its decoded file onto one of these:
//! - Tables (CSV, archive listings)
//! - Tabbed pages of tables or text (spreadsheets, PDFs)
//! - Scrollable styled text (plain text, documents, waveforms)
//! - Pixel canvases (images, SVG)
//! - Frame animations (video)
//! - Inline errors

pub mod animation;
pub mod canvas;
pub mod common;
pub mod error;
pub mod table;
pub mod tabs;
pub mod text;

use std::time::Instant;

use ratatui::{layout::Rect, Frame};

use crate::handler::KeyAction;

pub use animation::{render_animation_preview, AnimationPreview};
pub use canvas::{render_canvas_preview, CanvasBody, CanvasPreview};
pub use common::{format_size, format_thousands, get_border_style};
pub use error::{render_error_preview, ErrorPreview};
pub use table::{render_table_preview, TablePreview};
pub use tabs::{render_tabbed_preview, Page, PageBody, TabbedPreview};
pub use text::{render_text_preview, StyledLine, StyledSegment, TextPreview};

/// A decoded file ready for display
#[derive(Debug, Clone)]
pub enum Preview {
    Table(TablePreview),
    Tabs(TabbedPreview),
    Text(TextPreview),
    Canvas(CanvasPreview),
    Animation(AnimationPreview),
    Error(ErrorPreview),
}

impl Preview {
    /// Short kind label used in logs and tests
    pub fn kind(&self) -> &'static str {
        match self {
            Preview::Table(_) => "table",
            Preview::Tabs(_) => "tabs",
            Preview::Text(_) => "text",
            Preview::Canvas(_) => "canvas",
            Preview::Animation(_) => "animation",
            Preview::Error(_) => "error",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Preview::Error(_))
    }

    /// Route a navigation action to the widget
    pub fn navigate(&mut self, action: KeyAction) {
        match self {
            Preview::Table(p) => p.navigate(action),
            Preview::Tabs(p) => p.navigate(action),
            Preview::Text(p) => p.navigate(action),
            Preview::Canvas(p) => p.navigate(action),
            Preview::Animation(p) => p.navigate(action),
            Preview::Error(_) => {}
        }
    }

    /// Advance time-based content; returns true when a redraw is needed
    pub fn tick(&mut self, now: Instant) -> bool {
        match self {
            Preview::Animation(p) => p.tick(now),
            _ => false,
        }
    }

    /// Draw into `area`
    pub fn render(&mut self, frame: &mut Frame, area: Rect, title: &str) {
        match self {
            Preview::Table(p) => render_table_preview(frame, p, area, title),
            Preview::Tabs(p) => render_tabbed_preview(frame, p, area, title),
            Preview::Text(p) => render_text_preview(frame, p, area, title),
            Preview::Canvas(p) => render_canvas_preview(frame, p, area, title),
            Preview::Animation(p) => render_animation_preview(frame, p, area, title),
            Preview::Error(p) => render_error_preview(frame, p, area, title),
        }
    }
}
