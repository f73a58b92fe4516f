//! Rendering helpers for the event loop

use ratatui::prelude::*;

use crate::core::AppState;
use crate::render::{render_footer, render_header, Preview};

/// Header, preview body and footer areas of a frame
pub fn frame_layout(area: Rect) -> [Rect; 3] {
    Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(area)
}

/// Render a complete frame
pub fn render_frame(frame: &mut Frame, state: &AppState, preview: &mut Preview) {
    let [header, body, footer] = frame_layout(frame.area());

    render_header(frame, state, header);
    preview.render(frame, body, &state.filename);
    render_footer(frame, state, preview, footer);
}
