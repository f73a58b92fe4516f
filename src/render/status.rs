//! Header and footer bars

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::core::{AppState, Notice, NoticeLevel};
use crate::render::preview::Preview;

/// Key hints for the active preview kind
pub fn key_hints(preview: &Preview) -> &'static str {
    match preview {
        Preview::Table(_) => "↑↓ rows  ←→ columns  PgUp/PgDn  g/G  q quit",
        Preview::Tabs(_) => "Tab/Shift+Tab pages  ↑↓ scroll  PgUp/PgDn  q quit",
        Preview::Text(_) | Preview::Canvas(_) => "↑↓←→ scroll  PgUp/PgDn  g/G  q quit",
        Preview::Animation(_) => "Space pause  ↑↓←→ scroll  q quit",
        Preview::Error(_) => "q quit",
    }
}

fn notice_style(level: NoticeLevel) -> Style {
    match level {
        NoticeLevel::Info => Style::default().fg(Color::Green),
        NoticeLevel::Warning => Style::default().fg(Color::Yellow),
        NoticeLevel::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    }
}

/// Render the header: title on the left, viewer name on the right
pub fn render_header(frame: &mut Frame, state: &AppState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(24)])
        .split(area);

    let bar = Style::default().bg(Color::Blue).fg(Color::White);
    let title = Paragraph::new(Line::from(Span::styled(
        format!(" {}", state.title()),
        Style::default().add_modifier(Modifier::BOLD),
    )))
    .style(bar);
    frame.render_widget(title, chunks[0]);

    let viewer = Paragraph::new(format!("[{}] ", state.viewer_name))
        .style(bar)
        .alignment(Alignment::Right);
    frame.render_widget(viewer, chunks[1]);
}

/// Render the footer: key hints, then the notice if any
pub fn render_footer(frame: &mut Frame, state: &AppState, preview: &Preview, area: Rect) {
    let mut spans = vec![Span::styled(
        format!(" {}", key_hints(preview)),
        Style::default().fg(Color::DarkGray),
    )];
    if let Some(Notice { level, text }) = &state.message {
        spans.push(Span::raw("  │  "));
        spans.push(Span::styled(text.clone(), notice_style(*level)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
