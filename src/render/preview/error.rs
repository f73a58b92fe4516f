//! Inline error panel

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::error::QuickviewError;

/// A load failure shown in place of the preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorPreview {
    pub message: String,
    pub hint: Option<String>,
}

impl ErrorPreview {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            hint: None,
        }
    }
}

impl From<&QuickviewError> for ErrorPreview {
    fn from(err: &QuickviewError) -> Self {
        Self {
            message: err.to_string(),
            hint: err.hint(),
        }
    }
}

/// Render error preview
pub fn render_error_preview(frame: &mut Frame, preview: &ErrorPreview, area: Rect, title: &str) {
    let mut lines = vec![Line::from(Span::styled(
        format!("Error: {}", preview.message),
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    ))];

    if let Some(hint) = &preview.hint {
        lines.push(Line::default());
        for (i, hint_line) in hint.lines().enumerate() {
            let style = if i == 0 {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            lines.push(Line::from(Span::styled(hint_line.to_string(), style)));
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title))
        .border_style(Style::default().fg(Color::Red));
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(block),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tool_carries_hint() {
        let preview = ErrorPreview::from(&QuickviewError::missing_tool("ffmpeg"));
        assert_eq!(preview.message, "ffmpeg not found");
        assert!(preview.hint.as_deref().unwrap_or("").contains("brew install ffmpeg"));
    }

    #[test]
    fn test_decode_error_has_no_hint() {
        let preview = ErrorPreview::from(&QuickviewError::decode("PDF", "bad xref"));
        assert_eq!(preview.message, "Error loading PDF: bad xref");
        assert!(preview.hint.is_none());
    }
}
