//! Scrollable text widget with optional syntax highlighting

use std::path::Path;
use std::sync::OnceLock;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use super::common::{apply_scroll, get_border_style, HORIZONTAL_STEP};
use crate::core::ScrollState;
use crate::handler::KeyAction;

/// Lazy-initialized syntax set (100+ languages)
static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();

/// Lazy-initialized theme (base16-ocean.dark)
static THEME: OnceLock<Theme> = OnceLock::new();

fn get_syntax_set() -> &'static SyntaxSet {
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn get_theme() -> &'static Theme {
    THEME.get_or_init(|| {
        let mut ts = ThemeSet::load_defaults();
        ts.themes
            .remove("base16-ocean.dark")
            .unwrap_or_default()
    })
}

/// A segment of styled text
#[derive(Debug, Clone, PartialEq)]
pub struct StyledSegment {
    pub text: String,
    pub style: Style,
}

/// A line made of styled segments
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyledLine {
    pub segments: Vec<StyledSegment>,
}

/// Columns between tab stops
pub const TAB_WIDTH: usize = 4;

/// Make text safe for a terminal cell buffer, starting at column `col`.
/// Tabs expand to the next tab stop; other control characters use caret
/// notation (`ESC` becomes `^[`).
pub fn expand_controls(text: &str, mut col: usize) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '\t' => {
                let pad = TAB_WIDTH - col % TAB_WIDTH;
                out.extend(std::iter::repeat_n(' ', pad));
                col += pad;
            }
            '\u{7f}' => {
                out.push_str("^?");
                col += 2;
            }
            c if (c as u32) < 0x20 => {
                out.push('^');
                out.push((b'@' + c as u8) as char);
                col += 2;
            }
            // C1 controls have no glyph either
            c if c.is_control() => {
                out.push('\u{FFFD}');
                col += 1;
            }
            c => {
                out.push(c);
                col += 1;
            }
        }
    }
    out
}

impl StyledLine {
    /// Unstyled line
    pub fn plain(text: impl Into<String>) -> Self {
        Self::styled(text, Style::default())
    }

    /// Line with a single style
    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        let mut line = Self::blank();
        line.push(text, style);
        line
    }

    /// Empty line
    pub fn blank() -> Self {
        Self::default()
    }

    /// Append a segment; tabs and control characters are expanded here
    pub fn push(&mut self, text: impl Into<String>, style: Style) {
        let mut text = text.into();
        if text.chars().any(char::is_control) {
            text = expand_controls(&text, self.width());
        }
        self.segments.push(StyledSegment { text, style });
    }

    /// Concatenated text without styling
    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    /// Width in characters
    pub fn width(&self) -> usize {
        self.segments.iter().map(|s| s.text.chars().count()).sum()
    }

    /// Convert to a ratatui line, dropping the first `skip` characters
    pub fn to_line(&self, skip: usize) -> Line<'static> {
        let mut remaining = skip;
        let mut spans = Vec::with_capacity(self.segments.len());
        for seg in &self.segments {
            let len = seg.text.chars().count();
            if remaining >= len {
                remaining -= len;
                continue;
            }
            let text: String = seg.text.chars().skip(remaining).collect();
            remaining = 0;
            spans.push(Span::styled(text, seg.style));
        }
        Line::from(spans)
    }
}

/// Heading style used by document-like viewers
pub fn heading_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Dim style used for rules and placeholders
pub fn dim_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Text preview content
#[derive(Debug, Clone)]
pub struct TextPreview {
    pub lines: Vec<StyledLine>,
    /// Prefix each line with its number
    pub line_numbers: bool,
    pub scroll: ScrollState,
    pub hscroll: ScrollState,
}

impl TextPreview {
    /// Build from pre-styled lines
    pub fn from_lines(lines: Vec<StyledLine>) -> Self {
        let widest = lines.iter().map(StyledLine::width).max().unwrap_or(0);
        Self {
            scroll: ScrollState::viewport(lines.len()),
            hscroll: ScrollState::viewport(widest),
            lines,
            line_numbers: false,
        }
    }

    /// Plain text without highlighting
    pub fn new(content: &str) -> Self {
        Self::from_lines(content.lines().map(StyledLine::plain).collect())
    }

    /// Text with syntax highlighting based on file extension (falls back to plain)
    pub fn with_highlighting(content: &str, path: &Path) -> Self {
        match highlight_content(content, path) {
            Some(lines) => Self::from_lines(lines),
            None => Self::new(content),
        }
    }

    /// Enable line numbers
    pub fn numbered(mut self) -> Self {
        self.line_numbers = true;
        self
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn navigate(&mut self, action: KeyAction) {
        apply_scroll(&mut self.scroll, &mut self.hscroll, action, HORIZONTAL_STEP);
    }
}

/// Perform syntax highlighting on content based on file extension
fn highlight_content(content: &str, path: &Path) -> Option<Vec<StyledLine>> {
    let ss = get_syntax_set();
    let theme = get_theme();

    // Detect syntax from file extension or first line (shebang)
    let syntax = path
        .extension()
        .and_then(|e| e.to_str())
        .and_then(|ext| ss.find_syntax_by_extension(ext))
        .or_else(|| ss.find_syntax_by_first_line(content.lines().next().unwrap_or("")))?;

    let mut h = HighlightLines::new(syntax, theme);
    let mut styled_lines = Vec::new();

    for line in LinesWithEndings::from(content) {
        let ranges = h.highlight_line(line, ss).ok()?;
        let mut styled = StyledLine::blank();
        for (style, text) in ranges {
            let text = text.trim_end_matches(['\n', '\r']);
            if text.is_empty() {
                continue;
            }
            styled.push(
                text,
                Style::default().fg(Color::Rgb(
                    style.foreground.r,
                    style.foreground.g,
                    style.foreground.b,
                )),
            );
        }
        styled_lines.push(styled);
    }

    Some(styled_lines)
}

/// Lines of a text preview for the given viewport, without any block
pub fn visible_text_lines(preview: &TextPreview, height: usize) -> Vec<Line<'static>> {
    let start = preview.scroll.position();
    let end = (start + height).min(preview.lines.len());
    let skip = preview.hscroll.position();

    preview.lines[start..end]
        .iter()
        .enumerate()
        .map(|(i, styled_line)| {
            let mut line = styled_line.to_line(skip);
            if preview.line_numbers {
                let mut spans = vec![Span::styled(
                    format!("{:5} │ ", start + i + 1),
                    Style::default().fg(Color::DarkGray),
                )];
                spans.append(&mut line.spans);
                line = Line::from(spans);
            }
            line
        })
        .collect()
}

/// Render text preview
pub fn render_text_preview(frame: &mut Frame, preview: &mut TextPreview, area: Rect, title: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title))
        .border_style(get_border_style());
    let inner = block.inner(area);

    let gutter = if preview.line_numbers { 8 } else { 0 };
    preview.scroll.set_viewport(inner.height as usize);
    preview
        .hscroll
        .set_viewport((inner.width as usize).saturating_sub(gutter));

    let lines = visible_text_lines(preview, inner.height as usize);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
