//! Row/column table widget (CSV, spreadsheets, archive listings)

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use super::common::{apply_scroll, get_border_style};
use super::text::dim_style;
use crate::core::ScrollState;
use crate::handler::KeyAction;

/// Narrowest automatic column width
pub const MIN_COLUMN_WIDTH: u16 = 3;

/// Widest automatic column width
pub const MAX_COLUMN_WIDTH: u16 = 40;

/// Rows inspected when sizing columns automatically
const WIDTH_SAMPLE_ROWS: usize = 200;

/// Table preview content
#[derive(Debug, Clone)]
pub struct TablePreview {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub widths: Vec<u16>,
    /// Rows drawn in the emphasis style (e.g. directories)
    pub emphasis: Vec<bool>,
    /// Alternate row background
    pub zebra: bool,
    /// Highlighted row
    pub cursor: ScrollState,
    /// First visible column
    pub column: ScrollState,
    /// First visible row
    offset: usize,
}

impl TablePreview {
    /// Build a table; every row is padded or cut to the header width
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let columns = headers.len();
        let rows: Vec<Vec<String>> = rows
            .into_iter()
            .map(|mut row| {
                row.resize(columns, String::new());
                row
            })
            .collect();
        let widths = auto_widths(&headers, &rows);

        Self {
            cursor: ScrollState::cursor(rows.len()),
            column: ScrollState::cursor(columns),
            emphasis: vec![false; rows.len()],
            zebra: false,
            offset: 0,
            widths,
            headers,
            rows,
        }
    }

    /// Use fixed column widths instead of measured ones
    pub fn with_widths(mut self, widths: Vec<u16>) -> Self {
        let mut widths = widths;
        widths.resize(self.headers.len(), MIN_COLUMN_WIDTH);
        self.widths = widths;
        self
    }

    /// Mark rows for the emphasis style
    pub fn with_emphasis(mut self, emphasis: Vec<bool>) -> Self {
        let mut emphasis = emphasis;
        emphasis.resize(self.rows.len(), false);
        self.emphasis = emphasis;
        self
    }

    pub fn with_zebra(mut self, zebra: bool) -> Self {
        self.zebra = zebra;
        self
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.rows.is_empty()
    }

    /// First visible row
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn navigate(&mut self, action: KeyAction) {
        apply_scroll(&mut self.cursor, &mut self.column, action, 1);
    }

    /// Fit the row window to `height` rows, keeping the cursor visible
    pub fn set_viewport(&mut self, height: usize) {
        self.cursor.set_viewport(height);
        let height = height.max(1);
        let cursor = self.cursor.position();
        if cursor < self.offset {
            self.offset = cursor;
        } else if cursor >= self.offset + height {
            self.offset = cursor + 1 - height;
        }
        let last_window = self.rows.len().saturating_sub(height);
        self.offset = self.offset.min(last_window);
    }

    /// Short description for the block title
    pub fn summary(&self) -> String {
        format!("{} rows × {} cols", self.row_count(), self.column_count())
    }
}

/// Measure columns from the header and the first rows, clamped to a sane range
fn auto_widths(headers: &[String], rows: &[Vec<String>]) -> Vec<u16> {
    headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            let widest = rows
                .iter()
                .take(WIDTH_SAMPLE_ROWS)
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0);
            (widest.min(u16::MAX as usize) as u16).clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH)
        })
        .collect()
}

/// Render table preview
pub fn render_table_preview(frame: &mut Frame, preview: &mut TablePreview, area: Rect, title: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ({}) ", title, preview.summary()))
        .border_style(get_border_style());
    let inner = block.inner(area);

    if preview.is_empty() {
        let empty = Paragraph::new("<Empty table>").style(dim_style()).block(block);
        frame.render_widget(empty, area);
        return;
    }

    // One line is taken by the header row
    let body_height = inner.height.saturating_sub(1) as usize;
    preview.set_viewport(body_height);

    let first_col = preview.column.position();
    let header_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let header = Row::new(
        preview.headers[first_col..]
            .iter()
            .map(|h| Cell::from(h.clone())),
    )
    .style(header_style);

    let cursor = preview.cursor.position();
    let rows: Vec<Row> = preview
        .rows
        .iter()
        .enumerate()
        .skip(preview.offset)
        .take(body_height)
        .map(|(idx, row)| {
            let mut style = Style::default();
            if preview.emphasis.get(idx).copied().unwrap_or(false) {
                style = style.fg(Color::Blue).add_modifier(Modifier::BOLD);
            }
            if preview.zebra && idx % 2 == 1 {
                style = style.bg(Color::Rgb(28, 28, 36));
            }
            if idx == cursor {
                style = style.add_modifier(Modifier::REVERSED);
            }
            Row::new(row[first_col..].iter().map(|c| Cell::from(c.clone()))).style(style)
        })
        .collect();

    let widths: Vec<Constraint> = preview.widths[first_col..]
        .iter()
        .map(|w| Constraint::Length(*w))
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(block);
    frame.render_widget(table, area);
}
