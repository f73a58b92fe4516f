//! Tabbed pages (spreadsheet sheets, PDF pages)

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::Tabs,
    Frame,
};

use super::table::{render_table_preview, TablePreview};
use super::text::{render_text_preview, TextPreview};
use crate::handler::KeyAction;

/// Content of one tab
#[derive(Debug, Clone)]
pub enum PageBody {
    Table(TablePreview),
    Text(TextPreview),
}

/// A titled page
#[derive(Debug, Clone)]
pub struct Page {
    pub title: String,
    pub body: PageBody,
}

impl Page {
    pub fn table(title: impl Into<String>, table: TablePreview) -> Self {
        Self {
            title: title.into(),
            body: PageBody::Table(table),
        }
    }

    pub fn text(title: impl Into<String>, text: TextPreview) -> Self {
        Self {
            title: title.into(),
            body: PageBody::Text(text),
        }
    }
}

/// Ordered pages with one active at a time
#[derive(Debug, Clone)]
pub struct TabbedPreview {
    pub pages: Vec<Page>,
    active: usize,
}

impl TabbedPreview {
    pub fn new(pages: Vec<Page>) -> Self {
        Self { pages, active: 0 }
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn active_page(&self) -> Option<&Page> {
        self.pages.get(self.active)
    }

    /// Switch to the next page, wrapping around
    pub fn next(&mut self) {
        if !self.pages.is_empty() {
            self.active = (self.active + 1) % self.pages.len();
        }
    }

    /// Switch to the previous page, wrapping around
    pub fn prev(&mut self) {
        if !self.pages.is_empty() {
            self.active = (self.active + self.pages.len() - 1) % self.pages.len();
        }
    }

    /// Tab keys switch pages, everything else goes to the active page
    pub fn navigate(&mut self, action: KeyAction) {
        match action {
            KeyAction::NextTab => self.next(),
            KeyAction::PrevTab => self.prev(),
            _ => {
                if let Some(page) = self.pages.get_mut(self.active) {
                    match &mut page.body {
                        PageBody::Table(table) => table.navigate(action),
                        PageBody::Text(text) => text.navigate(action),
                    }
                }
            }
        }
    }
}

/// Render tabbed preview; a lone page is drawn without the tab bar
pub fn render_tabbed_preview(
    frame: &mut Frame,
    preview: &mut TabbedPreview,
    area: Rect,
    title: &str,
) {
    let body_area = if preview.pages.len() > 1 {
        let chunks = Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).split(area);
        let titles: Vec<Line> = preview
            .pages
            .iter()
            .map(|p| Line::from(p.title.clone()))
            .collect();
        let tabs = Tabs::new(titles)
            .select(preview.active)
            .style(Style::default().fg(Color::DarkGray))
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )
            .divider("│");
        frame.render_widget(tabs, chunks[0]);
        chunks[1]
    } else {
        area
    };

    let active = preview.active;
    let Some(page) = preview.pages.get_mut(active) else {
        return;
    };
    let page_title = if page.title.is_empty() || page.title == title {
        title.to_string()
    } else {
        format!("{} - {}", title, page.title)
    };
    match &mut page.body {
        PageBody::Table(table) => render_table_preview(frame, table, body_area, &page_title),
        PageBody::Text(text) => render_text_preview(frame, text, body_area, &page_title),
    }
}
