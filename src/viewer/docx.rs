//! Word document viewer

use std::path::Path;

use docx_rs::{
    read_docx, DocumentChild, Paragraph, ParagraphChild, RunChild, Table, TableCellContent,
    TableChild, TableRowChild,
};

use crate::error::{QuickviewError, Result};
use crate::render::preview::text::{dim_style, heading_style};
use crate::render::preview::{Preview, StyledLine, TextPreview};

/// Width of the rule drawn around tables
const TABLE_RULE_WIDTH: usize = 40;

/// Plain text of a paragraph (runs and hyperlinked runs)
fn paragraph_text(para: &Paragraph) -> String {
    let mut out = String::new();
    collect_children(&para.children, &mut out);
    out
}

fn collect_children(children: &[ParagraphChild], out: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => {
                for rc in &run.children {
                    match rc {
                        RunChild::Text(t) => out.push_str(&t.text),
                        RunChild::Tab(_) => out.push('\t'),
                        _ => {}
                    }
                }
            }
            ParagraphChild::Hyperlink(link) => collect_children(&link.children, out),
            _ => {}
        }
    }
}

/// Heading level from a paragraph style id (`Heading2`, `Heading 2`)
pub fn heading_level(style: &str) -> Option<usize> {
    let rest = style.strip_prefix("Heading")?;
    let level = rest
        .chars()
        .last()
        .and_then(|c| c.to_digit(10))
        .map(|d| d as usize)
        .unwrap_or(1);
    Some(level.max(1))
}

fn paragraph_lines(para: &Paragraph, lines: &mut Vec<StyledLine>) {
    let text = paragraph_text(para);
    let text = text.trim();
    if text.is_empty() {
        return;
    }

    let level = para
        .property
        .style
        .as_ref()
        .and_then(|s| heading_level(&s.val));
    match level {
        Some(n) => lines.push(StyledLine::styled(
            format!("{} {}", "#".repeat(n), text),
            heading_style(),
        )),
        None => lines.push(StyledLine::plain(text)),
    }
    lines.push(StyledLine::blank());
}

/// Text of one table cell; multi-paragraph cells are joined with spaces
fn cell_text(contents: &[TableCellContent]) -> String {
    contents
        .iter()
        .filter_map(|c| match c {
            TableCellContent::Paragraph(p) => Some(paragraph_text(p)),
            _ => None,
        })
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn table_lines(table: &Table, lines: &mut Vec<StyledLine>) {
    let rule = "─".repeat(TABLE_RULE_WIDTH);
    lines.push(StyledLine::styled(rule.clone(), dim_style()));
    for TableChild::TableRow(row) in &table.rows {
        let cells: Vec<String> = row
            .cells
            .iter()
            .map(|TableRowChild::TableCell(cell)| cell_text(&cell.children))
            .collect();
        lines.push(StyledLine::plain(cells.join(" │ ")));
    }
    lines.push(StyledLine::styled(rule, dim_style()));
    lines.push(StyledLine::blank());
}

/// Body of a document as styled lines, in document order
pub fn document_lines(bytes: &[u8]) -> Result<Vec<StyledLine>> {
    let docx = read_docx(bytes).map_err(|e| QuickviewError::decode("Word document", e))?;

    let mut lines = Vec::new();
    for child in &docx.document.children {
        match child {
            DocumentChild::Paragraph(para) => paragraph_lines(para, &mut lines),
            DocumentChild::Table(table) => table_lines(table, &mut lines),
            _ => {}
        }
    }

    if lines.is_empty() {
        lines.push(StyledLine::styled("<Empty document>", dim_style()));
    }
    Ok(lines)
}

/// Load a .docx file
pub fn load(path: &Path) -> Result<Preview> {
    let bytes = std::fs::read(path)?;
    let lines = document_lines(&bytes)?;
    Ok(Preview::Text(TextPreview::from_lines(lines)))
}
