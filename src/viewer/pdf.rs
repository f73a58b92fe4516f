//! PDF viewer: extracted text, one tab per page

use std::path::Path;

use lopdf::{Dictionary, Document, Object, ObjectId};
use ratatui::style::{Color, Style};

use crate::core::Notice;
use crate::error::{QuickviewError, Result};
use crate::render::preview::text::{dim_style, heading_style};
use crate::render::preview::{Page, Preview, StyledLine, TabbedPreview, TextPreview};

use super::Loaded;

/// Parent links followed when looking for inherited resources
const MAX_INHERIT_DEPTH: usize = 32;

const IMAGE_ONLY_MESSAGE: &str =
    "⚠ This page contains images only - text extraction not supported.";
const OCR_HINT: &str = "   Consider using OCR software for scanned documents.";

/// Resolve a reference (or inline object) to a dictionary
fn resolve_dict<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Dictionary> {
    let (_, obj) = doc.dereference(obj).ok()?;
    obj.as_dict().ok()
}

fn resources_have_images(doc: &Document, resources: &Dictionary) -> bool {
    let Some(xobjects) = resources
        .get(b"XObject")
        .ok()
        .and_then(|o| resolve_dict(doc, o))
    else {
        return false;
    };

    xobjects.iter().any(|(_, obj)| match doc.dereference(obj) {
        Ok((_, Object::Stream(stream))) => {
            stream.dict.get(b"Subtype").and_then(Object::as_name).ok() == Some(b"Image".as_slice())
        }
        _ => false,
    })
}

/// Whether a page (or an ancestor it inherits resources from) uses image XObjects
pub fn page_has_images(doc: &Document, page_id: ObjectId) -> bool {
    let mut current = doc.get_dictionary(page_id).ok();
    for _ in 0..MAX_INHERIT_DEPTH {
        let Some(dict) = current else {
            break;
        };
        if let Some(resources) = dict.get(b"Resources").ok().and_then(|o| resolve_dict(doc, o)) {
            if resources_have_images(doc, resources) {
                return true;
            }
        }
        current = dict.get(b"Parent").ok().and_then(|o| resolve_dict(doc, o));
    }
    false
}

/// Styled lines for one page
pub fn page_lines(text: &str, has_images: bool, page_num: usize, total: usize) -> Vec<StyledLine> {
    let mut lines = vec![
        StyledLine::styled(format!("─── Page {} of {} ───", page_num, total), heading_style()),
        StyledLine::blank(),
    ];

    if text.trim().is_empty() {
        if has_images {
            let warn = Style::default().fg(Color::Yellow);
            lines.push(StyledLine::styled(IMAGE_ONLY_MESSAGE, warn));
            lines.push(StyledLine::styled(OCR_HINT, warn));
        } else {
            lines.push(StyledLine::styled("<Empty page>", dim_style()));
        }
    } else {
        lines.extend(text.lines().map(StyledLine::plain));
    }
    lines
}

/// Footer warning for documents with little extractable text
pub fn empty_page_notice(empty: usize, total: usize) -> Option<Notice> {
    if total == 0 {
        None
    } else if empty == total {
        Some(Notice::warning(
            "This PDF appears to be image-based (scanned). Text extraction is not supported.",
        ))
    } else if empty * 2 > total {
        Some(Notice::warning(format!(
            "{} of {} pages have no extractable text.",
            empty, total
        )))
    } else {
        None
    }
}

/// Load a PDF
pub fn load(path: &Path) -> Result<Loaded> {
    let doc = Document::load(path).map_err(|e| QuickviewError::decode("PDF", e))?;
    let pages = doc.get_pages();
    let total = pages.len();

    if total == 0 {
        let text = TextPreview::from_lines(vec![StyledLine::styled("<No pages>", dim_style())]);
        return Ok(Preview::Text(text).into());
    }

    let mut empty = 0usize;
    let mut tabs = Vec::with_capacity(total);
    for (index, (&page_num, &page_id)) in pages.iter().enumerate() {
        let text = doc.extract_text(&[page_num]).unwrap_or_else(|e| {
            tracing::warn!(page = page_num, error = %e, "text extraction failed");
            String::new()
        });
        let has_images = text.trim().is_empty() && page_has_images(&doc, page_id);
        if text.trim().is_empty() {
            empty += 1;
        }

        let lines = page_lines(&text, has_images, index + 1, total);
        tabs.push(Page::text(format!("Page {}", index + 1), TextPreview::from_lines(lines)));
    }

    tracing::debug!(pages = total, empty, "extracted pdf text");
    Ok(Loaded::with_notice(
        Preview::Tabs(TabbedPreview::new(tabs)),
        empty_page_notice(empty, total),
    ))
}
