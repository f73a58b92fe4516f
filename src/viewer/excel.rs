//! Spreadsheet viewer (xlsx, xls, xlsm, xlsb, ods)

use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};

use crate::app::config_file::ConfigFile;
use crate::error::{QuickviewError, Result};
use crate::render::preview::{Page, Preview, TablePreview, TabbedPreview, TextPreview};

/// Spreadsheet column name for a 0-based index: A..Z, AA, AB, ...
pub fn column_name(index: usize) -> String {
    let mut n = index as i64;
    let mut name = Vec::new();
    while n >= 0 {
        name.push(b'A' + (n % 26) as u8);
        n = n / 26 - 1;
    }
    name.reverse();
    String::from_utf8_lossy(&name).into_owned()
}

/// Cell text; empty cells are blank
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

/// Turn a sheet range into column names and non-empty rows
pub fn sheet_rows(range: &Range<Data>) -> (Vec<String>, Vec<Vec<String>>) {
    // The range starts at its first used cell; keep the sheet's column letters
    let leading = range.start().map(|(_, col)| col as usize).unwrap_or(0);

    let rows: Vec<Vec<String>> = range
        .rows()
        .filter(|row| row.iter().any(|c| !matches!(c, Data::Empty)))
        .map(|row| {
            std::iter::repeat_n(String::new(), leading)
                .chain(row.iter().map(cell_text))
                .collect()
        })
        .collect();

    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    let headers = (0..width).map(column_name).collect();
    (headers, rows)
}

/// Load a workbook, one tab per sheet
pub fn load(path: &Path, config: &ConfigFile) -> Result<Preview> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| QuickviewError::decode("Excel file", e))?;

    let names = workbook.sheet_names().to_vec();
    let mut pages = Vec::with_capacity(names.len());
    for name in names {
        let page = match workbook.worksheet_range(&name) {
            Ok(range) => {
                let (headers, rows) = sheet_rows(&range);
                tracing::debug!(sheet = %name, rows = rows.len(), "decoded sheet");
                let table = TablePreview::new(headers, rows).with_zebra(config.preview.zebra_stripes);
                Page::table(name, table)
            }
            Err(e) => {
                tracing::warn!(sheet = %name, error = %e, "sheet failed to decode");
                let text = TextPreview::new(&format!("Error loading sheet {}: {}", name, e));
                Page::text(name, text)
            }
        };
        pages.push(page);
    }

    Ok(Preview::Tabs(TabbedPreview::new(pages)))
}
