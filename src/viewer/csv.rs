//! CSV / TSV viewer

use std::path::Path;

use crate::app::config_file::ConfigFile;
use crate::error::{QuickviewError, Result};
use crate::render::preview::{Preview, TablePreview};

use super::extension_of;

/// Field delimiter for a path: tab for `.tsv`, comma otherwise
pub fn delimiter_for(path: &Path) -> u8 {
    match extension_of(path).as_deref() {
        Some("tsv") => b'\t',
        _ => b',',
    }
}

/// Header cell text; blanks become `Col N` (1-based)
fn header_name(index: usize, raw: &str) -> String {
    if raw.is_empty() {
        format!("Col {}", index + 1)
    } else {
        raw.to_string()
    }
}

/// Split delimited bytes into a header and data rows
pub fn parse(bytes: &[u8], delimiter: u8) -> Result<(Vec<String>, Vec<Vec<String>>)> {
    let mut reader = ::csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut records = reader.byte_records();
    let headers = match records.next() {
        Some(first) => first
            .map_err(|e| QuickviewError::decode("CSV", e))?
            .iter()
            .enumerate()
            .map(|(i, cell)| header_name(i, &String::from_utf8_lossy(cell)))
            .collect(),
        None => return Ok((Vec::new(), Vec::new())),
    };

    let rows = records
        .map(|record| {
            record
                .map(|r| {
                    r.iter()
                        .map(|cell| String::from_utf8_lossy(cell).into_owned())
                        .collect()
                })
                .map_err(|e| QuickviewError::decode("CSV", e))
        })
        .collect::<Result<Vec<Vec<String>>>>()?;

    Ok((headers, rows))
}

/// Load a delimited file as a table
pub fn load(path: &Path, config: &ConfigFile) -> Result<Preview> {
    let bytes = std::fs::read(path)?;
    let (headers, rows) = parse(&bytes, delimiter_for(path))?;
    tracing::debug!(columns = headers.len(), rows = rows.len(), "parsed delimited file");

    Ok(Preview::Table(
        TablePreview::new(headers, rows).with_zebra(config.preview.zebra_stripes),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delimiter_by_extension() {
        assert_eq!(delimiter_for(Path::new("a.tsv")), b'\t');
        assert_eq!(delimiter_for(Path::new("a.TSV")), b'\t');
        assert_eq!(delimiter_for(Path::new("a.csv")), b',');
    }

    #[test]
    fn test_blank_headers_are_named() {
        let (headers, rows) = parse(b"name,,age\nann,x,3\n", b',').unwrap();
        assert_eq!(headers, vec!["name", "Col 2", "age"]);
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_ragged_rows_are_accepted() {
        let (headers, rows) = parse(b"a,b\n1\n1,2,3\n", b',').unwrap();
        assert_eq!(headers.len(), 2);
        assert_eq!(rows[0].len(), 1);
        assert_eq!(rows[1].len(), 3);
    }

    #[test]
    fn test_quoted_fields() {
        let (_, rows) = parse(b"a,b\n\"x, y\",\"he said \"\"hi\"\"\"\n", b',').unwrap();
        assert_eq!(rows[0], vec!["x, y", "he said \"hi\""]);
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let (headers, _) = parse(b"caf\xe9\n", b',').unwrap();
        assert_eq!(headers, vec!["caf\u{FFFD}"]);
    }

    #[test]
    fn test_empty_input() {
        let (headers, rows) = parse(b"", b',').unwrap();
        assert!(headers.is_empty());
        assert!(rows.is_empty());
    }

    #[test]
    fn test_tab_delimited() {
        let (headers, rows) = parse(b"a\tb\n1\t2\n", b'\t').unwrap();
        assert_eq!(headers, vec!["a", "b"]);
        assert_eq!(rows[0], vec!["1", "2"]);
    }
}
