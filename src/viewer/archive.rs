//! Archive listing viewer (zip, jar, tar.gz)

use std::fs::File;
use std::path::Path;

use crate::app::config_file::ConfigFile;
use crate::core::Notice;
use crate::error::{QuickviewError, Result};
use crate::render::preview::common::{
    format_size, truncate_entry_name, unix_timestamp_to_datetime,
};
use crate::render::preview::{Preview, TablePreview};

use super::Loaded;

/// Column titles and fixed widths of the listing
const COLUMNS: [(&str, u16); 4] = [("Name", 50), ("Size", 12), ("Compressed", 12), ("Modified", 20)];

/// Archive entry information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Full path within the archive
    pub name: String,
    /// Uncompressed size in bytes
    pub size: u64,
    /// Stored size in bytes (unknown for tar members)
    pub compressed: Option<u64>,
    pub is_dir: bool,
    /// `YYYY-MM-DD HH:MM`
    pub modified: Option<String>,
}

/// Entries plus the totals shown in the footer
#[derive(Debug, Clone, Default)]
pub struct ArchiveListing {
    pub entries: Vec<ArchiveEntry>,
    /// Entries present in the archive, including any past the display cap
    pub total_entries: usize,
    pub total_size: u64,
    /// Sum of stored sizes; `None` when the format does not report them
    pub total_compressed: Option<u64>,
}

impl ArchiveListing {
    /// Record an entry; totals saturate instead of wrapping on hostile headers
    pub fn add(&mut self, entry: ArchiveEntry) {
        self.total_entries += 1;
        self.total_size = self.total_size.saturating_add(entry.size);
        if let Some(compressed) = entry.compressed {
            self.total_compressed =
                Some(self.total_compressed.unwrap_or(0).saturating_add(compressed));
        }
        self.entries.push(entry);
    }

    /// Sort entries by name, then keep the first `max_entries`
    pub fn finish(&mut self, max_entries: usize) {
        self.entries.sort_by(|a, b| a.name.cmp(&b.name));
        self.entries.truncate(max_entries);
    }

    /// `N files, 1.0 MB → 200.0 KB (80.0% saved)`
    pub fn summary(&self) -> String {
        let mut text = match self.total_compressed {
            Some(compressed) => {
                let ratio = if self.total_size > 0 {
                    (1.0 - compressed as f64 / self.total_size as f64) * 100.0
                } else {
                    0.0
                };
                format!(
                    "{} files, {} → {} ({:.1}% saved)",
                    self.total_entries,
                    format_size(self.total_size),
                    format_size(compressed),
                    ratio
                )
            }
            None => format!("{} files, {}", self.total_entries, format_size(self.total_size)),
        };
        if self.entries.len() < self.total_entries {
            text.push_str(&format!(" (showing first {})", self.entries.len()));
        }
        text
    }

    /// Convert to a table with directories emphasised
    pub fn into_table(self, zebra: bool) -> TablePreview {
        let headers = COLUMNS.iter().map(|(name, _)| name.to_string()).collect();
        let widths = COLUMNS.iter().map(|(_, width)| *width).collect();
        let emphasis = self.entries.iter().map(|e| e.is_dir).collect();
        let rows = self
            .entries
            .into_iter()
            .map(|e| {
                vec![
                    e.name,
                    format_size(e.size),
                    e.compressed.map(format_size).unwrap_or_else(|| "-".to_string()),
                    e.modified.unwrap_or_else(|| "-".to_string()),
                ]
            })
            .collect();

        TablePreview::new(headers, rows)
            .with_widths(widths)
            .with_emphasis(emphasis)
            .with_zebra(zebra)
    }
}

/// Check if path is a gzip-compressed tarball
pub fn is_tar_gz_file(path: &Path) -> bool {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    name.ends_with(".tar.gz") || name.ends_with(".tgz")
}

/// List a zip (or jar) archive
pub fn list_zip(path: &Path, max_entries: usize) -> Result<ArchiveListing> {
    let file = File::open(path)?;
    let mut archive = zip::ZipArchive::new(file)
        .map_err(|_| QuickviewError::decode("ZIP", "Invalid or corrupted ZIP file"))?;

    let mut listing = ArchiveListing::default();
    for i in 0..archive.len() {
        let entry = archive
            .by_index_raw(i)
            .map_err(|e| QuickviewError::decode("ZIP", e))?;
        let modified = entry.last_modified().map(|dt| {
            format!(
                "{:04}-{:02}-{:02} {:02}:{:02}",
                dt.year(),
                dt.month(),
                dt.day(),
                dt.hour(),
                dt.minute()
            )
        });

        listing.add(ArchiveEntry {
            name: truncate_entry_name(entry.name().to_string()),
            size: entry.size(),
            compressed: Some(entry.compressed_size()),
            is_dir: entry.is_dir(),
            modified,
        });
    }

    if listing.total_compressed.is_none() {
        listing.total_compressed = Some(0);
    }
    listing.finish(max_entries);
    Ok(listing)
}

/// List a tar.gz archive
pub fn list_tar_gz(path: &Path, max_entries: usize) -> Result<ArchiveListing> {
    let file = File::open(path)?;
    let decompressed = flate2::read::GzDecoder::new(file);
    let mut archive = tar::Archive::new(decompressed);
    let invalid = |e: std::io::Error| QuickviewError::decode("tar.gz", e);

    let mut listing = ArchiveListing::default();
    for entry_result in archive.entries().map_err(invalid)? {
        let entry = entry_result.map_err(invalid)?;
        let header = entry.header();
        let size = header.size().unwrap_or(0);
        let name = entry
            .path()
            .map(|p| p.to_string_lossy().to_string())
            .map_err(invalid)?;
        let modified = header
            .mtime()
            .ok()
            .map(|mtime| unix_timestamp_to_datetime(mtime as i64));

        listing.add(ArchiveEntry {
            name: truncate_entry_name(name),
            size,
            compressed: None,
            is_dir: header.entry_type().is_dir(),
            modified,
        });
    }

    listing.finish(max_entries);
    Ok(listing)
}

/// Load an archive listing with its summary notice
pub fn load(path: &Path, config: &ConfigFile) -> Result<Loaded> {
    let max_entries = config.preview.max_archive_entries;
    let listing = if is_tar_gz_file(path) {
        list_tar_gz(path, max_entries)?
    } else {
        list_zip(path, max_entries)?
    };

    let notice = Notice::info(listing.summary());
    tracing::debug!(entries = listing.total_entries, "listed archive");
    Ok(Loaded::with_notice(
        Preview::Table(listing.into_table(config.preview.zebra_stripes)),
        Some(notice),
    ))
}
