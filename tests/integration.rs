//! Integration tests for QuickView
//!
//! Each viewer is run against a small fixture written into a temp directory,
//! and the resulting preview is drawn on a ratatui TestBackend.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use quickview::app::{prepare, render_frame, ConfigFile};
use quickview::core::NoticeLevel;
use quickview::handler::{handle_key_event, KeyAction};
use quickview::render::preview::{CanvasBody, PageBody, Preview};
use quickview::viewer::tools::{find_ffmpeg, find_ffprobe};
use quickview::viewer::{load_preview, Loaded, ViewerKind};
use ratatui::{backend::TestBackend, Terminal};
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, bytes).unwrap();
    path
}

fn load(path: &Path) -> Loaded {
    load_preview(path, ViewerKind::detect(path), &ConfigFile::default())
}

/// Draw a preview and return the screen as one string per row
fn draw(preview: &mut Preview, width: u16, height: u16) -> Vec<String> {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal
        .draw(|f| preview.render(f, f.area(), "fixture"))
        .unwrap();
    let buffer = terminal.backend().buffer();
    (0..buffer.area.height)
        .map(|y| {
            (0..buffer.area.width)
                .map(|x| buffer[(x, y)].symbol().to_string())
                .collect()
        })
        .collect()
}

fn screen_contains(screen: &[String], needle: &str) -> bool {
    screen.iter().any(|row| row.contains(needle))
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

// =============================================================================
// Dispatch
// =============================================================================

mod dispatch_tests {
    use super::*;

    #[test]
    fn test_every_path_maps_to_one_viewer() {
        let cases = [
            ("a.csv", ViewerKind::Csv),
            ("a.TSV", ViewerKind::Csv),
            ("a.xlsx", ViewerKind::Excel),
            ("a.ods", ViewerKind::Excel),
            ("a.pdf", ViewerKind::Pdf),
            ("a.zip", ViewerKind::Archive),
            ("a.jar", ViewerKind::Archive),
            ("a.tar.gz", ViewerKind::Archive),
            ("a.tgz", ViewerKind::Archive),
            ("a.docx", ViewerKind::Docx),
            ("a.flac", ViewerKind::Audio),
            ("a.JPEG", ViewerKind::Image),
            ("a.svg", ViewerKind::Svg),
            ("a.mkv", ViewerKind::Video),
            ("a.rs", ViewerKind::Text),
            ("a.gz", ViewerKind::Text),
            ("Makefile", ViewerKind::Text),
            (".bashrc", ViewerKind::Text),
        ];
        for (name, expected) in cases {
            assert_eq!(ViewerKind::detect(Path::new(name)), expected, "{}", name);
        }
    }

    #[test]
    fn test_extension_tables_do_not_overlap() {
        let mut seen = std::collections::HashSet::new();
        for kind in ViewerKind::ALL {
            for ext in kind.extensions() {
                assert!(seen.insert(*ext), "{} claimed twice", ext);
            }
        }
    }

    #[test]
    fn test_names_round_trip_for_forced_viewers() {
        for kind in ViewerKind::ALL {
            assert_eq!(ViewerKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(ViewerKind::from_name("CSV"), Some(ViewerKind::Csv));
        assert_eq!(ViewerKind::from_name("spreadsheet"), None);
    }

    #[test]
    fn test_prepare_uses_forced_viewer() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "data.csv", b"a,b\n1,2\n");
        let (state, preview) = prepare(&path, Some(ViewerKind::Text), &ConfigFile::default());
        assert_eq!(state.viewer_name, "text");
        assert!(matches!(preview, Preview::Text(_)));
    }
}

// =============================================================================
// Viewers
// =============================================================================

mod viewer_tests {
    use super::*;

    #[test]
    fn test_csv_table() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "people.csv", b"name,,city\nalice,30,paris\nbob\n");
        let Preview::Table(table) = load(&path).preview else {
            panic!("expected table");
        };
        assert_eq!(table.headers, vec!["name", "Col 2", "city"]);
        assert_eq!(table.rows[1], vec!["bob", "", ""]);
    }

    #[test]
    fn test_tsv_uses_tabs() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "data.tsv", b"a\tb\n1,5\t2\n");
        let Preview::Table(table) = load(&path).preview else {
            panic!("expected table");
        };
        assert_eq!(table.headers, vec!["a", "b"]);
        assert_eq!(table.rows[0], vec!["1,5", "2"]);
    }

    #[test]
    fn test_zip_listing_with_notice() {
        use zip::write::SimpleFileOptions;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bundle.zip");
        let mut writer = zip::ZipWriter::new(fs::File::create(&path).unwrap());
        writer
            .start_file("b.txt", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(&[b'x'; 2048]).unwrap();
        writer.add_directory("a/", SimpleFileOptions::default()).unwrap();
        writer.finish().unwrap();

        let loaded = load(&path);
        let notice = loaded.notice.expect("archive summary");
        assert_eq!(notice.level, NoticeLevel::Info);
        assert!(notice.text.starts_with("2 files"));

        let Preview::Table(table) = loaded.preview else {
            panic!("expected table");
        };
        assert_eq!(table.headers[0], "Name");
        assert_eq!(table.rows[0][0], "a/");
        assert_eq!(table.rows[1][0], "b.txt");
    }

    #[test]
    fn test_tar_gz_listing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bundle.tar.gz");
        let gz = flate2::write::GzEncoder::new(
            fs::File::create(&path).unwrap(),
            flate2::Compression::default(),
        );
        let mut builder = tar::Builder::new(gz);
        let data = b"hello";
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_mtime(0);
        header.set_cksum();
        builder
            .append_data(&mut header, "hello.txt", &data[..])
            .unwrap();
        builder.into_inner().unwrap().finish().unwrap();

        let Preview::Table(table) = load(&path).preview else {
            panic!("expected table");
        };
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.rows[0][0], "hello.txt");
    }

    /// Smallest workbook calamine accepts: two sheets sharing a string table
    fn write_xlsx(path: &Path) {
        use zip::write::SimpleFileOptions;

        let parts: [(&str, &str); 7] = [
            (
                "[Content_Types].xml",
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
<Override PartName="/xl/worksheets/sheet2.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
<Override PartName="/xl/sharedStrings.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml"/>
</Types>"#,
            ),
            (
                "_rels/.rels",
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#,
            ),
            (
                "xl/workbook.xml",
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<sheets>
<sheet name="First" sheetId="1" r:id="rId1"/>
<sheet name="Second" sheetId="2" r:id="rId2"/>
</sheets>
</workbook>"#,
            ),
            (
                "xl/_rels/workbook.xml.rels",
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet2.xml"/>
<Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings" Target="sharedStrings.xml"/>
</Relationships>"#,
            ),
            (
                "xl/sharedStrings.xml",
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="3" uniqueCount="3">
<si><t>name</t></si>
<si><t>alice</t></si>
<si><t>notes</t></si>
</sst>"#,
            ),
            (
                "xl/worksheets/sheet1.xml",
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
<sheetData>
<row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1"><v>7</v></c></row>
<row r="3"><c r="A3" t="s"><v>1</v></c><c r="B3"><v>42</v></c></row>
</sheetData>
</worksheet>"#,
            ),
            (
                "xl/worksheets/sheet2.xml",
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
<sheetData>
<row r="1"><c r="A1" t="s"><v>2</v></c></row>
</sheetData>
</worksheet>"#,
            ),
        ];

        let mut writer = zip::ZipWriter::new(fs::File::create(path).unwrap());
        for (name, body) in parts {
            writer.start_file(name, SimpleFileOptions::default()).unwrap();
            writer.write_all(body.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
    }

    #[test]
    fn test_xlsx_sheets_become_tabs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("book.xlsx");
        write_xlsx(&path);

        let mut preview = load(&path).preview;
        let Preview::Tabs(tabs) = &preview else {
            panic!("expected tabs, got {:?}", preview);
        };
        let titles: Vec<&str> = tabs.pages.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second"]);

        let PageBody::Table(first) = &tabs.pages[0].body else {
            panic!("expected table page");
        };
        assert_eq!(first.headers, vec!["A", "B"]);
        // Row 2 is blank in the sheet and is not shown
        assert_eq!(first.row_count(), 2);
        assert_eq!(first.rows[0][0], "name");
        assert_eq!(first.rows[1][0], "alice");
        assert_eq!(first.rows[1][1], "42");

        let PageBody::Table(second) = &tabs.pages[1].body else {
            panic!("expected table page");
        };
        assert_eq!(second.headers, vec!["A"]);
        assert_eq!(second.rows, vec![vec!["notes".to_string()]]);

        let screen = draw(&mut preview, 60, 12);
        assert!(screen_contains(&screen, "First"));
        assert!(screen_contains(&screen, "alice"));
    }

    #[test]
    fn test_png_canvas() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dot.png");
        image::RgbImage::from_pixel(8, 4, image::Rgb([0, 200, 0]))
            .save(&path)
            .unwrap();

        let Preview::Canvas(canvas) = load(&path).preview else {
            panic!("expected canvas");
        };
        assert!(canvas.caption.starts_with("Image: 8x4"));
        let CanvasBody::HalfBlock(grid) = &canvas.body else {
            panic!("expected half-block body");
        };
        assert_eq!(grid.get(0, 0), (0, 200, 0));
    }

    #[test]
    fn test_svg_canvas() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "shape.svg",
            br##"<svg xmlns="http://www.w3.org/2000/svg" width="40" height="20"><rect width="40" height="20" fill="#0000ff"/></svg>"##,
        );
        let Preview::Canvas(canvas) = load(&path).preview else {
            panic!("expected canvas");
        };
        assert!(canvas.caption.starts_with("SVG: 40x20"));
    }

    #[test]
    fn test_text_numbered() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "notes.txt", b"first\nsecond\nthird\n");
        let mut preview = load(&path).preview;
        let Preview::Text(text) = &preview else {
            panic!("expected text");
        };
        assert!(text.line_numbers);
        assert_eq!(text.line_count(), 3);

        let screen = draw(&mut preview, 40, 8);
        assert!(screen_contains(&screen, "    1 │ first"));
    }

    #[test]
    fn test_unknown_extension_is_text() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "blob.weird", b"\x00\x01plain");
        assert!(matches!(load(&path).preview, Preview::Text(_)));
    }

    #[test]
    fn test_docx_document() {
        use docx_rs::{Docx, Paragraph, Run};

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("memo.docx");
        let file = fs::File::create(&path).unwrap();
        Docx::new()
            .add_paragraph(
                Paragraph::new()
                    .add_run(Run::new().add_text("Memo"))
                    .style("Heading1"),
            )
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Hello there")))
            .build()
            .pack(file)
            .unwrap();

        let Preview::Text(text) = load(&path).preview else {
            panic!("expected text");
        };
        let lines: Vec<String> = text.lines.iter().map(|l| l.text()).collect();
        assert_eq!(lines[0], "# Memo");
        assert!(lines.contains(&"Hello there".to_string()));
    }

    #[test]
    fn test_pdf_without_text_warns() {
        use lopdf::{dictionary, Document, Object, Stream};

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let content_id = doc.add_object(Stream::new(dictionary! {}, Vec::new()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
                "MediaBox" => vec![0.into(), 0.into(), 100.into(), 100.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scan.pdf");
        doc.save(&path).unwrap();

        let loaded = load(&path);
        assert_eq!(
            loaded.notice.map(|n| n.level),
            Some(NoticeLevel::Warning)
        );
        let Preview::Tabs(tabs) = loaded.preview else {
            panic!("expected tabs");
        };
        assert_eq!(tabs.len(), 1);
        assert_eq!(tabs.pages[0].title, "Page 1");
        assert!(matches!(tabs.pages[0].body, PageBody::Text(_)));
    }

    #[test]
    fn test_corrupt_files_become_errors() {
        let dir = TempDir::new().unwrap();
        for name in [
            "broken.pdf",
            "broken.xlsx",
            "broken.zip",
            "broken.docx",
            "broken.png",
            "broken.svg",
        ] {
            let path = write(&dir, name, b"this is not what the extension claims");
            let loaded = load(&path);
            assert!(loaded.preview.is_error(), "{} should fail", name);
        }
    }

    #[test]
    fn test_error_preview_renders_message() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "broken.zip", b"nope");
        let mut preview = load(&path).preview;
        let screen = draw(&mut preview, 70, 10);
        assert!(screen_contains(&screen, "Error:"));
    }
}

// =============================================================================
// ffmpeg-backed viewers (skipped when ffmpeg is not installed)
// =============================================================================

mod media_tests {
    use super::*;

    fn have_ffmpeg() -> bool {
        find_ffmpeg().is_some() && find_ffprobe().is_some()
    }

    /// 16-bit mono PCM WAV with a rising ramp
    fn wav_bytes(samples: usize, rate: u32) -> Vec<u8> {
        let data_len = (samples * 2) as u32;
        let mut out = Vec::with_capacity(44 + samples * 2);
        out.extend_from_slice(b"RIFF");
        out.extend_from_slice(&(36 + data_len).to_le_bytes());
        out.extend_from_slice(b"WAVEfmt ");
        out.extend_from_slice(&16u32.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&rate.to_le_bytes());
        out.extend_from_slice(&(rate * 2).to_le_bytes());
        out.extend_from_slice(&2u16.to_le_bytes());
        out.extend_from_slice(&16u16.to_le_bytes());
        out.extend_from_slice(b"data");
        out.extend_from_slice(&data_len.to_le_bytes());
        for i in 0..samples {
            let v = ((i % 200) as i32 * 300 - 30_000) as i16;
            out.extend_from_slice(&v.to_le_bytes());
        }
        out
    }

    #[test]
    fn test_audio_waveform() {
        if !have_ffmpeg() {
            eprintln!("skipping: ffmpeg not found");
            return;
        }
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "ramp.wav", &wav_bytes(8000, 8000));

        let Preview::Text(text) = load(&path).preview else {
            panic!("expected text");
        };
        let lines: Vec<String> = text.lines.iter().map(|l| l.text()).collect();
        assert!(lines[0].contains("ramp.wav"));
        assert!(lines.iter().any(|l| l.contains("Sample Rate: 8,000 Hz")));
    }

    #[test]
    fn test_video_frames() {
        if !have_ffmpeg() {
            eprintln!("skipping: ffmpeg not found");
            return;
        }
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("clip.avi");
        let Some(ffmpeg) = find_ffmpeg() else {
            return;
        };
        let status = Command::new(ffmpeg)
            .args(["-y", "-v", "error", "-f", "lavfi"])
            .args(["-i", "testsrc=duration=2:size=64x48:rate=10"])
            .args(["-c:v", "mpeg4"])
            .arg(&path)
            .stdin(Stdio::null())
            .status()
            .unwrap();
        if !status.success() {
            eprintln!("skipping: could not synthesise a test clip");
            return;
        }

        let Preview::Animation(animation) = load(&path).preview else {
            panic!("expected animation");
        };
        assert!(!animation.frames.is_empty());
        assert!(animation.caption.contains("64x48"));
    }

    #[test]
    fn test_audio_without_tool_or_bad_data_is_error() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "noise.mp3", b"not audio");
        assert!(load(&path).preview.is_error());
    }
}

// =============================================================================
// Rendering and navigation
// =============================================================================

mod ui_tests {
    use super::*;

    fn table_fixture(rows: usize) -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let mut csv = String::from("id,value\n");
        for i in 0..rows {
            csv.push_str(&format!("{},{}\n", i, i * 10));
        }
        let path = write(&dir, "rows.csv", csv.as_bytes());
        (dir, path)
    }

    #[test]
    fn test_full_frame_renders() {
        let (_dir, path) = table_fixture(5);
        let (state, mut preview) = prepare(&path, None, &ConfigFile::default());
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal
            .draw(|f| render_frame(f, &state, &mut preview))
            .unwrap();
        let buffer = terminal.backend().buffer();
        let top: String = (0..80).map(|x| buffer[(x, 0)].symbol().to_string()).collect();
        assert!(top.contains("QuickView - rows.csv"));
        assert!(top.contains("[csv]"));
    }

    #[test]
    fn test_table_cursor_stays_in_bounds() {
        let (_dir, path) = table_fixture(3);
        let mut preview = load(&path).preview;

        for _ in 0..10 {
            preview.navigate(handle_key_event(key(KeyCode::Down)));
        }
        let Preview::Table(table) = &preview else {
            panic!("expected table");
        };
        assert_eq!(table.cursor.position(), 2);

        for _ in 0..10 {
            preview.navigate(handle_key_event(key(KeyCode::Char('k'))));
        }
        let Preview::Table(table) = &preview else {
            panic!("expected table");
        };
        assert_eq!(table.cursor.position(), 0);
    }

    #[test]
    fn test_text_scroll_clamped_after_render() {
        let dir = TempDir::new().unwrap();
        let content: String = (0..30).map(|i| format!("line {}\n", i)).collect();
        let path = write(&dir, "long.txt", content.as_bytes());
        let mut preview = load(&path).preview;

        // Render once so the viewport height is known
        draw(&mut preview, 40, 12);
        preview.navigate(KeyAction::End);
        let Preview::Text(text) = &preview else {
            panic!("expected text");
        };
        let end = text.scroll.position();
        assert!(end > 0 && end < 30);

        preview.navigate(KeyAction::PageDown);
        let Preview::Text(text) = &preview else {
            panic!("expected text");
        };
        assert_eq!(text.scroll.position(), end);
    }

    #[test]
    fn test_every_preview_kind_draws_in_tiny_area() {
        let dir = TempDir::new().unwrap();
        let csv = write(&dir, "t.csv", b"a\n1\n");
        let txt = write(&dir, "t.txt", b"hello");
        let svg = write(
            &dir,
            "t.svg",
            br#"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="4"/>"#,
        );
        let bad = write(&dir, "t.zip", b"bad");
        for path in [csv, txt, svg, bad] {
            let mut preview = load(&path).preview;
            draw(&mut preview, 4, 3);
            draw(&mut preview, 120, 40);
        }
    }
}
