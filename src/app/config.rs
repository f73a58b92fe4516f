//! Application configuration from CLI arguments

use std::env;
use std::path::PathBuf;

use crate::viewer::ViewerKind;

/// Process exit codes
pub mod exit_code {
    /// Normal exit
    pub const SUCCESS: i32 = 0;
    /// The FILE argument does not exist
    pub const FILE_NOT_FOUND: i32 = 1;
    /// Runtime error (terminal setup, I/O)
    pub const RUNTIME_ERROR: i32 = 2;
    /// Invalid arguments or options (e.g., unknown flag, unknown viewer)
    pub const INVALID_ARGS: i32 = 3;
}

/// What the command line asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliAction {
    /// Open a preview
    Preview(Config),
    /// Print usage and exit
    Help,
    /// Print version and exit
    Version,
}

/// Application configuration from CLI args
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// File to preview
    pub file: PathBuf,
    /// Viewer forced with `--as`
    pub viewer: Option<ViewerKind>,
}

fn parse_viewer(name: &str) -> anyhow::Result<ViewerKind> {
    ViewerKind::from_name(name).ok_or_else(|| {
        let known: Vec<&str> = ViewerKind::ALL.iter().map(|k| k.name()).collect();
        anyhow::anyhow!(
            "unknown viewer '{}' (expected one of: {})",
            name,
            known.join(", ")
        )
    })
}

impl Config {
    pub fn from_args() -> anyhow::Result<CliAction> {
        Self::parse(env::args().skip(1))
    }

    /// Parse arguments (without the program name)
    pub fn parse<I>(args: I) -> anyhow::Result<CliAction>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let mut file: Option<PathBuf> = None;
        let mut viewer: Option<ViewerKind> = None;
        let mut options_done = false;

        while let Some(arg) = args.next() {
            if options_done {
                if file.replace(PathBuf::from(&arg)).is_some() {
                    anyhow::bail!("unexpected extra argument '{}'", arg);
                }
                continue;
            }

            match arg.as_str() {
                "--help" | "-h" => return Ok(CliAction::Help),
                "--version" | "-V" => return Ok(CliAction::Version),
                "--as" => {
                    let Some(name) = args.next() else {
                        anyhow::bail!("--as requires a viewer name");
                    };
                    viewer = Some(parse_viewer(&name)?);
                }
                "--" => options_done = true,
                other if other.starts_with("--as=") => {
                    viewer = Some(parse_viewer(&other["--as=".len()..])?);
                }
                other if other.starts_with('-') && other.len() > 1 => {
                    anyhow::bail!("unknown option '{}'", other);
                }
                path => {
                    if file.replace(PathBuf::from(path)).is_some() {
                        anyhow::bail!("unexpected extra argument '{}'", path);
                    }
                }
            }
        }

        let Some(file) = file else {
            anyhow::bail!("missing FILE argument (see --help)");
        };
        Ok(CliAction::Preview(Config { file, viewer }))
    }
}

/// Usage text
pub fn help_text() -> String {
    let viewers: Vec<&str> = ViewerKind::ALL.iter().map(|k| k.name()).collect();
    format!(
        r#"quickview - Terminal file previewer

USAGE:
    quickview [OPTIONS] <FILE>
    qv [OPTIONS] <FILE>

OPTIONS:
    --as <VIEWER>   Force a viewer: {}
    -h, --help      Show this help message
    -V, --version   Show version

SUPPORTED FORMATS:
    csv, tsv, xlsx, xls, xlsm, xlsb, ods, pdf, zip, jar, tar.gz, tgz,
    docx, mp3, wav, flac, ogg, m4a, aac, wma, jpg, png, gif, bmp, webp,
    svg, mp4, mkv, avi, mov, webm, wmv, flv, m4v; anything else as text

CONFIG FILE:
    ~/.config/quickview/config.toml    Main configuration file

ENVIRONMENT:
    QUICKVIEW_CONFIG    Use a different config file
    QUICKVIEW_LOG       Enable file logging (e.g. debug, quickview=trace)

KEYBINDINGS:
    j/↓, k/↑        Move down / up
    h/←, l/→        Scroll left / right
    PgDn/f, PgUp/b  Page down / up
    g/Home, G/End   Go to top / bottom
    Tab, Shift+Tab  Next / previous sheet or page
    Space           Pause / resume video
    q/Esc/Ctrl+C    Quit

EXIT CODES:
    0    Success
    1    File not found
    2    Runtime error
    3    Invalid arguments"#,
        viewers.join(", ")
    )
}

pub fn print_help() {
    println!("{}", help_text());
}

pub fn print_version() {
    println!("quickview {}", env!("CARGO_PKG_VERSION"));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> anyhow::Result<CliAction> {
        Config::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_plain_file() {
        assert_eq!(
            parse(&["data.csv"]).unwrap(),
            CliAction::Preview(Config {
                file: PathBuf::from("data.csv"),
                viewer: None,
            })
        );
    }

    #[test]
    fn test_forced_viewer() {
        let Ok(CliAction::Preview(config)) = parse(&["--as", "text", "data.csv"]) else {
            panic!("expected preview");
        };
        assert_eq!(config.viewer, Some(ViewerKind::Text));

        let Ok(CliAction::Preview(config)) = parse(&["data.bin", "--as=image"]) else {
            panic!("expected preview");
        };
        assert_eq!(config.viewer, Some(ViewerKind::Image));
    }

    #[test]
    fn test_help_and_version_win() {
        assert_eq!(parse(&["-h"]).unwrap(), CliAction::Help);
        assert_eq!(parse(&["x.csv", "--version"]).unwrap(), CliAction::Version);
    }

    #[test]
    fn test_invalid_arguments() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["--bogus", "a.csv"]).is_err());
        assert!(parse(&["--as"]).is_err());
        assert!(parse(&["--as", "spreadsheet", "a.csv"]).is_err());
        assert!(parse(&["a.csv", "b.csv"]).is_err());
    }

    #[test]
    fn test_double_dash_allows_dash_names() {
        let Ok(CliAction::Preview(config)) = parse(&["--", "-odd.txt"]) else {
            panic!("expected preview");
        };
        assert_eq!(config.file, PathBuf::from("-odd.txt"));
    }

    #[test]
    fn test_help_lists_sections() {
        let help = help_text();
        for section in ["USAGE:", "OPTIONS:", "CONFIG FILE:", "KEYBINDINGS:", "EXIT CODES:"] {
            assert!(help.contains(section), "missing {}", section);
        }
        assert!(help.contains("archive"));
    }
}
