//! Application module
//!
//! Argument parsing, configuration, terminal setup and the event loop.
//! `launch` is shared by the `quickview` and `qv` binaries.

pub mod config;
pub mod config_file;
mod event_loop;
mod render;

use std::io::stdout;
use std::path::Path;
use std::process::ExitCode;

use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::core::AppState;
use crate::render::Preview;
use crate::viewer::{load_preview, ViewerKind};

pub use config::{exit_code, CliAction, Config};
pub use config_file::ConfigFile;
pub use event_loop::{apply_action, run_app};
pub use render::{frame_layout, render_frame};

fn exit(code: i32) -> ExitCode {
    ExitCode::from(code as u8)
}

/// Parse arguments, load the file and run the UI
pub fn launch() -> ExitCode {
    // Parse config first to return INVALID_ARGS for argument errors
    let config = match Config::from_args() {
        Ok(CliAction::Preview(c)) => c,
        Ok(CliAction::Help) => {
            config::print_help();
            return exit(exit_code::SUCCESS);
        }
        Ok(CliAction::Version) => {
            config::print_version();
            return exit(exit_code::SUCCESS);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            return exit(exit_code::INVALID_ARGS);
        }
    };

    if !config.file.exists() {
        eprintln!("Error: File not found: {}", config.file.display());
        return exit(exit_code::FILE_NOT_FOUND);
    }
    if config.file.is_dir() {
        eprintln!("Error: Not a file: {}", config.file.display());
        return exit(exit_code::FILE_NOT_FOUND);
    }

    if let Some(path) = crate::logging::init() {
        tracing::debug!(path = %path.display(), "logging to file");
    }
    let settings = ConfigFile::load();

    match run_with_config(&config, &settings) {
        Ok(()) => exit(exit_code::SUCCESS),
        Err(e) => {
            tracing::error!(error = %e, "quickview failed");
            eprintln!("Error: {}", e);
            exit(exit_code::RUNTIME_ERROR)
        }
    }
}

/// Decode the file and build the initial state
pub fn prepare(path: &Path, forced: Option<ViewerKind>, settings: &ConfigFile) -> (AppState, Preview) {
    let kind = forced.unwrap_or_else(|| ViewerKind::detect(path));
    let loaded = load_preview(path, kind, settings);

    let mut state = AppState::new(path, kind.name());
    state.mouse_enabled = settings.general.mouse_enabled;
    if let Some(notice) = loaded.notice {
        state.set_message(notice);
    }
    (state, loaded.preview)
}

fn run_with_config(config: &Config, settings: &ConfigFile) -> anyhow::Result<()> {
    // Decode before entering raw mode
    let (mut state, mut preview) = prepare(&config.file, config.viewer, settings);

    // Initialize terminal
    terminal::enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if state.mouse_enabled {
        execute!(stdout, EnableMouseCapture)?;
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let result = run_app(&mut terminal, &mut state, &mut preview);

    // Restore terminal
    terminal::disable_raw_mode()?;
    if state.mouse_enabled {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    execute!(terminal.backend_mut(), LeaveAlternateScreen, cursor::Show)?;

    result
}
