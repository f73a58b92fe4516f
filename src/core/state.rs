//! Application state management

use std::path::{Path, PathBuf};

/// Severity of a footer notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// One-line message shown in the footer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}

/// Main application state
pub struct AppState {
    /// File being viewed
    pub path: PathBuf,
    /// File name shown in the header
    pub filename: String,
    /// Display name of the active viewer
    pub viewer_name: &'static str,
    /// Footer message
    pub message: Option<Notice>,
    /// Exit flag
    pub should_quit: bool,
    /// Mouse wheel scrolling enabled
    pub mouse_enabled: bool,
}

impl AppState {
    /// Create new application state
    pub fn new(path: &Path, viewer_name: &'static str) -> Self {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        Self {
            path: path.to_path_buf(),
            filename,
            viewer_name,
            message: None,
            should_quit: false,
            mouse_enabled: true,
        }
    }

    /// Header title
    pub fn title(&self) -> String {
        format!("QuickView - {}", self.filename)
    }

    /// Set footer message
    pub fn set_message(&mut self, notice: Notice) {
        self.message = Some(notice);
    }

    /// Clear footer message
    pub fn clear_message(&mut self) {
        self.message = None;
    }
}
