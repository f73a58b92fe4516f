//! QuickView - A terminal file previewer
//!
//! Detects a file's format by extension, decodes it with a format-specific
//! backend and shows it as a table, tabbed pages, text, a half-block
//! picture or an animation inside a ratatui UI.

pub mod app;
pub mod core;
pub mod error;
pub mod handler;
pub mod logging;
pub mod render;
pub mod viewer;
