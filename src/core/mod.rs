//! Core module - Application state and bounded navigation

pub mod scroll;
pub mod state;

pub use scroll::{ScrollMode, ScrollState};
pub use state::{AppState, Notice, NoticeLevel};
