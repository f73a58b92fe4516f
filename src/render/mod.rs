//! Render module - UI rendering

pub mod halfblock;
pub mod preview;
pub mod status;

pub use preview::Preview;
pub use status::{render_footer, render_header};
