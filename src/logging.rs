//! File-backed tracing setup
//!
//! The terminal belongs to the UI, so log output only goes to a file and
//! only when `QUICKVIEW_LOG` is set (any `EnvFilter` directive).

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding the filter directive
pub const LOG_ENV: &str = "QUICKVIEW_LOG";

/// `<cache_dir>/quickview/quickview.log`
pub fn log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|p| p.join("quickview").join("quickview.log"))
}

/// Parse a directive, falling back to `info` when it is empty or invalid
pub fn filter_from(directive: &str) -> EnvFilter {
    let directive = directive.trim();
    if directive.is_empty() {
        return EnvFilter::new("info");
    }
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the subscriber from `QUICKVIEW_LOG`; returns the log file path when logging is active
pub fn init() -> Option<PathBuf> {
    init_at(std::env::var(LOG_ENV).ok().as_deref(), log_path())
}

/// Install the subscriber writing to `path`; nothing happens without a directive
pub fn init_at(directive: Option<&str>, path: Option<PathBuf>) -> Option<PathBuf> {
    let directive = directive?;
    let path = path?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok()?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;

    tracing_subscriber::registry()
        .with(filter_from(directive))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .ok()?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "quickview starting");
    Some(path)
}
