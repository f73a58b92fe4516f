//! QuickView - Terminal file previewer

use std::process::ExitCode;

fn main() -> ExitCode {
    quickview::app::launch()
}
