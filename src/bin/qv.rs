//! `qv` - short alias for `quickview`

use std::process::ExitCode;

fn main() -> ExitCode {
    quickview::app::launch()
}
