//! Common utilities for preview rendering

use ratatui::style::{Color, Style};

use crate::core::ScrollState;
use crate::handler::KeyAction;

/// Maximum length for archive entry names (prevent DoS from malicious archives)
pub const MAX_ENTRY_NAME_LEN: usize = 4096;

/// Characters moved per Left/Right press in text-like previews
pub const HORIZONTAL_STEP: usize = 4;

/// Border style of the preview body
pub fn get_border_style() -> Style {
    Style::default().fg(Color::Cyan)
}

/// Truncate archive entry name if too long
pub fn truncate_entry_name(name: String) -> String {
    if name.len() <= MAX_ENTRY_NAME_LEN {
        return name;
    }
    let mut cut = MAX_ENTRY_NAME_LEN - 3;
    while !name.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &name[..cut])
}

/// Format bytes as human-readable string
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if bytes >= TB {
        format!("{:.1} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Format an integer with thousands separators (44100 -> "44,100")
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format a Unix timestamp (UTC) as `YYYY-MM-DD HH:MM`
pub fn unix_timestamp_to_datetime(secs: i64) -> String {
    const SECONDS_PER_DAY: i64 = 86400;
    const DAYS_IN_MONTH: [i64; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

    let secs = secs.max(0);
    let mut days = secs / SECONDS_PER_DAY;
    let seconds_of_day = secs % SECONDS_PER_DAY;
    let mut year = 1970i64;

    // Find year
    loop {
        let days_in_year = if is_leap_year(year) { 366 } else { 365 };
        if days < days_in_year {
            break;
        }
        days -= days_in_year;
        year += 1;
    }

    // Find month and day
    let leap = is_leap_year(year);
    let mut month = 1;
    for (i, &d) in DAYS_IN_MONTH.iter().enumerate() {
        let days_in_month = if i == 1 && leap { 29 } else { d };
        if days < days_in_month {
            break;
        }
        days -= days_in_month;
        month += 1;
    }
    let day = days + 1;

    format!(
        "{:04}-{:02}-{:02} {:02}:{:02}",
        year,
        month,
        day,
        seconds_of_day / 3600,
        (seconds_of_day % 3600) / 60
    )
}

fn is_leap_year(year: i64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// Apply a navigation action to a vertical/horizontal scroll pair
pub fn apply_scroll(
    vertical: &mut ScrollState,
    horizontal: &mut ScrollState,
    action: KeyAction,
    horizontal_step: usize,
) {
    match action {
        KeyAction::Up(n) => vertical.step_back(n),
        KeyAction::Down(n) => vertical.step_forward(n),
        KeyAction::PageUp => vertical.page_back(),
        KeyAction::PageDown => vertical.page_forward(),
        KeyAction::Home => {
            vertical.to_start();
            horizontal.to_start();
        }
        KeyAction::End => vertical.to_end(),
        KeyAction::Left => horizontal.step_back(horizontal_step),
        KeyAction::Right => horizontal.step_forward(horizontal_step),
        _ => {}
    }
}
