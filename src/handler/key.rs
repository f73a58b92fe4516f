//! Keyboard event handling

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Actions that can result from key handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// No action needed
    None,
    /// Quit the application
    Quit,
    /// Move up one row
    Up(usize),
    /// Move down one row
    Down(usize),
    /// Scroll left
    Left,
    /// Scroll right
    Right,
    /// Move up one viewport
    PageUp,
    /// Move down one viewport
    PageDown,
    /// Jump to the first row
    Home,
    /// Jump to the last row
    End,
    /// Switch to the next sheet/page
    NextTab,
    /// Switch to the previous sheet/page
    PrevTab,
    /// Pause or resume an animation
    TogglePause,
}

/// Handle key event and return the resulting action
pub fn handle_key_event(key: KeyEvent) -> KeyAction {
    match key.code {
        // Quit
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,

        // Rows
        KeyCode::Up | KeyCode::Char('k') => KeyAction::Up(1),
        KeyCode::Down | KeyCode::Char('j') => KeyAction::Down(1),

        // Horizontal scroll
        KeyCode::Left | KeyCode::Char('h') => KeyAction::Left,
        KeyCode::Right | KeyCode::Char('l') => KeyAction::Right,

        // Pages
        KeyCode::PageUp | KeyCode::Char('b') => KeyAction::PageUp,
        KeyCode::PageDown | KeyCode::Char('f') => KeyAction::PageDown,
        KeyCode::Home | KeyCode::Char('g') => KeyAction::Home,
        KeyCode::End | KeyCode::Char('G') => KeyAction::End,

        // Sheets / pages. Some terminals report Shift+Tab as Tab + SHIFT.
        KeyCode::BackTab => KeyAction::PrevTab,
        KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => KeyAction::PrevTab,
        KeyCode::Tab => KeyAction::NextTab,

        KeyCode::Char(' ') => KeyAction::TogglePause,

        _ => KeyAction::None,
    }
}
