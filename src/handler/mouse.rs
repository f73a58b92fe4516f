//! Mouse wheel handling

use crossterm::event::{MouseEvent, MouseEventKind};

use super::key::KeyAction;

/// Rows moved per wheel notch
pub const WHEEL_STEP: usize = 3;

/// Translate a mouse event into a navigation action
pub fn handle_mouse_event(event: MouseEvent) -> KeyAction {
    match event.kind {
        MouseEventKind::ScrollUp => KeyAction::Up(WHEEL_STEP),
        MouseEventKind::ScrollDown => KeyAction::Down(WHEEL_STEP),
        MouseEventKind::ScrollLeft => KeyAction::Left,
        MouseEventKind::ScrollRight => KeyAction::Right,
        _ => KeyAction::None,
    }
}
