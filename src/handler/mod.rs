//! Handler module - Input event handling

pub mod key;
pub mod mouse;

pub use key::{handle_key_event, KeyAction};
pub use mouse::handle_mouse_event;
