//! Main event loop for the application

use std::io::Stdout;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::prelude::*;

use crate::core::AppState;
use crate::handler::{handle_key_event, handle_mouse_event, KeyAction};
use crate::render::Preview;

use super::render::render_frame;

/// Input poll timeout; also the animation tick resolution
const POLL_INTERVAL: Duration = Duration::from_millis(60);

/// Apply one input action to the state and the preview
pub fn apply_action(state: &mut AppState, preview: &mut Preview, action: KeyAction) {
    match action {
        KeyAction::None => {}
        KeyAction::Quit => state.should_quit = true,
        other => preview.navigate(other),
    }
}

/// Main event loop
pub fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state: &mut AppState,
    preview: &mut Preview,
) -> anyhow::Result<()> {
    while !state.should_quit {
        terminal.draw(|frame| render_frame(frame, state, preview))?;

        // Handle events (60ms timeout keeps animations moving)
        if event::poll(POLL_INTERVAL)? {
            let action = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => handle_key_event(key),
                Event::Mouse(mouse) if state.mouse_enabled => handle_mouse_event(mouse),
                _ => KeyAction::None,
            };
            apply_action(state, preview, action);
        }

        preview.tick(Instant::now());
    }

    tracing::debug!("event loop finished");
    Ok(())
}
