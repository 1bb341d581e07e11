//! Keyboard, mouse and focus input handling.
//!
//! Maps terminal events to [`App`] actions.  Adding a new keybinding is
//! a single match arm in [`handle_key_event`].
//!
//! ## For contributors
//!
//! To add a new keybinding:
//!
//! 1. Add a method on [`App`] for the action (if one doesn't exist).
//! 2. Add a `KeyCode` match arm in [`handle_key_event`] that calls it.
//! 3. Update the help text in [`crate::ui`]'s status bar.

use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

use crate::app::App;
use crate::view::SlideView;

/// Key that opens the source-URL prompt.
pub const PROMPT_KEY: KeyCode = KeyCode::F(2);

/// Route one terminal event to the matching handler.
///
/// Losing focus counts as the pointer leaving the slide panel; the terminal
/// reports no motion once the pointer is outside its window.
pub fn handle_event<V: SlideView>(app: &mut App<V>, event: Event, now: Instant) {
    match event {
        Event::Key(key) => handle_key_event(app, key, now),
        Event::Mouse(mouse) => handle_mouse_event(app, mouse, now),
        Event::FocusLost => app.pointer_left(now),
        _ => {}
    }
}

/// Process a single key event, updating app state accordingly.
///
/// Only reacts to key-press events (ignoring release / repeat) so that each
/// physical keypress triggers exactly one action.  While the prompt is open
/// every key goes to it.
pub fn handle_key_event<V: SlideView>(app: &mut App<V>, key: KeyEvent, now: Instant) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if app.prompt.is_open() {
        let outcome = app.prompt.handle_key(key);
        app.apply_prompt_outcome(outcome, now);
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit = true,
        KeyCode::Right => app.navigate_next(now),
        KeyCode::Left => app.navigate_previous(now),
        KeyCode::Char('r') => app.load(None),
        KeyCode::Char(' ') => app.toggle_pause(now),
        code if code == PROMPT_KEY => app.open_prompt(),
        _ => {}
    }
}

/// Feed pointer movement to the hover tracking.
pub fn handle_mouse_event<V: SlideView>(app: &mut App<V>, mouse: MouseEvent, now: Instant) {
    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
            app.pointer_at(Position::new(mouse.column, mouse.row), now);
        }
        _ => {}
    }
}
