use crate::app::App;
use crate::config::key_matches;
use anyhow::Result;
use crossterm::event::{self, Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};

/// Terminal events
#[derive(Debug, Clone, Copy)]
pub enum Event {
    /// Key press event
    Key(KeyEvent),
    /// Terminal tick event
    Tick,
    /// Terminal was resized
    Resize,
}

/// Event handler for the terminal
pub struct EventHandler {
    /// Tick rate in milliseconds
    tick_rate: Duration,
    last_tick: Instant,
}

impl EventHandler {
    /// Create a new event handler
    pub fn new(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
            last_tick: Instant::now(),
        }
    }

    /// Wait for the next key, resize or tick. Ticks keep their cadence
    /// while keys arrive.
    pub fn next(&mut self) -> Result<Event> {
        loop {
            let timeout = self.tick_rate.saturating_sub(self.last_tick.elapsed());
            if event::poll(timeout)? {
                match event::read()? {
                    CEvent::Key(key) => return Ok(Event::Key(key)),
                    CEvent::Resize(_, _) => return Ok(Event::Resize),
                    _ => {}
                }
            }
            if self.last_tick.elapsed() >= self.tick_rate {
                self.last_tick = Instant::now();
                return Ok(Event::Tick);
            }
        }
    }
}

/// Handle key events for the application
pub fn handle_key_event(key: KeyEvent, app: &mut App) {
    // On Windows, crossterm reports both key press and release events.
    // We only want to handle press events to avoid duplicates.
    if key.kind != KeyEventKind::Press {
        return;
    }

    // Any key dismisses a notification
    if app.message.is_some() {
        app.dismiss_message();
        return;
    }

    if app.confirming_delete {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm_delete(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_delete(),
            _ => {}
        }
        return;
    }

    if app.editor.is_some() {
        handle_editing_input(key, app);
        return;
    }

    // --- Global key handlers (not in a specific mode) ---
    let keymap = app.config.keymap.clone();
    if key_matches(&keymap.quit, &key) || key_matches("ctrl-c", &key) {
        app.quit();
    } else if key_matches(&keymap.select_up, &key) {
        app.select_up();
    } else if key_matches(&keymap.select_down, &key) {
        app.select_down();
    } else if key_matches(&keymap.add_note, &key) {
        app.start_adding();
    } else if key_matches(&keymap.edit_note, &key) || key.code == KeyCode::Enter {
        app.start_editing();
    } else if key_matches(&keymap.delete_note, &key) || key.code == KeyCode::Delete {
        app.initiate_delete();
    }
}

fn handle_editing_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Esc => app.cancel_edit(),
        KeyCode::Char('s') | KeyCode::Char('S') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.commit_edit()
        }
        KeyCode::Tab => app.editor_next_field(),
        KeyCode::BackTab => app.editor_prev_field(),
        KeyCode::Enter => {
            let in_content = app
                .editor
                .as_ref()
                .map(|s| s.focus == duenotes_core::Field::Content)
                .unwrap_or(false);
            if in_content {
                app.editor_insert('\n');
            } else {
                app.commit_edit();
            }
        }
        KeyCode::Backspace => app.editor_backspace(),
        KeyCode::Char(c) => {
            // Allow AltGr combinations (CONTROL+ALT) for special characters
            if !key.modifiers.contains(KeyModifiers::CONTROL) || key.modifiers.contains(KeyModifiers::ALT) {
                app.editor_insert(c);
            }
        }
        _ => {}
    }
}
