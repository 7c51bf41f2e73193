//! Maps terminal events to game inputs.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Input actions understood by the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameInput {
    /// Flap (Space, W or Up).
    Flap,
    /// Leave the title screen (S).
    Start,
    /// Begin a fresh session (R or Enter).
    Restart,
    /// Exit (Q, Esc or Ctrl+C).
    Quit,
    /// The terminal changed size, in cells.
    Resize { cols: u16, rows: u16 },
}

/// Translate one terminal event. Key repeats and releases are dropped so a
/// held key flaps only once.
pub fn map_event(event: &Event) -> Option<GameInput> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => map_key(key),
        Event::Resize(cols, rows) => Some(GameInput::Resize {
            cols: *cols,
            rows: *rows,
        }),
        _ => None,
    }
}

fn map_key(key: &KeyEvent) -> Option<GameInput> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(GameInput::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char(' ') | KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => {
            Some(GameInput::Flap)
        }
        KeyCode::Char('s') | KeyCode::Char('S') => Some(GameInput::Start),
        KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => Some(GameInput::Restart),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(GameInput::Quit),
        _ => None,
    }
}
