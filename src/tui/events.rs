use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// User actions from keyboard events
#[derive(Debug, PartialEq)]
pub enum Action {
    Quit,
    Cancel,
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    Submit,
    ClearInput,
    Insert(char),
    DeleteChar,
    None,
}

/// Poll for keyboard events and convert to actions
pub fn poll_event(timeout: Duration) -> anyhow::Result<Action> {
    if event::poll(timeout)?
        && let Event::Key(key) = event::read()?
        && key.kind == KeyEventKind::Press
    {
        return Ok(key_to_action(key));
    }
    Ok(Action::None)
}

fn key_to_action(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Esc, _) => Action::Cancel,

        // Navigation
        (KeyCode::Char('p'), KeyModifiers::CONTROL) => Action::MoveUp,
        (KeyCode::Char('n'), KeyModifiers::CONTROL) => Action::MoveDown,
        (KeyCode::Up, _) => Action::MoveUp,
        (KeyCode::Down, _) => Action::MoveDown,
        (KeyCode::PageUp, _) => Action::PageUp,
        (KeyCode::PageDown, _) => Action::PageDown,

        // Input line
        (KeyCode::Enter, _) => Action::Submit,
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => Action::ClearInput,
        (KeyCode::Char(c), modifiers) if is_text_modifier(modifiers) => Action::Insert(c),
        (KeyCode::Backspace, _) => Action::DeleteChar,

        _ => Action::None,
    }
}

/// Plain, shifted or AltGr-composed keys, which some terminals report as Ctrl+Alt
fn is_text_modifier(modifiers: KeyModifiers) -> bool {
    let base = modifiers.difference(KeyModifiers::SHIFT);
    base.is_empty() || base == KeyModifiers::CONTROL | KeyModifiers::ALT
}
