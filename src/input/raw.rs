//! Low-level input collection: crossterm polling and translation of terminal events into
//! the small key vocabulary the prompt understands.

use crate::error::Result;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// Keys the prompt reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Enter,
    Backspace,
    /// Ctrl-U, empties the search input
    ClearLine,
    Esc,
    /// Ctrl-C or Ctrl-D
    Interrupt,
    Other,
}

impl Key {
    /// Translate a crossterm key event. Release and repeat events yield `None`.
    pub fn from_event(key_event: KeyEvent) -> Option<Key> {
        if key_event.kind != KeyEventKind::Press {
            return None;
        }

        let key = match (key_event.code, key_event.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL)
            | (KeyCode::Char('d'), KeyModifiers::CONTROL) => Key::Interrupt,
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => Key::ClearLine,
            (KeyCode::Char(ch), modifiers)
                if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                Key::Char(ch)
            }
            (KeyCode::Up, _) => Key::Up,
            (KeyCode::Down, _) => Key::Down,
            (KeyCode::Left, _) => Key::Left,
            (KeyCode::Right, _) => Key::Right,
            (KeyCode::PageUp, _) => Key::PageUp,
            (KeyCode::PageDown, _) => Key::PageDown,
            (KeyCode::Enter, _) => Key::Enter,
            (KeyCode::Backspace, _) => Key::Backspace,
            (KeyCode::Esc, _) => Key::Esc,
            _ => Key::Other,
        };
        Some(key)
    }
}

/// Events surfaced by a [`KeySource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(Key),
    Resize,
}

/// Blocking source of terminal input, read from a dedicated thread.
pub trait KeySource: Send + 'static {
    /// Wait up to `timeout` for the next event; `Ok(None)` when nothing arrived.
    fn next_event(&mut self, timeout: Duration) -> Result<Option<InputEvent>>;
}

/// [`KeySource`] reading the controlling terminal through crossterm.
#[derive(Debug, Default)]
pub struct CrosstermKeys;

impl CrosstermKeys {
    pub fn new() -> Self {
        Self
    }
}

impl KeySource for CrosstermKeys {
    fn next_event(&mut self, timeout: Duration) -> Result<Option<InputEvent>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        let input = match event::read()? {
            Event::Key(key_event) => Key::from_event(key_event).map(InputEvent::Key),
            Event::Resize(_, _) => Some(InputEvent::Resize),
            _ => None,
        };
        Ok(input)
    }
}
