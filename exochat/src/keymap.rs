//! Maps raw terminal key events into the reducer's event vocabulary.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::input::Keystroke;
use crate::reducer::InputEvent;

/// Translate a key press into an [`InputEvent`].
///
/// `Ctrl+C` and `Esc` cancel, `Enter` submits, `Tab` advances focus.
/// Everything else becomes a [`InputEvent::TextEdit`] broadcast.
#[must_use]
pub fn map_key(key: KeyEvent) -> InputEvent {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Esc, _) => InputEvent::Cancel,
        (KeyCode::Enter, _) => InputEvent::Submit,
        (KeyCode::Tab, _) => InputEvent::Advance,
        _ => InputEvent::TextEdit(keystroke(key)),
    }
}

/// Editing meaning of a key that is not a control event.
fn keystroke(key: KeyEvent) -> Keystroke {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Char('a') if ctrl => Keystroke::Home,
        KeyCode::Char('e') if ctrl => Keystroke::End,
        KeyCode::Char('u') if ctrl => Keystroke::DeleteToStart,
        KeyCode::Char('k') if ctrl => Keystroke::DeleteToEnd,
        KeyCode::Char('w') if ctrl => Keystroke::DeleteWordBackward,
        KeyCode::Char('b') if alt => Keystroke::WordLeft,
        KeyCode::Char('f') if alt => Keystroke::WordRight,
        KeyCode::Char(_) if ctrl || alt => Keystroke::Other,
        KeyCode::Char(c) => Keystroke::Char(c),
        KeyCode::Backspace if alt => Keystroke::DeleteWordBackward,
        KeyCode::Backspace => Keystroke::Backspace,
        KeyCode::Delete => Keystroke::Delete,
        KeyCode::Left if alt || ctrl => Keystroke::WordLeft,
        KeyCode::Right if alt || ctrl => Keystroke::WordRight,
        KeyCode::Left => Keystroke::Left,
        KeyCode::Right => Keystroke::Right,
        KeyCode::Home => Keystroke::Home,
        KeyCode::End => Keystroke::End,
        _ => Keystroke::Other,
    }
}
