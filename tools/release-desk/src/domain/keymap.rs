//! Crossterm key events to release-session input events.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use release_session::{InputEvent, Key};

/// Translate a terminal key press into the engine's input vocabulary.
///
/// Printable characters become text (scanners type the code as plain
/// characters); Ctrl/Alt chords are never treated as scan data.
pub fn to_input_event(event: &KeyEvent) -> InputEvent {
    match event.code {
        KeyCode::Char(c)
            if !event
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            InputEvent::char(c)
        }
        KeyCode::Enter => InputEvent::Key(Key::Enter),
        KeyCode::Tab => InputEvent::Key(Key::Tab),
        KeyCode::Esc => InputEvent::Key(Key::Escape),
        KeyCode::Backspace => InputEvent::Key(Key::Backspace),
        KeyCode::Up => InputEvent::Key(Key::Up),
        KeyCode::Down => InputEvent::Key(Key::Down),
        KeyCode::PageUp => InputEvent::Key(Key::PageUp),
        KeyCode::PageDown => InputEvent::Key(Key::PageDown),
        _ => InputEvent::Key(Key::Other),
    }
}

/// Ctrl+C, the one chord that always quits.
pub fn is_interrupt(event: &KeyEvent) -> bool {
    event.code == KeyCode::Char('c') && event.modifiers.contains(KeyModifiers::CONTROL)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_characters_become_text() {
        assert_eq!(to_input_event(&press(KeyCode::Char('B'))), InputEvent::char('B'));
        assert_eq!(
            to_input_event(&KeyEvent::new(KeyCode::Char('E'), KeyModifiers::SHIFT)),
            InputEvent::char('E')
        );
    }

    #[test]
    fn test_terminators_and_navigation() {
        assert_eq!(to_input_event(&press(KeyCode::Enter)), InputEvent::Key(Key::Enter));
        assert_eq!(to_input_event(&press(KeyCode::Tab)), InputEvent::Key(Key::Tab));
        assert_eq!(to_input_event(&press(KeyCode::Esc)), InputEvent::Key(Key::Escape));
        assert_eq!(to_input_event(&press(KeyCode::PageDown)), InputEvent::Key(Key::PageDown));
        assert_eq!(to_input_event(&press(KeyCode::F(5))), InputEvent::Key(Key::Other));
    }

    #[test]
    fn test_control_chords_are_not_text() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(to_input_event(&ctrl_c), InputEvent::Key(Key::Other));
        assert!(is_interrupt(&ctrl_c));
        assert!(!is_interrupt(&press(KeyCode::Char('c'))));
    }
}
