//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::KeyEvent;
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Unbound printable keys are typed into the text area by the caller.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&key).copied()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        use crossterm::event::{KeyCode, KeyModifiers};

        let mut bindings = HashMap::new();
        let mut bind = |code: KeyCode, modifiers: KeyModifiers, action: KeyAction| {
            bindings.insert(KeyEvent::new(code, modifiers), action);
        };

        // Editing
        bind(KeyCode::Enter, KeyModifiers::NONE, KeyAction::Send);
        bind(KeyCode::Enter, KeyModifiers::ALT, KeyAction::Newline);
        bind(KeyCode::Char('j'), KeyModifiers::CONTROL, KeyAction::Newline);
        bind(KeyCode::Backspace, KeyModifiers::NONE, KeyAction::DeleteBackward);
        bind(KeyCode::Delete, KeyModifiers::NONE, KeyAction::DeleteForward);
        bind(KeyCode::Left, KeyModifiers::NONE, KeyAction::CursorLeft);
        bind(KeyCode::Right, KeyModifiers::NONE, KeyAction::CursorRight);
        bind(KeyCode::Home, KeyModifiers::NONE, KeyAction::CursorHome);
        bind(KeyCode::End, KeyModifiers::NONE, KeyAction::CursorEnd);
        bind(KeyCode::Char('a'), KeyModifiers::CONTROL, KeyAction::AttachImage);

        // Overlay
        bind(KeyCode::Up, KeyModifiers::NONE, KeyAction::OverlayUp);
        bind(KeyCode::Down, KeyModifiers::NONE, KeyAction::OverlayDown);
        bind(KeyCode::Tab, KeyModifiers::NONE, KeyAction::OverlaySelect);
        bind(KeyCode::Esc, KeyModifiers::NONE, KeyAction::OverlayDismiss);

        // Gestures
        bind(KeyCode::Left, KeyModifiers::ALT, KeyAction::SwipeLeft);
        bind(KeyCode::Right, KeyModifiers::ALT, KeyAction::SwipeRight);

        // Appearance and focus
        bind(KeyCode::Char('f'), KeyModifiers::CONTROL, KeyAction::ToggleFocus);
        bind(KeyCode::Char('t'), KeyModifiers::CONTROL, KeyAction::ToggleTranslucent);
        bind(KeyCode::Char('x'), KeyModifiers::CONTROL, KeyAction::ToggleForceMax);

        // Application controls
        bind(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyAction::Quit);

        Self { bindings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn enter_sends_and_alt_enter_breaks_line() {
        let bindings = KeyBindings::default();
        assert_eq!(
            bindings.get(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)),
            Some(KeyAction::Send)
        );
        assert_eq!(
            bindings.get(KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT)),
            Some(KeyAction::Newline)
        );
    }

    #[test]
    fn plain_characters_are_unbound() {
        let bindings = KeyBindings::default();
        assert_eq!(
            bindings.get(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)),
            None,
            "Printable keys must reach the text area"
        );
        assert_eq!(
            bindings.get(KeyEvent::new(KeyCode::Char('#'), KeyModifiers::SHIFT)),
            None
        );
    }

    #[test]
    fn alt_arrows_are_swipes() {
        let bindings = KeyBindings::default();
        assert_eq!(
            bindings.get(KeyEvent::new(KeyCode::Left, KeyModifiers::ALT)),
            Some(KeyAction::SwipeLeft)
        );
        assert_eq!(
            bindings.get(KeyEvent::new(KeyCode::Left, KeyModifiers::NONE)),
            Some(KeyAction::CursorLeft)
        );
    }

    #[test]
    fn ctrl_c_quits() {
        let bindings = KeyBindings::default();
        assert_eq!(
            bindings.get(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(KeyAction::Quit)
        );
    }
}
