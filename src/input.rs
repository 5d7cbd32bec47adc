//! Key bindings: maps crossterm key events to turn actions
//!
//! The game is turn-based, so every key press maps to at most one action
//! and nothing repeats while a key is held.

use crate::game::Action;
use crate::settings::Settings;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press means to the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Action(Action),
    /// Ctrl+C, leave immediately
    Quit,
}

/// Key bindings configuration - supports multiple keys per action
#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub left: Vec<KeyCode>,
    pub right: Vec<KeyCode>,
    pub up: Vec<KeyCode>,
    pub down: Vec<KeyCode>,
    pub confirm: Vec<KeyCode>,
    pub back: Vec<KeyCode>,
}

impl KeyBindings {
    /// Parse a key string into KeyCode
    pub fn parse_key(s: &str) -> Option<KeyCode> {
        let lower = s.to_lowercase();
        let code = match lower.as_str() {
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "space" => KeyCode::Char(' '),
            "enter" | "return" => KeyCode::Enter,
            "tab" => KeyCode::Tab,
            "backspace" => KeyCode::Backspace,
            "esc" | "escape" => KeyCode::Esc,
            _ => {
                let mut chars = lower.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return None,
                }
            }
        };
        Some(code)
    }

    /// Parse a list of key strings into KeyCodes, skipping unknown names
    fn parse_keys(keys: &[String]) -> Vec<KeyCode> {
        keys.iter().filter_map(|s| Self::parse_key(s)).collect()
    }

    /// Create keybindings from settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            left: Self::parse_keys(&settings.keys.left),
            right: Self::parse_keys(&settings.keys.right),
            up: Self::parse_keys(&settings.keys.up),
            down: Self::parse_keys(&settings.keys.down),
            confirm: Self::parse_keys(&settings.keys.confirm),
            back: Self::parse_keys(&settings.keys.back),
        }
    }

    /// Look up the action bound to a key
    pub fn action_for(&self, code: KeyCode) -> Option<Action> {
        let table = [
            (&self.left, Action::Left),
            (&self.right, Action::Right),
            (&self.up, Action::Up),
            (&self.down, Action::Down),
            (&self.confirm, Action::Confirm),
            (&self.back, Action::Back),
        ];
        table
            .into_iter()
            .find(|(keys, _)| keys.contains(&code))
            .map(|(_, action)| action)
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Translates raw key events using the configured bindings
#[derive(Debug, Clone, Default)]
pub struct InputHandler {
    bindings: KeyBindings,
}

impl InputHandler {
    /// Create input handler from settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            bindings: KeyBindings::from_settings(settings),
        }
    }

    /// Handle a key press event
    pub fn key_down(&self, key: KeyEvent) -> Option<Input> {
        if key.kind == KeyEventKind::Release {
            return None;
        }

        // Handle Ctrl+C for quit
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Input::Quit);
        }

        self.bindings
            .action_for(normalize_key(key.code))
            .map(Input::Action)
    }
}

/// Normalize key codes for consistent handling
fn normalize_key(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_parse_key_names() {
        assert_eq!(KeyBindings::parse_key("Left"), Some(KeyCode::Left));
        assert_eq!(KeyBindings::parse_key("SPACE"), Some(KeyCode::Char(' ')));
        assert_eq!(KeyBindings::parse_key("Q"), Some(KeyCode::Char('q')));
        assert_eq!(KeyBindings::parse_key("F13"), None);
    }

    #[test]
    fn test_default_bindings() {
        let input = InputHandler::default();
        assert_eq!(
            input.key_down(press(KeyCode::Enter)),
            Some(Input::Action(Action::Confirm))
        );
        assert_eq!(
            input.key_down(press(KeyCode::Char('A'))),
            Some(Input::Action(Action::Left))
        );
        assert_eq!(
            input.key_down(press(KeyCode::Esc)),
            Some(Input::Action(Action::Back))
        );
        assert_eq!(input.key_down(press(KeyCode::Char('z'))), None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let input = InputHandler::default();
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(input.key_down(key), Some(Input::Quit));
    }

    #[test]
    fn test_custom_bindings() {
        let mut settings = Settings::default();
        settings.keys.confirm = vec!["x".to_string()];
        let input = InputHandler::from_settings(&settings);
        assert_eq!(
            input.key_down(press(KeyCode::Char('x'))),
            Some(Input::Action(Action::Confirm))
        );
        assert_eq!(input.key_down(press(KeyCode::Enter)), None);
    }
}
