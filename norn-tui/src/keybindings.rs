//! Keybindings for the swarm monitor.
//!
//! Vim-style navigation with arrow-key equivalents. Ctrl-C is handled by the
//! app directly and is not part of the map.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Actions that can be triggered by key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    NavigateUp,
    NavigateDown,
    /// Expand or collapse the selected swarm card.
    Toggle,
    /// Fetch the swarm list now, outside the schedule.
    Refresh,
}

/// Key to action map.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub global: HashMap<KeyEvent, Action>,
}

impl KeyBindings {
    /// Resolve a key press to an action.
    pub fn resolve(&self, key: KeyEvent) -> Option<Action> {
        self.global.get(&key).copied()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut global = HashMap::new();

        global.insert(key('j'), Action::NavigateDown);
        global.insert(key('k'), Action::NavigateUp);
        global.insert(key_code(KeyCode::Down), Action::NavigateDown);
        global.insert(key_code(KeyCode::Up), Action::NavigateUp);

        global.insert(key_code(KeyCode::Enter), Action::Toggle);
        global.insert(key(' '), Action::Toggle);
        global.insert(key('r'), Action::Refresh);
        global.insert(key('q'), Action::Quit);

        Self { global }
    }
}

fn key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
}

fn key_code(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}
