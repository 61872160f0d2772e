//! Keyboard shortcuts
//!
//! The host calls [`KeyDispatcher::tick`] at its own cadence with the keys
//! currently held. A command fires once when its key goes down, not on every
//! tick it stays held. Key-downs while input is locked are swallowed.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Keys the player responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Space bar
    Space,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// P
    P,
    /// N
    N,
    /// S
    S,
    /// L
    L,
}

impl Key {
    /// Parse a key name, case-insensitive
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "space" => Some(Self::Space),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            "p" => Some(Self::P),
            "n" => Some(Self::N),
            "s" => Some(Self::S),
            "l" => Some(Self::L),
            _ => None,
        }
    }
}

/// Actions a shortcut can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Command {
    /// Play/pause
    TogglePause,
    /// Seek backward by the skip distance
    SkipBackward,
    /// Seek forward by the skip distance
    SkipForward,
    /// Previous track (or restart)
    Previous,
    /// Next track
    Next,
    /// Shuffle on/off
    ToggleShuffle,
    /// Cycle repeat modes
    CycleRepeat,
}

impl Command {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TogglePause => "toggle-pause",
            Self::SkipBackward => "skip-backward",
            Self::SkipForward => "skip-forward",
            Self::Previous => "previous",
            Self::Next => "next",
            Self::ToggleShuffle => "toggle-shuffle",
            Self::CycleRepeat => "cycle-repeat",
        }
    }
}

/// Default key bindings, in dispatch order
pub const DEFAULT_BINDINGS: [(Key, Command); 7] = [
    (Key::Space, Command::TogglePause),
    (Key::Left, Command::SkipBackward),
    (Key::Right, Command::SkipForward),
    (Key::P, Command::Previous),
    (Key::N, Command::Next),
    (Key::S, Command::ToggleShuffle),
    (Key::L, Command::CycleRepeat),
];

/// Turns held-key snapshots into key-down commands
#[derive(Debug, Clone)]
pub struct KeyDispatcher {
    bindings: Vec<(Key, Command)>,
    held: HashSet<Key>,
}

impl Default for KeyDispatcher {
    fn default() -> Self {
        Self::new(DEFAULT_BINDINGS.to_vec())
    }
}

impl KeyDispatcher {
    /// Dispatcher with custom bindings
    pub fn new(bindings: Vec<(Key, Command)>) -> Self {
        Self {
            bindings,
            held: HashSet::new(),
        }
    }

    /// Feed the keys held this tick; returns commands for keys that just went down
    pub fn tick(&mut self, pressed: &HashSet<Key>, locked: bool) -> Vec<Command> {
        let commands = if locked {
            Vec::new()
        } else {
            self.bindings
                .iter()
                .filter(|(key, _)| pressed.contains(key) && !self.held.contains(key))
                .map(|(_, command)| *command)
                .collect()
        };
        self.held.clone_from(pressed);
        commands
    }

    /// Forget held keys, e.g. when the window loses focus
    pub fn reset(&mut self) {
        self.held.clear();
    }
}
