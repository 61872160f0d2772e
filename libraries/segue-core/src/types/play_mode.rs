/// Play mode and navigation requests
use serde::{Deserialize, Serialize};

/// Order in which the queue advances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlayMode {
    /// Walk the list in order, stop at either end
    #[default]
    Sequential,

    /// Stay on the current track
    RepeatOne,

    /// Walk the list in order, wrap from last to first
    RepeatAll,

    /// Walk a random permutation of the list
    Shuffle,
}

impl PlayMode {
    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sequential => "sequential",
            Self::RepeatOne => "repeat-one",
            Self::RepeatAll => "repeat-all",
            Self::Shuffle => "shuffle",
        }
    }

    /// Parse from string
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "sequential" | "normal" => Some(Self::Sequential),
            "repeat-one" => Some(Self::RepeatOne),
            "repeat-all" => Some(Self::RepeatAll),
            "shuffle" => Some(Self::Shuffle),
            _ => None,
        }
    }

    /// Mode after pressing the shuffle toggle
    #[must_use]
    pub fn toggled_shuffle(self) -> Self {
        if self == Self::Shuffle {
            Self::Sequential
        } else {
            Self::Shuffle
        }
    }

    /// Mode after pressing the repeat button
    ///
    /// Sequential → RepeatOne → RepeatAll → Sequential; Shuffle goes to RepeatOne.
    #[must_use]
    pub fn next_repeat(self) -> Self {
        match self {
            Self::Sequential | Self::Shuffle => Self::RepeatOne,
            Self::RepeatOne => Self::RepeatAll,
            Self::RepeatAll => Self::Sequential,
        }
    }

    /// Whether a repeat indicator should be lit
    pub fn is_repeat(self) -> bool {
        matches!(self, Self::RepeatOne | Self::RepeatAll)
    }
}

impl std::fmt::Display for PlayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A navigation request against the queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Navigation {
    /// Step forward under the active mode
    Next,

    /// Step backward under the active mode
    Previous,

    /// Resolve to the current index
    Repeat,

    /// Jump to an absolute index in the filtered list (clamped)
    Index(usize),
}

impl Navigation {
    /// Build a request from a signed step; anything positive is `Next`,
    /// anything negative is `Previous`
    pub fn from_step(step: i32) -> Self {
        match step.signum() {
            1 => Self::Next,
            -1 => Self::Previous,
            _ => Self::Repeat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_round_trip_names() {
        for mode in [
            PlayMode::Sequential,
            PlayMode::RepeatOne,
            PlayMode::RepeatAll,
            PlayMode::Shuffle,
        ] {
            assert_eq!(PlayMode::from_str(mode.as_str()), Some(mode));
        }
        assert_eq!(PlayMode::from_str("normal"), Some(PlayMode::Sequential));
        assert_eq!(PlayMode::from_str("loop"), None);
    }

    #[test]
    fn repeat_button_cycle() {
        assert_eq!(PlayMode::Sequential.next_repeat(), PlayMode::RepeatOne);
        assert_eq!(PlayMode::RepeatOne.next_repeat(), PlayMode::RepeatAll);
        assert_eq!(PlayMode::RepeatAll.next_repeat(), PlayMode::Sequential);
        assert_eq!(PlayMode::Shuffle.next_repeat(), PlayMode::RepeatOne);
    }

    #[test]
    fn shuffle_toggle() {
        assert_eq!(PlayMode::RepeatAll.toggled_shuffle(), PlayMode::Shuffle);
        assert_eq!(PlayMode::Shuffle.toggled_shuffle(), PlayMode::Sequential);
    }

    #[test]
    fn steps_collapse_to_directions() {
        assert_eq!(Navigation::from_step(5), Navigation::Next);
        assert_eq!(Navigation::from_step(-2), Navigation::Previous);
        assert_eq!(Navigation::from_step(0), Navigation::Repeat);
    }

    #[test]
    fn serde_uses_kebab_case() {
        let json = serde_json::to_string(&PlayMode::RepeatAll).unwrap();
        assert_eq!(json, "\"repeat-all\"");
    }
}
