//! Terminal command language
//!
//! One command per line. Player controls mirror the on-screen buttons; the
//! rest drive the library menu or inspect state.

use std::str::FromStr;

use segue_core::{PlayMode, TrackId};
use segue_library::SortKey;
use segue_transition::{Command, Key};

use crate::error::PlayerError;

/// A parsed terminal command
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerCommand {
    /// A player control, as if its button was pressed
    Control(Command),

    /// Seek by a signed number of seconds
    Skip(f64),

    /// Jump to a position in the visible list
    Goto(usize),

    /// Press a sort column (flips direction when already active)
    Sort(SortKey),

    /// Toggle the favorites filter
    Favorites,

    /// Mark or unmark a favorite
    Favorite { id: TrackId, favorite: bool },

    /// Switch play mode directly
    Mode(PlayMode),

    /// Hold these keys for one tick (empty releases everything)
    Keys(Vec<Key>),

    /// Re-read the library directory
    Rescan,

    /// Print the visible list
    List,

    /// Print what is playing
    Status,

    /// Print the command summary
    Help,

    /// Leave the player
    Quit,
}

pub const HELP: &str = "\
commands:
  next | n                 next track
  prev | p                 previous track (restarts past 3s)
  pause | space            play/pause
  ff | rw                  skip forward / backward
  skip <seconds>           seek by a signed offset
  shuffle | s              shuffle on/off
  repeat | l               cycle repeat modes
  mode <name>              sequential, repeat-one, repeat-all, shuffle
  goto <position>          play a position of the visible list
  sort id|title|game       sort the list (same key flips direction)
  favorites                toggle the favorites filter
  fav <id> on|off          mark or unmark a favorite
  key [names...]           hold keys for one tick: space left right p n s l
  rescan                   re-read the library directory
  list | status | help | quit";

impl FromStr for PlayerCommand {
    type Err = PlayerError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(PlayerError::Command("empty command".to_string()));
        };
        let args: Vec<&str> = words.collect();

        let command = match (head.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("next" | "n", []) => Self::Control(Command::Next),
            ("prev" | "previous" | "p", []) => Self::Control(Command::Previous),
            ("pause" | "play" | "space", []) => Self::Control(Command::TogglePause),
            ("ff", []) => Self::Control(Command::SkipForward),
            ("rw", []) => Self::Control(Command::SkipBackward),
            ("shuffle" | "s", []) => Self::Control(Command::ToggleShuffle),
            ("repeat" | "l", []) => Self::Control(Command::CycleRepeat),
            ("skip", [seconds]) => Self::Skip(parse_number(seconds)?),
            ("goto", [position]) => Self::Goto(
                position
                    .parse()
                    .map_err(|_| invalid(format!("not a position: {}", position)))?,
            ),
            ("sort", [key]) => Self::Sort(
                SortKey::from_str(key).ok_or_else(|| invalid(format!("unknown sort key: {}", key)))?,
            ),
            ("favorites", []) => Self::Favorites,
            ("fav", [id, state]) => Self::Favorite {
                id: TrackId::new(*id),
                favorite: parse_switch(state)?,
            },
            ("mode", [mode]) => Self::Mode(
                PlayMode::from_str(mode).ok_or_else(|| invalid(format!("unknown mode: {}", mode)))?,
            ),
            ("key", names) => Self::Keys(
                names
                    .iter()
                    .map(|name| {
                        Key::from_str(name).ok_or_else(|| invalid(format!("unknown key: {}", name)))
                    })
                    .collect::<Result<_, _>>()?,
            ),
            ("rescan", []) => Self::Rescan,
            ("list" | "ls", []) => Self::List,
            ("status", []) => Self::Status,
            ("help" | "?", []) => Self::Help,
            ("quit" | "exit" | "q", []) => Self::Quit,
            _ => return Err(invalid(line.trim().to_string())),
        };
        Ok(command)
    }
}

fn invalid(message: String) -> PlayerError {
    PlayerError::Command(message)
}

fn parse_number(s: &str) -> Result<f64, PlayerError> {
    s.parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| invalid(format!("not a number: {}", s)))
}

fn parse_switch(s: &str) -> Result<bool, PlayerError> {
    match s.to_ascii_lowercase().as_str() {
        "on" | "yes" | "true" => Ok(true),
        "off" | "no" | "false" => Ok(false),
        other => Err(invalid(format!("expected on or off, got {}", other))),
    }
}
