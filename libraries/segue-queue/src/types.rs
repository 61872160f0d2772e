//! Queue configuration and snapshots

use segue_core::PlayMode;
use serde::{Deserialize, Serialize};

/// Default history capacity
pub const DEFAULT_HISTORY_SIZE: usize = 512;

/// Configuration for the queue controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Initial play mode (default: Sequential)
    pub mode: PlayMode,

    /// Index to start on, clamped into the list (default: 0)
    pub start_index: usize,

    /// Maximum back-navigation history (default: 512)
    pub history_size: usize,

    /// Seed for shuffle permutations; entropy when `None`
    pub shuffle_seed: Option<u64>,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            mode: PlayMode::Sequential,
            start_index: 0,
            history_size: DEFAULT_HISTORY_SIZE,
            shuffle_seed: None,
        }
    }
}

/// Emitted to mode observers after the play mode changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeChanged {
    /// Mode before the change
    pub previous: PlayMode,
    /// Mode now active
    pub mode: PlayMode,
}

/// Point-in-time copy of the queue state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueSnapshot {
    /// Current index, `None` for an empty list
    pub current_index: Option<usize>,
    /// Active mode
    pub mode: PlayMode,
    /// Shuffle permutation
    pub shuffle_order: Vec<usize>,
    /// Slot of the shuffle permutation holding the current index
    pub shuffle_pointer: usize,
    /// Back-navigation history, oldest first
    pub history: Vec<usize>,
}
