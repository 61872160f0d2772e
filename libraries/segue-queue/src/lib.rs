//! Segue - Queue Navigation
//!
//! Platform-agnostic queue controller for Segue.
//!
//! This crate provides:
//! - Play modes (Sequential, RepeatOne, RepeatAll, Shuffle)
//! - Non-committing `peek` and committing `resolve` navigation
//! - Shuffle permutations (Fisher–Yates, seedable)
//! - Back-navigation history for shuffle mode
//! - Mode-change observers
//!
//! The controller only decides which index of the filtered list is current.
//! Loading, painting and playback live in `segue-transition`.
//!
//! # Example
//!
//! ```rust
//! use segue_core::{Navigation, PlayMode, StaticPlaylist, TrackId};
//! use segue_queue::{QueueConfig, QueueController};
//! use std::sync::Arc;
//!
//! let playlist = Arc::new(StaticPlaylist::from_ids(["A", "B", "C"]));
//! let mut queue = QueueController::new(playlist, QueueConfig::default());
//!
//! // Peeking never moves the queue
//! assert_eq!(queue.peek(Navigation::Next), Some(1));
//! assert_eq!(queue.current_index(), Some(0));
//!
//! // Resolving commits the move
//! assert_eq!(queue.resolve(Navigation::Next), Some(TrackId::new("B")));
//!
//! queue.set_mode(PlayMode::RepeatAll);
//! queue.resolve(Navigation::Next);
//! assert_eq!(queue.resolve(Navigation::Next), Some(TrackId::new("A")));
//! ```

mod history;
mod queue;
mod shuffle;
pub mod types;

// Public exports
pub use history::History;
pub use queue::QueueController;
pub use shuffle::ShuffleOrder;
pub use types::{ModeChanged, QueueConfig, QueueSnapshot, DEFAULT_HISTORY_SIZE};
