//! Segue Core
//!
//! Platform-agnostic types shared by every Segue crate.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `TrackId`, `TrackEntry`, `TrackMetadata`, `Rgba`, `PlayMode`
//! - **Media Types**: `AudioAsset`, `VideoPlaylist`, `Visual`, `Presentation`
//! - **Core Traits**: `PlaylistProvider` (the ordered, filtered list the queue walks)
//! - **Observers**: explicit callback registration used for mode and transition events
//! - **Error Handling**: Unified `SegueError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use segue_core::{PlaylistProvider, StaticPlaylist, TrackEntry, TrackId};
//!
//! let playlist = StaticPlaylist::new(vec![
//!     TrackEntry::titled("7", "Opening"),
//!     TrackEntry::titled("12", "Boss Theme"),
//! ]);
//!
//! assert_eq!(playlist.len(), 2);
//! assert_eq!(playlist.track_id(1), Some(TrackId::new("12")));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod observer;
pub mod playlist;
pub mod types;

pub use error::{Result, SegueError};
pub use observer::{Observers, SubscriptionId};
pub use playlist::{PlaylistProvider, StaticPlaylist};
pub use types::{
    AudioAsset, Highlight, HighlightRange, Navigation, Palette, PlayMode, Presentation, Rgba,
    TrackEntry, TrackId, TrackMetadata, VideoPlaylist, Visual, UNKNOWN_TITLE,
};
