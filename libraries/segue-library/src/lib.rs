//! Segue - Library
//!
//! File-backed collaborators for the queue and the transition orchestrator.
//!
//! A library is a flat directory of per-track assets keyed by an id token:
//! `info{id}.json` (metadata), `song{id}.mp3`, `video{id}_*.mp4` and
//! `logo{id}.png`.
//!
//! This crate provides:
//! - `Library`: scans the metadata documents and serves the sorted, filtered
//!   view as a `PlaylistProvider`
//! - `FsResourceLoader`: resolves audio, videos and artwork for the
//!   orchestrator and rotates background clips round-robin

pub mod error;
pub mod library;
pub mod loader;
pub mod naming;

pub use error::{LibraryError, Result};
pub use library::{Library, LibraryChanged, LibraryView, SortKey};
pub use loader::{FsResourceLoader, MediaSink};
pub use naming::AssetPaths;
