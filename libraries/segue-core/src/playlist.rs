//! Playlist provider abstraction
//!
//! The queue controller never owns the track list. It reads the current
//! filtered, sorted view through this trait and is told when that view changes.

use std::sync::Arc;

use crate::types::{TrackEntry, TrackId};

/// Read-only view of the filtered track list
///
/// Implementors own sorting and filtering; after any change they must have
/// the queue controller's `notify_list_changed` called so indices are reclamped.
pub trait PlaylistProvider: Send + Sync {
    /// Number of entries in the filtered list
    fn len(&self) -> usize;

    /// Entry at `index` in the filtered list
    fn entry(&self, index: usize) -> Option<TrackEntry>;

    /// Identifier at `index` in the filtered list
    fn track_id(&self, index: usize) -> Option<TrackId> {
        self.entry(index).map(|entry| entry.id)
    }

    /// Position of `id` in the filtered list
    fn position_of(&self, id: &TrackId) -> Option<usize> {
        (0..self.len()).find(|&index| self.track_id(index).as_ref() == Some(id))
    }

    /// Whether the filtered list is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<P: PlaylistProvider + ?Sized> PlaylistProvider for Arc<P> {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn entry(&self, index: usize) -> Option<TrackEntry> {
        (**self).entry(index)
    }

    fn track_id(&self, index: usize) -> Option<TrackId> {
        (**self).track_id(index)
    }

    fn position_of(&self, id: &TrackId) -> Option<usize> {
        (**self).position_of(id)
    }
}

/// Fixed, in-memory playlist
///
/// Handy for hosts that build the list once and for tests.
#[derive(Debug, Clone, Default)]
pub struct StaticPlaylist {
    entries: Vec<TrackEntry>,
}

impl StaticPlaylist {
    /// Create a playlist from entries, in order
    pub fn new(entries: Vec<TrackEntry>) -> Self {
        Self { entries }
    }

    /// Create a playlist of bare entries from identifier tokens
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            ids.into_iter()
                .map(|id| TrackEntry::new(TrackId::new(id)))
                .collect(),
        )
    }

    /// All entries, in order
    pub fn entries(&self) -> &[TrackEntry] {
        &self.entries
    }
}

impl PlaylistProvider for StaticPlaylist {
    fn len(&self) -> usize {
        self.entries.len()
    }

    fn entry(&self, index: usize) -> Option<TrackEntry> {
        self.entries.get(index).cloned()
    }

    fn track_id(&self, index: usize) -> Option<TrackId> {
        self.entries.get(index).map(|entry| entry.id.clone())
    }
}
