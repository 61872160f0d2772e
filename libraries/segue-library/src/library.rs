//! Track library
//!
//! Scans a directory of metadata documents and exposes the sorted, filtered
//! view the queue navigates. Every change to the view is announced to the
//! registered listeners after the internal lock has been released, so a
//! listener may read the library (and the queue may call back into it).

use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use segue_core::{Observers, PlaylistProvider, SubscriptionId, TrackEntry, TrackId, TrackMetadata};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::{LibraryError, Result};
use crate::naming::id_from_metadata_file;

/// Field the view is sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Id token: numeric when both parse, otherwise ordinal
    #[default]
    Id,
    /// Title, ordinal
    Title,
    /// Game, ordinal
    Game,
}

impl SortKey {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::Game => "game",
        }
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "id" => Some(Self::Id),
            "title" => Some(Self::Title),
            "game" => Some(Self::Game),
            _ => None,
        }
    }

    fn compare(self, a: &TrackEntry, b: &TrackEntry) -> Ordering {
        match self {
            Self::Id => compare_ids(&a.id, &b.id),
            Self::Title => a.title().cmp(b.title()),
            Self::Game => a.game().cmp(b.game()),
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort and filter settings of the visible list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryView {
    /// Sort field
    pub sort: SortKey,
    /// Ascending when true
    pub ascending: bool,
    /// Only show favorites
    pub favorites_only: bool,
}

impl Default for LibraryView {
    fn default() -> Self {
        Self {
            sort: SortKey::Id,
            ascending: true,
            favorites_only: false,
        }
    }
}

/// Emitted to listeners after the visible list changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LibraryChanged {
    /// Settings now applied
    pub view: LibraryView,
    /// Number of visible entries
    pub len: usize,
}

#[derive(Debug, Default)]
struct LibraryState {
    /// Every entry, in id order
    entries: Vec<TrackEntry>,
    view: LibraryView,
    /// Indices into `entries`, in display order
    visible: Vec<usize>,
}

impl LibraryState {
    fn refresh(&mut self) {
        let entries = &self.entries;
        let view = self.view;

        let mut visible: Vec<usize> = (0..entries.len())
            .filter(|&i| !view.favorites_only || entries[i].is_favorite())
            .collect();
        visible.sort_by(|&a, &b| {
            let ordering = view.sort.compare(&entries[a], &entries[b]);
            if view.ascending {
                ordering
            } else {
                ordering.reverse()
            }
        });
        self.visible = visible;
    }
}

/// Playlist provider backed by a directory of `info{id}.json` documents
pub struct Library {
    root: PathBuf,
    state: RwLock<LibraryState>,
    listeners: Observers<LibraryChanged>,
}

impl Library {
    /// Scan `root` and build the library with the default view
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let entries = scan(&root)?;
        info!("Loaded {} tracks from {}", entries.len(), root.display());
        Ok(Self::with_entries(root, entries))
    }

    /// Build a library from entries already in memory
    pub fn with_entries(root: impl Into<PathBuf>, mut entries: Vec<TrackEntry>) -> Self {
        entries.sort_by(|a, b| compare_ids(&a.id, &b.id));
        let mut state = LibraryState {
            entries,
            ..LibraryState::default()
        };
        state.refresh();

        Self {
            root: root.into(),
            state: RwLock::new(state),
            listeners: Observers::new(),
        }
    }

    /// Library directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Re-read the directory; returns the number of tracks found
    pub fn rescan(&self) -> Result<usize> {
        let entries = scan(&self.root)?;
        let count = entries.len();
        self.update(|state| {
            state.entries = entries;
            true
        });
        info!("Rescanned {}: {} tracks", self.root.display(), count);
        Ok(count)
    }

    // ===== View =====

    /// Current sort and filter settings
    pub fn view(&self) -> LibraryView {
        self.read().view
    }

    /// Sort by `key` in the given direction
    pub fn set_sort(&self, key: SortKey, ascending: bool) {
        self.update(|state| {
            let changed = state.view.sort != key || state.view.ascending != ascending;
            state.view.sort = key;
            state.view.ascending = ascending;
            changed
        });
    }

    /// Sort button: the active key flips direction, a new key sorts ascending
    pub fn sort_by(&self, key: SortKey) -> LibraryView {
        let view = self.view();
        let ascending = if view.sort == key {
            !view.ascending
        } else {
            true
        };
        self.set_sort(key, ascending);
        self.view()
    }

    /// Show only favorites, or everything
    pub fn set_favorites_only(&self, favorites_only: bool) {
        self.update(|state| {
            let changed = state.view.favorites_only != favorites_only;
            state.view.favorites_only = favorites_only;
            changed
        });
    }

    /// Favorites button
    pub fn toggle_favorites_only(&self) -> bool {
        let favorites_only = !self.view().favorites_only;
        self.set_favorites_only(favorites_only);
        favorites_only
    }

    /// Mark a track as favorite in memory; returns false for unknown ids
    ///
    /// Writing the flag back to the metadata document is left to the host.
    pub fn set_favorite(&self, id: &TrackId, favorite: bool) -> bool {
        let mut found = false;
        self.update(|state| {
            let Some(entry) = state.entries.iter_mut().find(|e| &e.id == id) else {
                return false;
            };
            found = true;
            if entry.metadata.favorite == favorite {
                return false;
            }
            entry.metadata.favorite = favorite;
            // Only a favorites-filtered view changes shape
            state.view.favorites_only
        });
        if found {
            debug!("Track {} favorite: {}", id, favorite);
        }
        found
    }

    // ===== Lookup =====

    /// Entry by id, visible or not
    pub fn get(&self, id: &TrackId) -> Option<TrackEntry> {
        self.read().entries.iter().find(|e| &e.id == id).cloned()
    }

    /// Every entry in id order, ignoring the view
    pub fn all_entries(&self) -> Vec<TrackEntry> {
        self.read().entries.clone()
    }

    /// Visible entries in display order
    pub fn visible_entries(&self) -> Vec<TrackEntry> {
        let state = self.read();
        state
            .visible
            .iter()
            .map(|&i| state.entries[i].clone())
            .collect()
    }

    // ===== Listeners =====

    /// Register a callback run after every change of the visible list
    pub fn on_change<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&LibraryChanged) + Send + Sync + 'static,
    {
        self.listeners.subscribe(callback)
    }

    /// Remove a change callback
    pub fn remove_listener(&self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Apply `change` under the write lock; if it reports a change, rebuild
    /// the visible list and notify once the lock is released
    fn update(&self, change: impl FnOnce(&mut LibraryState) -> bool) {
        let event = {
            let mut state = self.write();
            if !change(&mut state) {
                return;
            }
            state.refresh();
            LibraryChanged {
                view: state.view,
                len: state.visible.len(),
            }
        };
        debug!(
            "Library view changed: sort {} {}, favorites only {}, {} visible",
            event.view.sort,
            if event.view.ascending { "asc" } else { "desc" },
            event.view.favorites_only,
            event.len
        );
        self.listeners.notify(&event);
    }

    fn read(&self) -> RwLockReadGuard<'_, LibraryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, LibraryState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PlaylistProvider for Library {
    fn len(&self) -> usize {
        self.read().visible.len()
    }

    fn entry(&self, index: usize) -> Option<TrackEntry> {
        let state = self.read();
        state
            .visible
            .get(index)
            .map(|&i| state.entries[i].clone())
    }

    fn track_id(&self, index: usize) -> Option<TrackId> {
        let state = self.read();
        state
            .visible
            .get(index)
            .map(|&i| state.entries[i].id.clone())
    }

    fn position_of(&self, id: &TrackId) -> Option<usize> {
        let state = self.read();
        state
            .visible
            .iter()
            .position(|&i| &state.entries[i].id == id)
    }
}

impl std::fmt::Debug for Library {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.read();
        f.debug_struct("Library")
            .field("root", &self.root)
            .field("entries", &state.entries.len())
            .field("visible", &state.visible.len())
            .field("view", &state.view)
            .finish_non_exhaustive()
    }
}

/// Numeric when both ids parse, ordinal otherwise
fn compare_ids(a: &TrackId, b: &TrackId) -> Ordering {
    match (a.as_number(), b.as_number()) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.as_str().cmp(b.as_str())),
        _ => a.as_str().cmp(b.as_str()),
    }
}

/// Read every `info*.json` directly under `root`
///
/// Unreadable or malformed documents are kept as unknown-track entries so
/// the track still appears and plays with the fallback palette.
fn scan(root: &Path) -> Result<Vec<TrackEntry>> {
    if !root.exists() {
        return Err(LibraryError::NotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(LibraryError::NotADirectory(root.to_path_buf()));
    }

    let mut entries = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).max_depth(1) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(id) = entry.file_name().to_str().and_then(id_from_metadata_file) else {
            continue;
        };

        let metadata = match std::fs::read_to_string(entry.path()) {
            Ok(json) => TrackMetadata::from_json(&json).unwrap_or_else(|e| {
                warn!("Malformed metadata {}: {}", entry.path().display(), e);
                TrackMetadata::unknown()
            }),
            Err(e) => {
                warn!("Failed to read {}: {}", entry.path().display(), e);
                TrackMetadata::unknown()
            }
        };
        entries.push(TrackEntry::with_metadata(id, metadata));
    }

    entries.sort_by(|a, b| compare_ids(&a.id, &b.id));
    Ok(entries)
}
