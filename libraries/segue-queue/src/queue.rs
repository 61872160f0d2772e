//! Queue controller
//!
//! Pure state machine over "which index of the filtered list is current".
//! It knows nothing about rendering or loading: the transition orchestrator
//! asks it where a navigation would land (`peek`), paints accordingly, and only
//! then commits the move (`resolve`).

use std::sync::{Arc, Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::SeedableRng;
use segue_core::{Navigation, Observers, PlayMode, PlaylistProvider, SubscriptionId, TrackId};
use tracing::{debug, info};

use crate::history::History;
use crate::shuffle::ShuffleOrder;
use crate::types::{ModeChanged, QueueConfig, QueueSnapshot};

/// Navigation state over a playlist provider
///
/// Every operation on an empty list is a no-op returning `None`.
/// Out-of-range indices are clamped, never reported.
pub struct QueueController {
    playlist: Arc<dyn PlaylistProvider>,
    current_index: usize,
    mode: PlayMode,
    shuffle: ShuffleOrder,
    history: History,
    rng: StdRng,
    observers: Arc<Observers<ModeChanged>>,
    deferred: Option<Vec<ModeChanged>>,
}

impl QueueController {
    /// Bind a controller to the initial filtered list
    pub fn new(playlist: Arc<dyn PlaylistProvider>, config: QueueConfig) -> Self {
        let rng = match config.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let len = playlist.len();

        let mut controller = Self {
            playlist,
            current_index: clamp_index(config.start_index, len),
            mode: config.mode,
            shuffle: ShuffleOrder::default(),
            history: History::new(config.history_size),
            rng,
            observers: Arc::new(Observers::new()),
            deferred: None,
        };
        controller.rebuild_shuffle();
        controller
    }

    // ===== Queries =====

    /// Index a navigation would resolve to, without changing any state
    pub fn peek(&self, navigation: Navigation) -> Option<usize> {
        let len = self.playlist.len();
        if len == 0 {
            return None;
        }
        let current = self.current_index.min(len - 1);

        let target = match navigation {
            Navigation::Index(index) => index.min(len - 1),
            Navigation::Repeat => current,
            Navigation::Next | Navigation::Previous => match self.mode {
                PlayMode::RepeatOne => current,
                PlayMode::Shuffle => match navigation {
                    Navigation::Next => self.shuffle.peek_next().map_or(current, |i| i.min(len - 1)),
                    _ => self
                        .history
                        .peek()
                        .map_or(current.saturating_sub(1), |i| i.min(len - 1)),
                },
                PlayMode::Sequential | PlayMode::RepeatAll => {
                    step_in_order(current, navigation, len, self.mode)
                }
            },
        };

        Some(target)
    }

    /// Track a navigation would resolve to, without changing any state
    pub fn peek_track(&self, navigation: Navigation) -> Option<TrackId> {
        self.peek(navigation)
            .and_then(|index| self.playlist.track_id(index))
    }

    /// Current index, `None` when the list is empty
    pub fn current_index(&self) -> Option<usize> {
        let len = self.playlist.len();
        (len > 0).then(|| self.current_index.min(len - 1))
    }

    /// Current track, `None` when the list is empty
    pub fn current_track(&self) -> Option<TrackId> {
        self.current_index()
            .and_then(|index| self.playlist.track_id(index))
    }

    /// Active play mode
    pub fn mode(&self) -> PlayMode {
        self.mode
    }

    /// Shuffle permutation
    pub fn shuffle_order(&self) -> &[usize] {
        self.shuffle.order()
    }

    /// Slot of the shuffle permutation holding the current index
    pub fn shuffle_pointer(&self) -> usize {
        self.shuffle.pointer()
    }

    /// Back-navigation history, oldest first
    pub fn history(&self) -> Vec<usize> {
        self.history.to_vec()
    }

    /// Length of the filtered list
    pub fn len(&self) -> usize {
        self.playlist.len()
    }

    /// Whether the filtered list is empty
    pub fn is_empty(&self) -> bool {
        self.playlist.is_empty()
    }

    /// The list this controller navigates
    pub fn playlist(&self) -> &Arc<dyn PlaylistProvider> {
        &self.playlist
    }

    /// Copy of the full queue state
    pub fn snapshot(&self) -> QueueSnapshot {
        QueueSnapshot {
            current_index: self.current_index(),
            mode: self.mode,
            shuffle_order: self.shuffle.order().to_vec(),
            shuffle_pointer: self.shuffle.pointer(),
            history: self.history.to_vec(),
        }
    }

    // ===== Navigation =====

    /// Commit a navigation and return the resolved track
    pub fn resolve(&mut self, navigation: Navigation) -> Option<TrackId> {
        self.resolve_index(navigation)
            .and_then(|index| self.playlist.track_id(index))
    }

    /// Commit a navigation and return the resolved index
    ///
    /// Same target as [`peek`](Self::peek). In shuffle mode moving forward
    /// pushes the index being left onto the history; moving back pops it
    /// (or steps to `index - 1` when history is empty). An absolute index
    /// clears the history.
    pub fn resolve_index(&mut self, navigation: Navigation) -> Option<usize> {
        let len = self.playlist.len();
        if len == 0 {
            debug!("Resolve on empty playlist ignored");
            return None;
        }
        let current = self.current_index.min(len - 1);
        self.current_index = current;

        match navigation {
            Navigation::Index(index) => {
                self.current_index = index.min(len - 1);
                self.shuffle.recenter(self.current_index);
                self.history.clear();
            }
            Navigation::Repeat => {}
            Navigation::Next | Navigation::Previous => match self.mode {
                PlayMode::RepeatOne => {}
                PlayMode::Shuffle => {
                    if self.shuffle.len() != len {
                        self.rebuild_shuffle();
                    }
                    if navigation == Navigation::Next {
                        self.history.push(current);
                        self.current_index =
                            self.shuffle.advance().map_or(current, |i| i.min(len - 1));
                    } else {
                        self.current_index = self
                            .history
                            .pop()
                            .map_or(current.saturating_sub(1), |i| i.min(len - 1));
                        self.shuffle.recenter(self.current_index);
                    }
                }
                PlayMode::Sequential | PlayMode::RepeatAll => {
                    self.current_index = step_in_order(current, navigation, len, self.mode);
                }
            },
        }

        debug!(
            "Resolved {:?} in {} mode: {} -> {}",
            navigation, self.mode, current, self.current_index
        );
        Some(self.current_index)
    }

    /// Jump to `index` without a transition
    ///
    /// Unlike an absolute [`Navigation::Index`], history is kept.
    pub fn play_from_index(&mut self, index: usize) -> Option<TrackId> {
        let len = self.playlist.len();
        if len == 0 {
            return None;
        }
        self.current_index = index.min(len - 1);
        self.shuffle.recenter(self.current_index);
        self.playlist.track_id(self.current_index)
    }

    /// Make `id` current if it is in the filtered list
    pub fn sync_with_track(&mut self, id: &TrackId) -> Option<usize> {
        let index = self.playlist.position_of(id)?;
        self.current_index = index;
        self.shuffle.recenter(index);
        Some(index)
    }

    // ===== Mode =====

    /// Change the play mode
    ///
    /// Entering shuffle draws a fresh permutation centred on the current
    /// index and clears history. Returns false (and notifies nobody) if the
    /// mode is unchanged.
    pub fn set_mode(&mut self, mode: PlayMode) -> bool {
        if self.mode == mode {
            return false;
        }
        let previous = self.mode;
        self.mode = mode;

        if mode == PlayMode::Shuffle {
            self.rebuild_shuffle();
            self.history.clear();
        }

        info!("Play mode changed: {} -> {}", previous, mode);
        let change = ModeChanged { previous, mode };
        match self.deferred.as_mut() {
            Some(pending) => pending.push(change),
            None => self.observers.notify(&change),
        }
        true
    }

    /// Run `f` against a controller shared behind a mutex
    ///
    /// Mode changes made inside `f` reach observers only after the lock is
    /// released, so callbacks may lock the queue themselves.
    pub fn update<R>(queue: &Mutex<Self>, f: impl FnOnce(&mut Self) -> R) -> R {
        let (result, changes, observers) = {
            let mut guard = queue.lock().unwrap_or_else(PoisonError::into_inner);
            guard.deferred = Some(Vec::new());
            let result = f(&mut guard);
            let changes = guard.deferred.take().unwrap_or_default();
            (result, changes, Arc::clone(&guard.observers))
        };
        for change in &changes {
            observers.notify(change);
        }
        result
    }

    /// Shuffle button: Shuffle ↔ Sequential
    pub fn toggle_shuffle(&mut self) -> PlayMode {
        self.set_mode(self.mode.toggled_shuffle());
        self.mode
    }

    /// Repeat button: Sequential → RepeatOne → RepeatAll → Sequential
    pub fn cycle_repeat(&mut self) -> PlayMode {
        self.set_mode(self.mode.next_repeat());
        self.mode
    }

    /// Register a mode-change callback
    ///
    /// Callbacks run synchronously inside `set_mode`. When the controller is
    /// shared behind a mutex, change modes through [`update`](Self::update)
    /// so they run after the lock is released.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&ModeChanged) + Send + Sync + 'static,
    {
        self.observers.subscribe(callback)
    }

    /// Remove a mode-change callback
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    // ===== List changes =====

    /// Called after the provider re-sorts or re-filters
    ///
    /// Reclamps the current index, draws a new permutation and recentres it
    /// on the current index. History is kept; stale entries are clamped when
    /// popped.
    pub fn notify_list_changed(&mut self) {
        let len = self.playlist.len();
        self.current_index = clamp_index(self.current_index, len);
        self.rebuild_shuffle();
        debug!(
            "List changed: {} entries, current index {}",
            len, self.current_index
        );
    }

    /// Resize the history
    pub fn set_history_size(&mut self, size: usize) {
        self.history.set_max_size(size);
    }

    fn rebuild_shuffle(&mut self) {
        self.shuffle =
            ShuffleOrder::generate(self.playlist.len(), self.current_index, &mut self.rng);
    }
}

impl std::fmt::Debug for QueueController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueueController")
            .field("len", &self.playlist.len())
            .field("current_index", &self.current_index)
            .field("mode", &self.mode)
            .field("shuffle", &self.shuffle)
            .field("history", &self.history)
            .finish_non_exhaustive()
    }
}

fn clamp_index(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}

/// Sequential / RepeatAll stepping. Forward clamps at the end unless
/// RepeatAll wraps; backward always clamps at 0.
fn step_in_order(current: usize, navigation: Navigation, len: usize, mode: PlayMode) -> usize {
    match navigation {
        Navigation::Next if current + 1 >= len => {
            if mode == PlayMode::RepeatAll {
                0
            } else {
                len - 1
            }
        }
        Navigation::Next => current + 1,
        Navigation::Previous => current.saturating_sub(1),
        _ => current,
    }
}
