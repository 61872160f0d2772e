//! Transition orchestrator
//!
//! Runs one navigation as a single uninterruptible sequence:
//!
//! 1. Take the busy flag and the input lock
//! 2. Peek the queue to preview the incoming palette
//! 3. Cover the screen, then snap navigation closed and panels open
//! 4. Commit the queue move
//! 5. Load metadata, then audio, then video (each awaited in turn)
//! 6. Repaint the panels with the loaded palette
//! 7. Start audio and video together
//! 8. Reveal the screen
//! 9. Release the input lock and the busy flag
//!
//! Missing resources degrade the presentation; they never abort the sequence.
//! A trigger that arrives while a transition is running is ignored.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use segue_core::{
    Navigation, Observers, Palette, PlaylistProvider, SubscriptionId, TrackId, TrackMetadata,
    Visual,
};
use segue_queue::QueueController;
use tracing::{debug, info, warn};

use crate::cover::{self, Cover};
use crate::events::{TransitionEvent, TransitionOutcome, TransitionPhase};
use crate::loader::{PreparedTrack, ResourceLoader, Stage};
use crate::lock::InputLock;

/// Queue shared between the orchestrator, the controls and the host
pub type SharedQueue = Arc<Mutex<QueueController>>;

/// Sequences cover → resolve → load → start → reveal
pub struct TransitionOrchestrator {
    queue: SharedQueue,
    loader: Arc<dyn ResourceLoader>,
    cover: Cover,
    stage: Arc<dyn Stage>,
    lock: InputLock,
    busy: AtomicBool,
    phase: Mutex<TransitionPhase>,
    current: Mutex<Option<(TrackId, TrackMetadata)>>,
    events: Observers<TransitionEvent>,
}

impl TransitionOrchestrator {
    /// Create an orchestrator
    ///
    /// `lock` should be a clone of the gate every input handler consults.
    pub fn new(
        queue: SharedQueue,
        loader: Arc<dyn ResourceLoader>,
        cover: Cover,
        stage: Arc<dyn Stage>,
        lock: InputLock,
    ) -> Self {
        Self {
            queue,
            loader,
            cover,
            stage,
            lock,
            busy: AtomicBool::new(false),
            phase: Mutex::new(TransitionPhase::Idle),
            current: Mutex::new(None),
            events: Observers::new(),
        }
    }

    // ===== Entry points =====

    /// Transition to the next track under the active mode
    pub async fn go_next(&self) -> TransitionOutcome {
        self.transition(Navigation::Next).await
    }

    /// Transition to the previous track under the active mode
    pub async fn go_previous(&self) -> TransitionOutcome {
        self.transition(Navigation::Previous).await
    }

    /// Transition to an index of the filtered list (clamped)
    pub async fn go_to_index(&self, index: usize) -> TransitionOutcome {
        self.transition(Navigation::Index(index)).await
    }

    /// Transition into the current track, as done once at startup
    pub async fn play_current(&self) -> TransitionOutcome {
        self.transition(Navigation::Repeat).await
    }

    // ===== State =====

    /// Whether a transition is in flight
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Current phase
    pub fn phase(&self) -> TransitionPhase {
        *lock(&self.phase)
    }

    /// The shared input gate
    pub fn input_lock(&self) -> &InputLock {
        &self.lock
    }

    /// The queue this orchestrator drives
    pub fn queue(&self) -> &SharedQueue {
        &self.queue
    }

    /// Track and metadata of the last completed transition
    pub fn current(&self) -> Option<(TrackId, TrackMetadata)> {
        lock(&self.current).clone()
    }

    /// Register an event callback
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&TransitionEvent) + Send + Sync + 'static,
    {
        self.events.subscribe(callback)
    }

    /// Remove an event callback
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    // ===== Sequence =====

    async fn transition(&self, navigation: Navigation) -> TransitionOutcome {
        let Some(busy) = BusyGuard::enter(self) else {
            debug!("Transition in flight, ignoring {:?}", navigation);
            return TransitionOutcome::Ignored;
        };
        let Some(input) = self.lock.try_acquire() else {
            debug!("Input locked, ignoring {:?}", navigation);
            return TransitionOutcome::Ignored;
        };

        // Preview
        let preview = lock(&self.queue).peek_track(navigation);
        let Some(preview) = preview else {
            info!("Playlist is empty, nothing to transition to");
            return TransitionOutcome::NoTrack;
        };
        self.events.notify(&TransitionEvent::Started {
            navigation,
            preview: preview.clone(),
        });
        let preview_palette = self
            .loader
            .load_metadata_instant(&preview)
            .map_or(Palette::UNKNOWN, |metadata| metadata.palette());

        // Cover
        self.set_phase(TransitionPhase::Covering);
        self.cover
            .paint(&cover::entering(self.current_palette(), preview_palette));
        self.cover.cover_in().await;
        self.stage.close_navigation_instant();
        self.stage.open_panels_instant();

        // Commit
        self.set_phase(TransitionPhase::Loading);
        let resolved = {
            let mut queue = lock(&self.queue);
            queue
                .resolve_index(navigation)
                .and_then(|index| queue.playlist().track_id(index).map(|id| (index, id)))
        };
        let Some((index, track)) = resolved else {
            warn!("Playlist emptied during cover, revealing without a track");
            self.reveal_unchanged().await;
            self.finish();
            return TransitionOutcome::NoTrack;
        };
        debug!("Resolved {:?} to {} (index {})", navigation, track, index);
        self.events.notify(&TransitionEvent::TrackResolved {
            track: track.clone(),
            index,
        });

        // Load, strictly in order
        let metadata = self.loader.load_metadata_instant(&track).unwrap_or_else(|| {
            warn!("No metadata for track {}, using unknown", track);
            TrackMetadata::unknown()
        });
        self.stage.apply_metadata(&track, &metadata);

        let audio = self.loader.prepare_audio(&track).await;
        if audio.is_none() {
            warn!("No audio for track {}", track);
        }

        let visual = self.loader.prepare_visual(&track).await;
        if let Visual::Artwork(artwork) = &visual {
            debug!(
                "No video for track {}, artwork {}",
                track,
                artwork.as_ref().map_or_else(
                    || "missing".to_string(),
                    |path| path.display().to_string()
                )
            );
        }

        let prepared = PreparedTrack {
            id: track.clone(),
            metadata,
            audio,
            visual,
        };
        let presentation = prepared.presentation();

        // Repaint from the authoritative palette and start
        self.cover.paint(&cover::revealing(prepared.metadata.palette()));
        self.loader.start_playback(&prepared);
        self.stage.set_presentation(presentation);
        if presentation.is_degraded() {
            info!("Track {} playing in {:?} presentation", track, presentation);
        }
        *lock(&self.current) = Some((track.clone(), prepared.metadata));

        // Reveal
        self.set_phase(TransitionPhase::Revealing);
        self.cover.cover_out().await;

        self.finish();
        drop(input);
        drop(busy);

        info!("Now playing {}", track);
        self.events.notify(&TransitionEvent::Completed {
            track: track.clone(),
            presentation,
        });
        TransitionOutcome::Completed {
            track,
            presentation,
        }
    }

    async fn reveal_unchanged(&self) {
        self.cover.paint(&cover::revealing(self.current_palette()));
        self.set_phase(TransitionPhase::Revealing);
        self.cover.cover_out().await;
    }

    fn current_palette(&self) -> Palette {
        lock(&self.current)
            .as_ref()
            .map_or(Palette::UNKNOWN, |(_, metadata)| metadata.palette())
    }

    fn set_phase(&self, phase: TransitionPhase) {
        *lock(&self.phase) = phase;
        debug!("Transition phase: {}", phase);
        self.events
            .notify(&TransitionEvent::PhaseChanged { phase });
    }

    fn finish(&self) {
        self.set_phase(TransitionPhase::Idle);
    }
}

impl std::fmt::Debug for TransitionOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionOrchestrator")
            .field("busy", &self.is_busy())
            .field("phase", &self.phase())
            .field("cover", &self.cover)
            .finish_non_exhaustive()
    }
}

/// Clears the busy flag and the phase even if the transition future is dropped
struct BusyGuard<'a> {
    orchestrator: &'a TransitionOrchestrator,
}

impl<'a> BusyGuard<'a> {
    fn enter(orchestrator: &'a TransitionOrchestrator) -> Option<Self> {
        orchestrator
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { orchestrator })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        *lock(&self.orchestrator.phase) = TransitionPhase::Idle;
        self.orchestrator.busy.store(false, Ordering::Release);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
