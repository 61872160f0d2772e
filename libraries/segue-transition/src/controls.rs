//! Player controls
//!
//! User-facing buttons and shortcuts. Every control consults the shared input
//! lock first and does nothing while a transition is running.

use std::sync::Arc;
use std::time::Duration;

use segue_core::PlayMode;
use segue_queue::QueueController;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::events::TransitionOutcome;
use crate::input::Command;
use crate::orchestrator::TransitionOrchestrator;

/// Playback position and transport of the running track
pub trait Transport: Send + Sync {
    /// Position in the current track
    fn position(&self) -> Duration;

    /// Length of the current track, if known
    fn duration(&self) -> Option<Duration>;

    /// Whether audio is playing
    fn is_playing(&self) -> bool;

    /// Whether the current track has played to its end
    fn has_finished(&self) -> bool;

    /// Jump to a position
    fn seek(&self, position: Duration);

    /// Resume playback
    fn play(&self);

    /// Pause playback
    fn pause(&self);
}

/// Tunables for the controls
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlSettings {
    /// Distance of one skip, in seconds
    pub skip_seconds: f64,

    /// "Previous" restarts the current track when past this position, in seconds
    pub restart_threshold_seconds: f64,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            skip_seconds: 5.0,
            restart_threshold_seconds: 3.0,
        }
    }
}

/// What a control did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlOutcome {
    /// A transition ran (or was itself ignored)
    Transition(TransitionOutcome),

    /// The current track was restarted from 0
    Restarted,

    /// Playback moved within the current track
    Seeked(Duration),

    /// Playback paused or resumed
    PlayingChanged(bool),

    /// The play mode is now this
    Mode(PlayMode),

    /// Input is locked, or there was nothing to do
    Ignored,
}

/// Buttons and shortcuts of the player screen
pub struct PlayerControls {
    orchestrator: Arc<TransitionOrchestrator>,
    transport: Arc<dyn Transport>,
    settings: ControlSettings,
}

impl PlayerControls {
    /// Create controls for an orchestrator and the transport it starts
    pub fn new(
        orchestrator: Arc<TransitionOrchestrator>,
        transport: Arc<dyn Transport>,
        settings: ControlSettings,
    ) -> Self {
        Self {
            orchestrator,
            transport,
            settings,
        }
    }

    /// Control settings
    pub fn settings(&self) -> ControlSettings {
        self.settings
    }

    fn locked(&self) -> bool {
        let locked = self.orchestrator.input_lock().is_locked();
        if locked {
            debug!("Input locked, control ignored");
        }
        locked
    }

    /// Next button
    pub async fn next(&self) -> ControlOutcome {
        if self.locked() {
            return ControlOutcome::Ignored;
        }
        ControlOutcome::Transition(self.orchestrator.go_next().await)
    }

    /// Previous button
    ///
    /// Restarts the current track when it has played past the threshold,
    /// otherwise transitions back.
    pub async fn previous(&self) -> ControlOutcome {
        if self.locked() {
            return ControlOutcome::Ignored;
        }
        let threshold = to_duration(self.settings.restart_threshold_seconds, Duration::MAX);
        if self.transport.position() > threshold {
            self.transport.seek(Duration::ZERO);
            return ControlOutcome::Restarted;
        }
        ControlOutcome::Transition(self.orchestrator.go_previous().await)
    }

    /// Play/pause button
    pub fn toggle_pause(&self) -> ControlOutcome {
        if self.locked() {
            return ControlOutcome::Ignored;
        }
        if self.transport.is_playing() {
            self.transport.pause();
            ControlOutcome::PlayingChanged(false)
        } else {
            self.transport.play();
            ControlOutcome::PlayingChanged(true)
        }
    }

    /// Shuffle button
    pub fn toggle_shuffle(&self) -> ControlOutcome {
        if self.locked() {
            return ControlOutcome::Ignored;
        }
        ControlOutcome::Mode(self.with_queue(|queue| queue.toggle_shuffle()))
    }

    /// Repeat button
    pub fn cycle_repeat(&self) -> ControlOutcome {
        if self.locked() {
            return ControlOutcome::Ignored;
        }
        ControlOutcome::Mode(self.with_queue(|queue| queue.cycle_repeat()))
    }

    /// Skip forward by the configured distance
    pub async fn skip_forward(&self) -> ControlOutcome {
        self.skip_by(self.settings.skip_seconds).await
    }

    /// Skip backward by the configured distance
    pub async fn skip_backward(&self) -> ControlOutcome {
        self.skip_by(-self.settings.skip_seconds).await
    }

    /// Seek relative to the current position
    ///
    /// Skipping past the end moves to the next track; skipping before the
    /// start clamps to 0.
    pub async fn skip_by(&self, seconds: f64) -> ControlOutcome {
        if self.locked() {
            return ControlOutcome::Ignored;
        }
        let target = self.transport.position().as_secs_f64() + seconds;
        if let Some(duration) = self.transport.duration() {
            if target >= duration.as_secs_f64() {
                debug!("Skipped past the end, moving to next track");
                return ControlOutcome::Transition(self.orchestrator.go_next().await);
            }
        }
        // Past any representable position with no known length: nothing to land on
        let position = to_duration(target, Duration::ZERO);
        self.transport.seek(position);
        ControlOutcome::Seeked(position)
    }

    /// Called by the host on every tick; handles the end of a track
    ///
    /// RepeatOne restarts the track in place, every other mode moves on.
    pub async fn on_tick(&self) -> ControlOutcome {
        if self.orchestrator.is_busy() || !self.transport.has_finished() {
            return ControlOutcome::Ignored;
        }
        let mode = self.with_queue(|queue| queue.mode());
        if mode == PlayMode::RepeatOne {
            debug!("Track finished, repeating");
            self.transport.seek(Duration::ZERO);
            self.transport.play();
            return ControlOutcome::Restarted;
        }
        debug!("Track finished, advancing");
        ControlOutcome::Transition(self.orchestrator.go_next().await)
    }

    /// Run a dispatched command
    pub async fn dispatch(&self, command: Command) -> ControlOutcome {
        match command {
            Command::TogglePause => self.toggle_pause(),
            Command::SkipBackward => self.skip_backward().await,
            Command::SkipForward => self.skip_forward().await,
            Command::Previous => self.previous().await,
            Command::Next => self.next().await,
            Command::ToggleShuffle => self.toggle_shuffle(),
            Command::CycleRepeat => self.cycle_repeat(),
        }
    }

    fn with_queue<R>(&self, f: impl FnOnce(&mut QueueController) -> R) -> R {
        QueueController::update(self.orchestrator.queue(), f)
    }
}

/// Seconds as a duration; negatives clamp to 0, overflow becomes `overflow`
fn to_duration(seconds: f64, overflow: Duration) -> Duration {
    Duration::try_from_secs_f64(seconds.max(0.0)).unwrap_or(overflow)
}

impl std::fmt::Debug for PlayerControls {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerControls")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
