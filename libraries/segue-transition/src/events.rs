//! Transition events
//!
//! Emitted to the orchestrator's observer list at key points:
//! - A transition starts (after the busy check)
//! - The phase changes
//! - The queue move is committed
//! - The transition completes and input is released

use segue_core::{Navigation, Presentation, TrackId};

/// Where the orchestrator is in its cover → load → reveal cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransitionPhase {
    /// No transition running; input accepted
    #[default]
    Idle,
    /// Panels sliding in
    Covering,
    /// Screen hidden; queue committed and media loading
    Loading,
    /// Playback started; panels sliding away
    Revealing,
}

impl TransitionPhase {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Covering => "covering",
            Self::Loading => "loading",
            Self::Revealing => "revealing",
        }
    }
}

impl std::fmt::Display for TransitionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Events emitted by the transition orchestrator
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionEvent {
    /// A transition was accepted
    Started {
        /// Requested navigation
        navigation: Navigation,
        /// Track the queue previewed; the committed track may differ only if
        /// the list changed during the cover
        preview: TrackId,
    },

    /// Phase changed
    PhaseChanged {
        /// The new phase
        phase: TransitionPhase,
    },

    /// The queue move was committed
    TrackResolved {
        /// Committed track
        track: TrackId,
        /// Its index in the filtered list
        index: usize,
    },

    /// Playback started, the screen is revealed and input is released
    Completed {
        /// Track now playing
        track: TrackId,
        /// Presentation it resolved to
        presentation: Presentation,
    },
}

/// Result of asking the orchestrator for a transition
///
/// None of these are errors: a busy orchestrator or an empty list simply
/// leave everything unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The transition ran to completion
    Completed {
        /// Track now playing
        track: TrackId,
        /// Presentation it resolved to
        presentation: Presentation,
    },

    /// Another transition was in flight, or input is locked
    Ignored,

    /// The filtered list is empty
    NoTrack,
}

impl TransitionOutcome {
    /// Track now playing, if the transition completed
    pub fn track(&self) -> Option<&TrackId> {
        match self {
            Self::Completed { track, .. } => Some(track),
            Self::Ignored | Self::NoTrack => None,
        }
    }

    /// Whether the transition ran
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}
