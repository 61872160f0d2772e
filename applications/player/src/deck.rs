//! Simulated media deck
//!
//! Stands in for real audio and video output. It keeps a playback clock that
//! the session advances on every tick, which is all the controls need to
//! seek, restart and detect the end of a track.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use segue_core::AudioAsset;
use segue_library::MediaSink;
use segue_transition::Transport;
use tracing::{debug, info};

#[derive(Debug, Default)]
struct DeckState {
    audio: Option<PathBuf>,
    clip: Option<PathBuf>,
    artwork: Option<PathBuf>,
    duration: Option<Duration>,
    position: Duration,
    playing: bool,
    clip_elapsed: Duration,
}

/// What happened during one [`SimulatedDeck::advance`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeckTick {
    /// The background clip reached its end and wants the next one
    pub clip_finished: bool,
}

/// Media sink and transport backed by a clock instead of decoders
#[derive(Debug)]
pub struct SimulatedDeck {
    track_length: Duration,
    clip_length: Duration,
    state: Mutex<DeckState>,
}

impl SimulatedDeck {
    /// `track_length` is used for audio without a known duration
    pub fn new(track_length: Duration, clip_length: Duration) -> Self {
        Self {
            track_length,
            clip_length,
            state: Mutex::new(DeckState::default()),
        }
    }

    /// Move the clock forward by `elapsed`
    pub fn advance(&self, elapsed: Duration) -> DeckTick {
        let mut state = self.state();
        let mut tick = DeckTick::default();
        if !state.playing {
            return tick;
        }

        if let Some(duration) = state.duration {
            state.position = (state.position + elapsed).min(duration);
        }

        if state.clip.is_some() && !self.clip_length.is_zero() {
            state.clip_elapsed += elapsed;
            if state.clip_elapsed >= self.clip_length {
                state.clip_elapsed = Duration::ZERO;
                tick.clip_finished = true;
            }
        }
        tick
    }

    /// Audio file currently loaded
    pub fn audio(&self) -> Option<PathBuf> {
        self.state().audio.clone()
    }

    /// Background clip on screen
    pub fn clip(&self) -> Option<PathBuf> {
        self.state().clip.clone()
    }

    /// Artwork on screen when there is no clip
    pub fn artwork(&self) -> Option<PathBuf> {
        self.state().artwork.clone()
    }

    fn state(&self) -> MutexGuard<'_, DeckState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl MediaSink for SimulatedDeck {
    fn start(&self, audio: Option<&AudioAsset>, clip: Option<&Path>, artwork: Option<&Path>) {
        let mut state = self.state();
        *state = DeckState {
            audio: audio.map(|a| a.path.clone()),
            clip: clip.map(Path::to_path_buf),
            artwork: artwork.map(Path::to_path_buf),
            duration: audio.map(|a| a.duration.unwrap_or(self.track_length)),
            position: Duration::ZERO,
            playing: audio.is_some() || clip.is_some(),
            clip_elapsed: Duration::ZERO,
        };
        info!(
            "Deck started: audio={} clip={} artwork={}",
            crate::deck::display(state.audio.as_deref()),
            crate::deck::display(state.clip.as_deref()),
            crate::deck::display(state.artwork.as_deref()),
        );
    }

    fn play_clip(&self, clip: &Path) {
        debug!("Deck clip {}", clip.display());
        let mut state = self.state();
        state.clip = Some(clip.to_path_buf());
        state.clip_elapsed = Duration::ZERO;
    }
}

impl Transport for SimulatedDeck {
    fn position(&self) -> Duration {
        self.state().position
    }

    fn duration(&self) -> Option<Duration> {
        self.state().duration
    }

    fn is_playing(&self) -> bool {
        self.state().playing
    }

    // Without audio there is no end to reach
    fn has_finished(&self) -> bool {
        let state = self.state();
        state
            .duration
            .is_some_and(|duration| state.position >= duration)
    }

    fn seek(&self, position: Duration) {
        let mut state = self.state();
        state.position = match state.duration {
            Some(duration) => position.min(duration),
            None => Duration::ZERO,
        };
    }

    fn play(&self) {
        let mut state = self.state();
        if state.audio.is_some() || state.clip.is_some() {
            state.playing = true;
        }
    }

    fn pause(&self) {
        self.state().playing = false;
    }
}

fn display(path: Option<&Path>) -> String {
    path.map_or_else(|| "-".to_string(), |p| p.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck() -> SimulatedDeck {
        SimulatedDeck::new(Duration::from_secs(10), Duration::from_secs(4))
    }

    #[test]
    fn idle_deck_does_not_move() {
        let deck = deck();
        deck.advance(Duration::from_secs(3));
        assert_eq!(deck.position(), Duration::ZERO);
        assert!(!deck.is_playing());
        assert!(!deck.has_finished());
    }

    #[test]
    fn audio_plays_to_its_end() {
        let deck = deck();
        deck.start(Some(&AudioAsset::new("song1.mp3")), None, None);
        assert!(deck.is_playing());

        deck.advance(Duration::from_secs(6));
        assert_eq!(deck.position(), Duration::from_secs(6));
        assert!(!deck.has_finished());

        deck.advance(Duration::from_secs(6));
        assert_eq!(deck.position(), Duration::from_secs(10));
        assert!(deck.has_finished());
    }

    #[test]
    fn known_duration_wins_over_default_length() {
        let deck = deck();
        let audio = AudioAsset::new("song1.mp3").with_duration(Duration::from_secs(2));
        deck.start(Some(&audio), None, None);
        assert_eq!(deck.duration(), Some(Duration::from_secs(2)));
    }

    #[test]
    fn paused_clock_stands_still() {
        let deck = deck();
        deck.start(Some(&AudioAsset::new("song1.mp3")), None, None);
        deck.pause();
        deck.advance(Duration::from_secs(5));
        assert_eq!(deck.position(), Duration::ZERO);
        deck.play();
        deck.advance(Duration::from_secs(5));
        assert_eq!(deck.position(), Duration::from_secs(5));
    }

    #[test]
    fn seek_clamps_to_duration() {
        let deck = deck();
        deck.start(Some(&AudioAsset::new("song1.mp3")), None, None);
        deck.seek(Duration::from_secs(60));
        assert_eq!(deck.position(), Duration::from_secs(10));
    }

    #[test]
    fn clip_reports_its_end() {
        let deck = deck();
        deck.start(None, Some(Path::new("video1_a.mp4")), None);
        assert!(!deck.advance(Duration::from_secs(3)).clip_finished);
        assert!(deck.advance(Duration::from_secs(1)).clip_finished);

        deck.play_clip(Path::new("video1_b.mp4"));
        assert_eq!(deck.clip(), Some(PathBuf::from("video1_b.mp4")));
        assert!(!deck.advance(Duration::from_secs(3)).clip_finished);
    }

    #[test]
    fn video_without_audio_never_finishes() {
        let deck = deck();
        deck.start(None, Some(Path::new("video1_a.mp4")), None);
        deck.advance(Duration::from_secs(60));
        assert!(!deck.has_finished());
        assert_eq!(deck.duration(), None);
    }
}
