//! Resource loading and presentation seams
//!
//! The orchestrator never touches files or decoders. It asks a
//! [`ResourceLoader`] to prepare a track's media without starting it, then
//! starts everything in one call once the screen is covered.

use async_trait::async_trait;
use segue_core::{AudioAsset, Presentation, TrackId, TrackMetadata, Visual};

/// A track whose media is loaded but not playing
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedTrack {
    /// Track identifier
    pub id: TrackId,
    /// Authoritative metadata (the unknown sentinel when missing)
    pub metadata: TrackMetadata,
    /// Audio asset, `None` when the track has no audio
    pub audio: Option<AudioAsset>,
    /// Video clips or fallback artwork
    pub visual: Visual,
}

impl PreparedTrack {
    /// Presentation the prepared assets allow
    pub fn presentation(&self) -> Presentation {
        Presentation::for_assets(self.audio.is_some(), &self.visual)
    }
}

/// Loads a track's metadata and media
///
/// Missing resources are reported as `None` / artwork fallback, never as
/// errors; the orchestrator degrades the presentation instead of aborting.
#[async_trait]
pub trait ResourceLoader: Send + Sync {
    /// Read the metadata document synchronously, for pre-painting
    fn load_metadata_instant(&self, id: &TrackId) -> Option<TrackMetadata>;

    /// Load the audio asset without playing it
    async fn prepare_audio(&self, id: &TrackId) -> Option<AudioAsset>;

    /// Load the background videos without playing them, or set up artwork
    async fn prepare_visual(&self, id: &TrackId) -> Visual;

    /// Start audio and video in the same step
    fn start_playback(&self, track: &PreparedTrack);
}

/// Non-media parts of the screen the orchestrator drives
pub trait Stage: Send + Sync {
    /// Close any open navigation surface (track list, menus) without animation
    fn close_navigation_instant(&self);

    /// Open the dependent display panels without animation
    fn open_panels_instant(&self);

    /// Show the loaded track's metadata
    fn apply_metadata(&self, id: &TrackId, metadata: &TrackMetadata);

    /// Switch to the presentation the started track resolved to
    fn set_presentation(&self, presentation: Presentation);
}
