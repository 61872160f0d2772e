//! Filesystem resource loader
//!
//! Resolves a track's assets from the library directory and hands them to a
//! [`MediaSink`] when the orchestrator starts playback. Background videos
//! rotate round-robin: the sink reports a finished clip and the loader feeds
//! it the next one, wrapping after the last.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use segue_core::{AudioAsset, TrackId, TrackMetadata, VideoPlaylist, Visual};
use segue_transition::{PreparedTrack, ResourceLoader};
use tracing::{debug, warn};

use crate::naming::{is_video_of, AssetPaths};

/// Host-side audio and video output
pub trait MediaSink: Send + Sync {
    /// Start the prepared media together
    ///
    /// `clip` is the first background video; when it is `None` the sink
    /// shows `artwork` (if any) instead.
    fn start(&self, audio: Option<&AudioAsset>, clip: Option<&Path>, artwork: Option<&Path>);

    /// Switch the background to another clip of the running track
    fn play_clip(&self, clip: &Path);
}

/// [`ResourceLoader`] reading assets from a library directory
pub struct FsResourceLoader {
    paths: AssetPaths,
    sink: Arc<dyn MediaSink>,
    videos: Mutex<Option<(TrackId, VideoPlaylist)>>,
}

impl FsResourceLoader {
    /// Loader over `root`, starting media on `sink`
    pub fn new(root: impl Into<PathBuf>, sink: Arc<dyn MediaSink>) -> Self {
        Self {
            paths: AssetPaths::new(root),
            sink,
            videos: Mutex::new(None),
        }
    }

    /// Asset paths
    pub fn paths(&self) -> &AssetPaths {
        &self.paths
    }

    /// Called by the host when a background clip ends; plays the next one
    ///
    /// Returns the clip now playing, `None` when the running track has no
    /// videos.
    pub fn on_video_finished(&self) -> Option<PathBuf> {
        let clip = {
            let mut videos = self.videos();
            let (id, playlist) = videos.as_mut()?;
            let clip = playlist.advance().to_path_buf();
            debug!("Track {} next clip {}", id, clip.display());
            clip
        };
        self.sink.play_clip(&clip);
        Some(clip)
    }

    /// Clip of the running track currently on screen
    pub fn current_clip(&self) -> Option<PathBuf> {
        self.videos()
            .as_ref()
            .and_then(|(_, playlist)| playlist.current().map(Path::to_path_buf))
    }

    fn videos(&self) -> MutexGuard<'_, Option<(TrackId, VideoPlaylist)>> {
        self.videos.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn find_videos(&self, id: &TrackId) -> Vec<PathBuf> {
        let mut dir = match tokio::fs::read_dir(self.paths.root()).await {
            Ok(dir) => dir,
            Err(e) => {
                warn!("Failed to list {}: {}", self.paths.root().display(), e);
                return Vec::new();
            }
        };

        let mut clips = Vec::new();
        loop {
            match dir.next_entry().await {
                Ok(Some(entry)) => {
                    let name = entry.file_name();
                    if name.to_str().is_some_and(|name| is_video_of(name, id)) {
                        clips.push(entry.path());
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    warn!("Failed to read entry in {}: {}", self.paths.root().display(), e);
                    break;
                }
            }
        }
        clips.sort();
        clips
    }
}

#[async_trait]
impl ResourceLoader for FsResourceLoader {
    fn load_metadata_instant(&self, id: &TrackId) -> Option<TrackMetadata> {
        let path = self.paths.metadata(id);
        let json = match std::fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) => {
                warn!("No metadata at {}: {}", path.display(), e);
                return None;
            }
        };
        match TrackMetadata::from_json(&json) {
            Ok(metadata) => Some(metadata),
            Err(e) => {
                warn!("Malformed metadata {}: {}", path.display(), e);
                None
            }
        }
    }

    async fn prepare_audio(&self, id: &TrackId) -> Option<AudioAsset> {
        let path = self.paths.audio(id);
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => {
                debug!("Prepared audio {}", path.display());
                Some(AudioAsset::new(path))
            }
            Ok(_) => {
                warn!("Audio path {} is not a file", path.display());
                None
            }
            Err(e) => {
                warn!("No audio at {}: {}", path.display(), e);
                None
            }
        }
    }

    async fn prepare_visual(&self, id: &TrackId) -> Visual {
        let clips = self.find_videos(id).await;
        if let Some(playlist) = VideoPlaylist::new(clips) {
            debug!("Prepared {} clips for track {}", playlist.len(), id);
            return Visual::Video(playlist);
        }

        let artwork = self.paths.artwork(id);
        match tokio::fs::try_exists(&artwork).await {
            Ok(true) => Visual::Artwork(Some(artwork)),
            _ => {
                warn!("No video or artwork for track {}", id);
                Visual::Artwork(None)
            }
        }
    }

    fn start_playback(&self, track: &PreparedTrack) {
        let (clip, artwork) = match &track.visual {
            Visual::Video(playlist) => {
                let mut playlist = playlist.clone();
                let clip = playlist.advance().to_path_buf();
                *self.videos() = Some((track.id.clone(), playlist));
                (Some(clip), None)
            }
            Visual::Artwork(artwork) => {
                *self.videos() = None;
                (None, artwork.clone())
            }
        };
        self.sink
            .start(track.audio.as_ref(), clip.as_deref(), artwork.as_deref());
    }
}

impl std::fmt::Debug for FsResourceLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FsResourceLoader")
            .field("paths", &self.paths)
            .finish_non_exhaustive()
    }
}
