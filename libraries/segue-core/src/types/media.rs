/// Prepared media assets and the presentation they produce
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// An audio asset that has been loaded but not started
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioAsset {
    /// Location of the audio file
    pub path: PathBuf,

    /// Duration, when the loader could determine it
    pub duration: Option<Duration>,
}

impl AudioAsset {
    /// Create an asset with unknown duration
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            duration: None,
        }
    }

    /// Set the duration
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }
}

/// Background videos of a track, consumed round-robin
///
/// The cursor starts before the first clip; each [`advance`](Self::advance)
/// moves to the next clip and wraps around after the last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawVideoPlaylist")]
pub struct VideoPlaylist {
    clips: Vec<PathBuf>,
    cursor: Option<usize>,
}

#[derive(Deserialize)]
struct RawVideoPlaylist {
    clips: Vec<PathBuf>,
    #[serde(default)]
    cursor: Option<usize>,
}

impl TryFrom<RawVideoPlaylist> for VideoPlaylist {
    type Error = String;

    fn try_from(raw: RawVideoPlaylist) -> Result<Self, Self::Error> {
        let len = raw.clips.len();
        let mut playlist = Self::new(raw.clips).ok_or("video playlist has no clips")?;
        if let Some(cursor) = raw.cursor {
            if cursor >= len {
                return Err(format!("clip cursor {} out of range for {} clips", cursor, len));
            }
            playlist.cursor = Some(cursor);
        }
        Ok(playlist)
    }
}

impl VideoPlaylist {
    /// Build a playlist; `None` when there are no clips
    pub fn new(clips: Vec<PathBuf>) -> Option<Self> {
        if clips.is_empty() {
            None
        } else {
            Some(Self {
                clips,
                cursor: None,
            })
        }
    }

    /// Move to the next clip and return it
    pub fn advance(&mut self) -> &Path {
        let next = self.cursor.map_or(0, |c| (c + 1) % self.clips.len());
        self.cursor = Some(next);
        &self.clips[next]
    }

    /// Clip under the cursor, if playback has started
    pub fn current(&self) -> Option<&Path> {
        self.cursor.map(|c| self.clips[c].as_path())
    }

    /// All clips in order
    pub fn clips(&self) -> &[PathBuf] {
        &self.clips
    }

    /// Number of clips
    pub fn len(&self) -> usize {
        self.clips.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}

/// What the visual layer shows for a track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visual {
    /// One or more background videos
    Video(VideoPlaylist),

    /// Static artwork; `None` when no artwork file exists either
    Artwork(Option<PathBuf>),
}

impl Visual {
    /// Whether a video will play
    pub fn has_video(&self) -> bool {
        matches!(self, Self::Video(_))
    }
}

/// Presentation state reached after playback starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Presentation {
    /// Audio and background video
    AudioVideo,

    /// Audio over static artwork
    AudioOnly,

    /// Video without audio
    VideoOnly,

    /// Neither medium resolved; metadata and artwork only
    Placeholder,
}

impl Presentation {
    /// Presentation for the assets that resolved
    pub fn for_assets(has_audio: bool, visual: &Visual) -> Self {
        match (has_audio, visual.has_video()) {
            (true, true) => Self::AudioVideo,
            (true, false) => Self::AudioOnly,
            (false, true) => Self::VideoOnly,
            (false, false) => Self::Placeholder,
        }
    }

    /// Whether this is a fallback from the full presentation
    pub fn is_degraded(self) -> bool {
        self != Self::AudioVideo
    }
}
