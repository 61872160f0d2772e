//! Asset file naming
//!
//! Every asset of a track lives directly in the library directory, keyed by
//! the id token used verbatim:
//!
//! | Asset    | File name            |
//! |----------|----------------------|
//! | Metadata | `info{id}.json`      |
//! | Audio    | `song{id}.mp3`       |
//! | Video    | `video{id}_*.mp4`    |
//! | Artwork  | `logo{id}.png`       |

use std::path::{Path, PathBuf};

use segue_core::TrackId;

const METADATA_PREFIX: &str = "info";
const METADATA_SUFFIX: &str = ".json";
const VIDEO_SUFFIX: &str = ".mp4";

/// Id token of a metadata file name, e.g. `info42.json` → `42`
pub fn id_from_metadata_file(file_name: &str) -> Option<&str> {
    file_name
        .strip_prefix(METADATA_PREFIX)?
        .strip_suffix(METADATA_SUFFIX)
        .filter(|id| !id.is_empty())
}

/// Whether `file_name` is one of the background videos of `id`
pub fn is_video_of(file_name: &str, id: &TrackId) -> bool {
    file_name
        .strip_prefix(&format!("video{}_", id))
        .is_some_and(|rest| rest.ends_with(VIDEO_SUFFIX))
}

/// Paths of a track's assets under a library directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPaths {
    root: PathBuf,
}

impl AssetPaths {
    /// Paths under `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Library directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `info{id}.json`
    pub fn metadata(&self, id: &TrackId) -> PathBuf {
        self.root
            .join(format!("{}{}{}", METADATA_PREFIX, id, METADATA_SUFFIX))
    }

    /// `song{id}.mp3`
    pub fn audio(&self, id: &TrackId) -> PathBuf {
        self.root.join(format!("song{}.mp3", id))
    }

    /// `logo{id}.png`
    pub fn artwork(&self, id: &TrackId) -> PathBuf {
        self.root.join(format!("logo{}.png", id))
    }
}
