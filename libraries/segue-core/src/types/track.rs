/// Track entries as listed by a playlist provider
use serde::{Deserialize, Serialize};

use super::color::Palette;
use super::ids::TrackId;
use super::metadata::TrackMetadata;

/// One playable unit in the library
///
/// Immutable once loaded; the provider hands out clones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackEntry {
    /// Identifier token
    pub id: TrackId,

    /// Metadata read when the library was scanned
    pub metadata: TrackMetadata,
}

impl TrackEntry {
    /// Entry with empty metadata
    pub fn new(id: impl Into<TrackId>) -> Self {
        Self {
            id: id.into(),
            metadata: TrackMetadata::default(),
        }
    }

    /// Entry with only a title set
    pub fn titled(id: impl Into<TrackId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            metadata: TrackMetadata {
                title: title.into(),
                ..TrackMetadata::default()
            },
        }
    }

    /// Entry with full metadata
    pub fn with_metadata(id: impl Into<TrackId>, metadata: TrackMetadata) -> Self {
        Self {
            id: id.into(),
            metadata,
        }
    }

    /// Track title
    pub fn title(&self) -> &str {
        &self.metadata.title
    }

    /// Source game
    pub fn game(&self) -> &str {
        &self.metadata.game
    }

    /// Favorite flag
    pub fn is_favorite(&self) -> bool {
        self.metadata.favorite
    }

    /// Palette colors
    pub fn palette(&self) -> Palette {
        self.metadata.palette()
    }
}
