/// Track metadata document
use serde::{Deserialize, Serialize};

use super::color::{Palette, Rgba};
use super::highlight::Highlight;

/// Title shown for tracks whose metadata document is missing
pub const UNKNOWN_TITLE: &str = "Unknown";

/// Metadata loaded from a track's JSON document
///
/// Field names follow the document (`Title`, `Color1`, ...). Every field is
/// optional in the document and defaults to empty, zero or black.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TrackMetadata {
    /// Track title
    pub title: String,

    /// Composer credit
    pub composer: String,

    /// Game or other source the track comes from
    pub game: String,

    /// Release year of the source
    pub release_year: i32,

    /// Remix title, blank when the track has no remix
    pub remix_title: String,

    /// Remix composer
    pub remix_composer: String,

    /// Remix source
    pub remix_game: String,

    /// Remix release year (free text in the document)
    pub remix_release_year: String,

    /// Highlight interval, passed through unparsed
    pub highlight: Highlight,

    /// Favorite flag
    pub favorite: bool,

    /// Primary palette color
    pub color1: Rgba,

    /// Secondary palette color
    pub color2: Rgba,

    /// Lyrics blob, opaque to navigation
    pub lyrics: String,
}

impl TrackMetadata {
    /// Sentinel used whenever a metadata document is absent
    pub fn unknown() -> Self {
        Self {
            title: UNKNOWN_TITLE.to_string(),
            color1: Rgba::BLACK,
            color2: Rgba::BLACK,
            ..Self::default()
        }
    }

    /// Parse a metadata document
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The track's two palette colors
    pub fn palette(&self) -> Palette {
        Palette::new(self.color1, self.color2)
    }

    /// Whether the remix panel should be shown
    pub fn has_remix(&self) -> bool {
        !self.remix_title.trim().is_empty()
    }

    /// `"Composer · Game (Year)"`
    pub fn credit_line(&self) -> String {
        format!("{} · {} ({})", self.composer, self.game, self.release_year)
    }

    /// Remix counterpart of [`credit_line`](Self::credit_line)
    pub fn remix_credit_line(&self) -> String {
        format!(
            "{} · {} ({})",
            self.remix_composer, self.remix_game, self.remix_release_year
        )
    }

    /// Whether lyrics are present
    pub fn has_lyrics(&self) -> bool {
        !self.lyrics.is_empty()
    }
}
