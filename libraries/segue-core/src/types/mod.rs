mod color;
mod highlight;
mod ids;
mod media;
mod metadata;
mod play_mode;
mod track;

pub use color::{Palette, Rgba};
pub use highlight::{Highlight, HighlightRange};
pub use ids::TrackId;
pub use media::{AudioAsset, Presentation, VideoPlaylist, Visual};
pub use metadata::{TrackMetadata, UNKNOWN_TITLE};
pub use play_mode::{Navigation, PlayMode};
pub use track::TrackEntry;
