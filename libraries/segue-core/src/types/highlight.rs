/// Highlight interval of a track
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw `"[mm:ss-mm:ss]"` highlight string as stored in metadata
///
/// Navigation passes it through untouched; hosts that draw the highlight
/// band or jump to it call [`Highlight::range`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Highlight(String);

/// Parsed highlight interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightRange {
    /// Start offset from the beginning of the track
    pub start: Duration,
    /// End offset from the beginning of the track
    pub end: Duration,
}

impl Highlight {
    /// Wrap a raw highlight string
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether no highlight is set
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Parse the interval
    ///
    /// Returns `None` when the string is empty or has no `-` separator.
    /// A half that does not parse as `mm:ss` counts as zero.
    pub fn range(&self) -> Option<HighlightRange> {
        let raw = self.0.trim();
        if raw.is_empty() || !raw.contains('-') {
            return None;
        }

        let inner = raw.trim_matches(|c| c == '[' || c == ']');
        let (start, end) = inner.split_once('-')?;

        Some(HighlightRange {
            start: parse_timestamp(start),
            end: parse_timestamp(end),
        })
    }
}

impl HighlightRange {
    /// Interval as fractions of `total`, for drawing on a progress bar
    pub fn normalized(&self, total: Duration) -> Option<(f32, f32)> {
        if total.is_zero() {
            return None;
        }
        let total = total.as_secs_f32();
        Some((
            (self.start.as_secs_f32() / total).clamp(0.0, 1.0),
            (self.end.as_secs_f32() / total).clamp(0.0, 1.0),
        ))
    }
}

fn parse_timestamp(text: &str) -> Duration {
    let Some((minutes, seconds)) = text.trim().split_once(':') else {
        return Duration::ZERO;
    };

    match (minutes.trim().parse::<u64>(), seconds.trim().parse::<f64>()) {
        (Ok(minutes), Ok(seconds)) if seconds >= 0.0 => {
            Duration::from_secs(minutes * 60) + Duration::from_secs_f64(seconds)
        }
        _ => Duration::ZERO,
    }
}
