//! Cover panels
//!
//! Five opaque panels slide over the screen to hide loading, then slide away
//! in reverse order. The panels themselves are drawn by a [`CoverSurface`];
//! this module owns the ordering, the stagger timing and the palettes.

use std::sync::Arc;
use std::time::Duration;

use segue_core::{Palette, Rgba};
use serde::{Deserialize, Serialize};
use tokio::time::sleep;
use tracing::trace;

/// Number of cover panels
pub const PANEL_COUNT: usize = 5;

/// One color per panel, panel 0 first
pub type PanelColors = [Rgba; PANEL_COUNT];

/// Direction of a panel slide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlideDirection {
    /// Into place, covering the screen
    In,
    /// Away, revealing the screen
    Out,
}

/// Host-side drawing of the cover panels
///
/// All calls are fire-and-forget; the timing of a slide is driven by
/// [`Cover`], which waits for the slide duration itself.
pub trait CoverSurface: Send + Sync {
    /// Show or hide the panel overlay
    fn set_overlay_visible(&self, visible: bool);

    /// Move every panel to its resting place off screen, without animation
    fn place_offscreen(&self);

    /// Set each panel's color
    fn paint(&self, colors: &PanelColors);

    /// Start a slide animation of one panel
    fn begin_slide(&self, panel: usize, direction: SlideDirection, duration: Duration);
}

/// Panel animation timing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverTiming {
    /// Duration of one panel's slide
    #[serde(with = "millis")]
    pub slide_duration: Duration,

    /// Delay between two consecutive panels starting
    #[serde(with = "millis")]
    pub stagger: Duration,
}

impl Default for CoverTiming {
    fn default() -> Self {
        Self {
            slide_duration: Duration::from_millis(450),
            stagger: Duration::from_millis(80),
        }
    }
}

impl CoverTiming {
    /// Timing from millisecond values
    pub fn from_millis(slide_duration: u64, stagger: u64) -> Self {
        Self {
            slide_duration: Duration::from_millis(slide_duration),
            stagger: Duration::from_millis(stagger),
        }
    }

    /// Wall time of one full cover or reveal
    pub fn total(&self) -> Duration {
        self.stagger * (PANEL_COUNT as u32 - 1) + self.slide_duration
    }
}

/// Colors for covering: alternate the outgoing palette, last panel previews
/// the incoming primary
pub fn entering(current: Palette, next: Palette) -> PanelColors {
    [
        current.secondary,
        current.primary,
        current.secondary,
        current.primary,
        next.primary,
    ]
}

/// Colors for revealing, all from the incoming palette
pub fn revealing(next: Palette) -> PanelColors {
    [
        next.primary,
        next.secondary,
        next.primary,
        next.secondary,
        next.primary,
    ]
}

/// Drives the panel animations on a [`CoverSurface`]
#[derive(Clone)]
pub struct Cover {
    surface: Arc<dyn CoverSurface>,
    timing: CoverTiming,
}

impl Cover {
    /// Create a cover over a surface; panels start off screen and hidden
    pub fn new(surface: Arc<dyn CoverSurface>, timing: CoverTiming) -> Self {
        surface.place_offscreen();
        surface.set_overlay_visible(false);
        Self { surface, timing }
    }

    /// Animation timing
    pub fn timing(&self) -> CoverTiming {
        self.timing
    }

    /// Repaint the panels
    pub fn paint(&self, colors: &PanelColors) {
        self.surface.paint(colors);
    }

    /// Slide panels 0..=4 into place; returns once the last one has landed
    pub async fn cover_in(&self) {
        self.surface.set_overlay_visible(true);
        self.slide((0..PANEL_COUNT).collect(), SlideDirection::In)
            .await;
    }

    /// Slide panels 4..=0 away; returns once panel 0 has left
    pub async fn cover_out(&self) {
        self.slide((0..PANEL_COUNT).rev().collect(), SlideDirection::Out)
            .await;
        self.surface.place_offscreen();
        self.surface.set_overlay_visible(false);
    }

    async fn slide(&self, panels: Vec<usize>, direction: SlideDirection) {
        let last = panels.len().saturating_sub(1);
        for (step, panel) in panels.into_iter().enumerate() {
            trace!("Panel {} slide {:?}", panel, direction);
            self.surface
                .begin_slide(panel, direction, self.timing.slide_duration);
            if step < last {
                sleep(self.timing.stagger).await;
            }
        }
        sleep(self.timing.slide_duration).await;
    }
}

impl std::fmt::Debug for Cover {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cover")
            .field("timing", &self.timing)
            .finish_non_exhaustive()
    }
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
