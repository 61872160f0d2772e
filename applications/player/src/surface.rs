//! Terminal rendering of the cover panels and the player screen
//!
//! Nothing is drawn; every visual change is logged and the latest screen
//! state is kept so the `status` command can print it.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use segue_core::{Presentation, TrackId, TrackMetadata};
use segue_transition::{CoverSurface, PanelColors, SlideDirection, Stage};
use tracing::{debug, info};

/// What the player screen currently shows
#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    pub overlay_visible: bool,
    pub panels: Option<PanelColors>,
    pub navigation_open: bool,
    pub player_open: bool,
    pub track: Option<TrackId>,
    pub title: Option<String>,
    pub credit: Option<String>,
    pub presentation: Option<Presentation>,
}

// The host starts on the library menu
impl Default for Screen {
    fn default() -> Self {
        Self {
            overlay_visible: false,
            panels: None,
            navigation_open: true,
            player_open: false,
            track: None,
            title: None,
            credit: None,
            presentation: None,
        }
    }
}

/// Log-backed [`CoverSurface`] and [`Stage`]
#[derive(Debug, Default)]
pub struct TerminalSurface {
    screen: Mutex<Screen>,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current screen state
    pub fn screen(&self) -> Screen {
        self.state().clone()
    }

    fn state(&self) -> MutexGuard<'_, Screen> {
        self.screen.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CoverSurface for TerminalSurface {
    fn set_overlay_visible(&self, visible: bool) {
        debug!("Cover overlay {}", if visible { "shown" } else { "hidden" });
        self.state().overlay_visible = visible;
    }

    fn place_offscreen(&self) {
        debug!("Cover panels parked offscreen");
    }

    fn paint(&self, colors: &PanelColors) {
        let hex: Vec<String> = colors.iter().map(|c| c.to_hex()).collect();
        debug!("Cover panels painted [{}]", hex.join(", "));
        self.state().panels = Some(*colors);
    }

    fn begin_slide(&self, panel: usize, direction: SlideDirection, duration: Duration) {
        debug!(
            "Panel {} slides {:?} over {}ms",
            panel,
            direction,
            duration.as_millis()
        );
    }
}

impl Stage for TerminalSurface {
    fn close_navigation_instant(&self) {
        self.state().navigation_open = false;
    }

    fn open_panels_instant(&self) {
        debug!("Player panels opened");
        self.state().player_open = true;
    }

    fn apply_metadata(&self, id: &TrackId, metadata: &TrackMetadata) {
        info!("Now showing {} - {}", id, metadata.title);
        let mut screen = self.state();
        screen.track = Some(id.clone());
        screen.title = Some(metadata.title.clone());
        screen.credit = Some(metadata.credit_line());
    }

    fn set_presentation(&self, presentation: Presentation) {
        info!("Presentation: {:?}", presentation);
        self.state().presentation = Some(presentation);
    }
}
