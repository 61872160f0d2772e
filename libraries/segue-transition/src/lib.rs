//! Segue - Transitions
//!
//! Hides the screen, switches tracks, and reveals it again.
//!
//! This crate provides:
//! - `TransitionOrchestrator`: the cover → resolve → load → start → reveal sequence
//! - `InputLock`: the shared gate every input handler consults
//! - `Cover`: staggered panel animations and their palettes
//! - `ResourceLoader` / `Stage` / `CoverSurface`: seams the host implements
//! - `PlayerControls` and `KeyDispatcher`: lock-gated buttons and shortcuts
//!
//! # Architecture
//!
//! The orchestrator owns no media and draws nothing. Everything it touches is
//! a trait object handed in by the host, so the whole sequence runs the same
//! under a real renderer, the headless player, or a test's recording mocks.
//!
//! Only one transition runs at a time. A trigger that arrives while one is in
//! flight returns [`TransitionOutcome::Ignored`] and leaves state unchanged.

pub mod controls;
pub mod cover;
pub mod events;
pub mod input;
pub mod loader;
pub mod lock;
pub mod orchestrator;

pub use controls::{ControlOutcome, ControlSettings, PlayerControls, Transport};
pub use cover::{Cover, CoverSurface, CoverTiming, PanelColors, SlideDirection, PANEL_COUNT};
pub use events::{TransitionEvent, TransitionOutcome, TransitionPhase};
pub use input::{Command, Key, KeyDispatcher, DEFAULT_BINDINGS};
pub use loader::{PreparedTrack, ResourceLoader, Stage};
pub use lock::{InputLock, InputLockGuard};
pub use orchestrator::{SharedQueue, TransitionOrchestrator};
