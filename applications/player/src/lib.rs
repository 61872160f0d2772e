//! Segue Player Library
//!
//! Headless host for the Segue player: a simulated media deck, a log-backed
//! surface and a line-based command language over stdin.
//!
//! This library exposes the session for testing purposes.

pub mod commands;
pub mod config;
pub mod deck;
pub mod error;
pub mod session;
pub mod surface;

// Re-export commonly used types for convenience
pub use commands::PlayerCommand;
pub use config::PlayerConfig;
pub use deck::SimulatedDeck;
pub use error::{PlayerError, Result};
pub use session::{Response, Session};
pub use surface::{Screen, TerminalSurface};
