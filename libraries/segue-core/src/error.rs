/// Core error types for Segue
use thiserror::Error;

/// Result type alias using `SegueError`
pub type Result<T> = std::result::Result<T, SegueError>;

/// Core error type for Segue
///
/// Navigation and transitions never fail; the only fallible core operation
/// is parsing a metadata document.
#[derive(Error, Debug)]
pub enum SegueError {
    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}
