//! Error types for the fallible edges of a code panel.
//!
//! Rendering itself never fails. These errors come from the places that touch
//! the outside world: clipboard backends, theme names typed by a user, and
//! props files loaded from disk.

use thiserror::Error;

/// Errors that can occur outside the render pass.
#[derive(Error, Debug)]
pub enum CodeBlockError {
    /// The clipboard backend rejected or failed the write.
    #[error("Clipboard write failed: {0}")]
    Clipboard(#[source] std::io::Error),

    /// The clipboard backend is not available in this environment.
    #[error("Clipboard unavailable: {0}")]
    Unsupported(String),

    /// A theme name did not match any theme in the catalogue.
    #[error("Invalid theme name: {0}")]
    InvalidThemeName(String),

    /// Props could not be deserialized.
    #[error("Failed to parse props: {0}")]
    PropsParse(String),
}

impl From<serde_json::Error> for CodeBlockError {
    fn from(err: serde_json::Error) -> Self {
        CodeBlockError::PropsParse(err.to_string())
    }
}

impl From<serde_yaml::Error> for CodeBlockError {
    fn from(err: serde_yaml::Error) -> Self {
        CodeBlockError::PropsParse(err.to_string())
    }
}

/// Result type for code panel operations.
pub type CodeBlockResult<T> = Result<T, CodeBlockError>;
