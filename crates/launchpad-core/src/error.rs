//! Error types for the launchpad core

use thiserror::Error;

use crate::flow::ScreenState;

/// Result type alias for launchpad operations
pub type Result<T> = std::result::Result<T, LaunchpadError>;

/// Errors that can occur in the launcher core
#[derive(Debug, Error)]
pub enum LaunchpadError {
    /// Backing store could not be read or written
    #[error("Store error: {0}")]
    Store(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Keypad input that is not 0-9
    #[error("Not a digit: {0:?}")]
    InvalidDigit(char),

    /// Passcode that is not exactly four digits
    #[error("Invalid passcode: {0}")]
    InvalidCredential(String),

    /// Trigger that the flow controller does not accept in its current state
    #[error("{trigger} is not valid in the {from:?} state")]
    InvalidTransition {
        from: ScreenState,
        trigger: &'static str,
    },

    /// No tile with this id
    #[error("Unknown tile: {0}")]
    UnknownTile(String),

    /// Tile position outside the catalog
    #[error("Tile index {0} is out of range")]
    TileIndex(usize),

    /// URL rejected by validation
    #[error("Invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Launch attempted while the launcher is locked
    #[error("Launcher is locked")]
    NotAuthenticated,

    /// Platform opener failed
    #[error("Navigation failed: {0}")]
    Navigation(String),

    /// Passcode hashing failed
    #[error("Hash error: {0}")]
    Hash(String),
}
