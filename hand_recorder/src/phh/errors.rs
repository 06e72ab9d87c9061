//! Export error types.

use thiserror::Error;

/// Errors that can occur while building or encoding an export document
#[derive(Debug, Error)]
pub enum ExportError {
    /// The hand has no blinds or straddles, so there is no minimum bet
    #[error("Blinds must be set before exporting")]
    MissingBlinds,

    /// Fewer players than a hand needs
    #[error("A hand needs at least {min} players, found {actual}")]
    NotEnoughPlayers { min: usize, actual: usize },

    /// No player is marked as the hero
    #[error("No hero is set")]
    MissingHero,

    /// TOML encoding failed
    #[error("Failed to encode document: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// Result type for export operations
pub type Result<T> = std::result::Result<T, ExportError>;
