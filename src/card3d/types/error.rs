//! Error type shared by the card viewer.

use thiserror::Error;

use super::textures::TextureSlot;

#[derive(Debug, Error)]
pub enum CardError {
    #[error("unknown character '{0}'")]
    UnknownCharacter(String),

    #[error("failed to load {slot} texture '{path}': {reason}")]
    TextureLoad {
        slot: TextureSlot,
        path: String,
        reason: String,
    },

    #[error("invalid card dimensions: {0}")]
    InvalidCard(String),

    #[error("invalid viewer settings: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("character catalog is malformed: {0}")]
    Catalog(#[from] ron::error::SpannedError),
}
