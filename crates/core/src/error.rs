//! Error types for baghchal-core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("game not found: {0}")]
    GameNotFound(String),

    #[error("invalid move")]
    InvalidMove,

    #[error("game is already over")]
    GameOver,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("no legal move available")]
    NoLegalMove,

    #[error("storage error: {0}")]
    Storage(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// True for failures of the underlying store rather than of the game rules.
    pub fn is_storage(&self) -> bool {
        matches!(self, Error::Storage(_) | Error::Database(_) | Error::Json(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
