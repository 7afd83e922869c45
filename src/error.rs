use std::io;

use thiserror::Error;

pub type RaceResult<T> = Result<T, RaceError>;

/// Errors raised while loading records, building keyframes, or rendering frames.
#[derive(Debug, Error)]
pub enum RaceError {
    #[error("record {index} has a malformed timestamp '{timestamp}'")]
    MalformedTimestamp { index: usize, timestamp: String },

    #[error("data source error: {0}")]
    Source(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl RaceError {
    pub fn data_source(msg: impl Into<String>) -> Self {
        Self::Source(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}
