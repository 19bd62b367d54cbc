use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Top-level input is not an array of `{page, text}` records. Never recovered.
    #[error("input is not a page array: {0}")]
    Structural(String),

    #[error("failed to access {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid json")]
    Json(#[from] serde_json::Error),

    #[error("invalid lexicon: {0}")]
    Lexicon(String),

    #[error("invalid configuration")]
    Config(#[from] config::ConfigError),

    #[error("database error")]
    Database(#[from] rusqlite::Error),
}

impl PipelineError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PipelineError::Io {
            path: path.into(),
            source,
        }
    }
}
