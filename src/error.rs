use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the quiz engine.
#[derive(Debug, Error)]
pub enum QuizError {
    /// The question bank could not be read or parsed. Fatal at startup.
    #[error("question bank {} is unavailable: {reason}", .path.display())]
    StoreUnavailable { path: PathBuf, reason: String },

    /// The bank loaded fine but holds no questions.
    #[error("question bank contains no questions")]
    EmptyBank,

    /// A single config key could not be used; its default applies instead.
    #[error("config key {key} is malformed: {reason}")]
    ConfigMalformed { key: String, reason: String },

    /// A write-through save failed. In-memory state is still valid.
    #[error("failed to write {}: {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}
