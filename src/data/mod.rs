mod loader;
mod store;

use std::path::PathBuf;

use thiserror::Error;

use crate::models::InvalidQuiz;

pub use loader::{load_documents_from_json, parse_documents};
pub use store::{fetch_quiz, JsonQuizStore, MemoryQuizStore, QuizStore};

/// Failures reported by a quiz store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("quiz `{0}` not found")]
    NotFound(String),
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Fatal failure to start a session. Never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("quiz `{0}` not found")]
    NotFound(String),
    #[error("invalid quiz: {0}")]
    Invalid(#[from] InvalidQuiz),
    #[error("quiz store failed: {0}")]
    Store(String),
}

impl From<StoreError> for LoadError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(key) => LoadError::NotFound(key),
            other => LoadError::Store(other.to_string()),
        }
    }
}
