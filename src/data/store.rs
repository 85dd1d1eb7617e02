//! Quiz Store boundary.
//!
//! The session engine only ever asks a store for one quiz by key. Lookups
//! match the quiz slug first and fall back to the quiz id.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tracing::debug;

use crate::models::{Quiz, QuizDocument};

use super::loader::load_documents_from_json;
use super::{LoadError, StoreError};

#[async_trait]
pub trait QuizStore: Send + Sync {
    /// Fetch the quiz whose slug or id equals `key`.
    async fn get_quiz(&self, key: &str) -> Result<QuizDocument, StoreError>;
}

fn find_by_slug_or_id<'a>(
    docs: impl Iterator<Item = &'a QuizDocument> + Clone,
    key: &str,
) -> Option<&'a QuizDocument> {
    docs.clone()
        .find(|doc| !doc.slug.is_empty() && doc.slug == key)
        .or_else(|| docs.into_iter().find(|doc| doc.id == key))
}

/// In-memory store over a fixed set of documents.
#[derive(Default)]
pub struct MemoryQuizStore {
    docs: Vec<QuizDocument>,
    fetches: AtomicUsize,
}

impl MemoryQuizStore {
    pub fn new(docs: Vec<QuizDocument>) -> Self {
        Self {
            docs,
            fetches: AtomicUsize::new(0),
        }
    }

    /// Number of `get_quiz` calls served so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl QuizStore for MemoryQuizStore {
    async fn get_quiz(&self, key: &str) -> Result<QuizDocument, StoreError> {
        self.fetches.fetch_add(1, Ordering::Relaxed);
        find_by_slug_or_id(self.docs.iter(), key)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }
}

/// Store backed by a JSON file, re-read on every fetch so edits are picked up.
pub struct JsonQuizStore {
    path: PathBuf,
}

impl JsonQuizStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl QuizStore for JsonQuizStore {
    async fn get_quiz(&self, key: &str) -> Result<QuizDocument, StoreError> {
        let docs = load_documents_from_json(&self.path).await?;
        debug!(path = %self.path.display(), quizzes = docs.len(), "read quiz store");
        find_by_slug_or_id(docs.iter(), key)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }
}

/// Fetch and validate a quiz. Failures are final; nothing is retried.
pub async fn fetch_quiz(store: &dyn QuizStore, key: &str) -> Result<Arc<Quiz>, LoadError> {
    let doc = store.get_quiz(key).await?;
    let quiz = Quiz::try_from(doc)?;
    Ok(Arc::new(quiz))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuestionDocument;

    fn doc(id: &str, slug: &str) -> QuizDocument {
        QuizDocument {
            id: id.to_string(),
            slug: slug.to_string(),
            title: format!("Quiz {id}"),
            description: None,
            grade: "3".to_string(),
            category: "science".to_string(),
            time: 1,
            questions: vec![QuestionDocument {
                text: "Water boils at?".to_string(),
                options: vec!["90".to_string(), "100".to_string()],
                correct: 1,
            }],
        }
    }

    #[tokio::test]
    async fn test_lookup_prefers_slug_then_id() {
        let store = MemoryQuizStore::new(vec![doc("a", "shared"), doc("shared", "b")]);

        assert_eq!(store.get_quiz("shared").await.unwrap().id, "a");
        assert_eq!(store.get_quiz("b").await.unwrap().id, "shared");
        assert_eq!(store.get_quiz("a").await.unwrap().slug, "shared");
        assert_eq!(store.fetch_count(), 3);
    }

    #[tokio::test]
    async fn test_missing_quiz_is_not_found() {
        let store = MemoryQuizStore::default();
        let err = fetch_quiz(&store, "nope").await.unwrap_err();
        assert_eq!(err, LoadError::NotFound("nope".to_string()));
    }

    #[tokio::test]
    async fn test_malformed_quiz_is_invalid() {
        let mut broken = doc("x", "x");
        broken.questions[0].correct = 5;
        let store = MemoryQuizStore::new(vec![broken]);

        let err = fetch_quiz(&store, "x").await.unwrap_err();
        assert!(matches!(err, LoadError::Invalid(_)));
    }

    #[tokio::test]
    async fn test_json_store_reads_file() {
        let path = std::env::temp_dir().join(format!("timed-quiz-{}.json", uuid::Uuid::new_v4()));
        let json = serde_json::to_string(&vec![doc("1", "first"), doc("2", "second")]).unwrap();
        tokio::fs::write(&path, json).await.unwrap();

        let store = JsonQuizStore::new(&path);
        let quiz = fetch_quiz(&store, "second").await.unwrap();
        assert_eq!(quiz.id, "2");

        tokio::fs::remove_file(&path).await.unwrap();
    }
}
