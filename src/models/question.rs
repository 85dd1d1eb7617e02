use serde::{Deserialize, Serialize};

use super::InvalidQuiz;

/// Minimum number of options a question must offer.
pub const MIN_OPTIONS: usize = 2;

/// A validated multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub text: String,
    pub options: Vec<String>,
    pub correct_index: usize,
}

/// A question as stored by the quiz platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionDocument {
    #[serde(rename = "question")]
    pub text: String,
    pub options: Vec<String>,
    /// Stored signed so a negative index is reported as invalid rather than
    /// failing to parse.
    pub correct: i64,
}

impl Question {
    pub(crate) fn from_document(
        position: usize,
        doc: QuestionDocument,
    ) -> Result<Self, InvalidQuiz> {
        if doc.options.len() < MIN_OPTIONS {
            return Err(InvalidQuiz::TooFewOptions {
                question: position,
                count: doc.options.len(),
            });
        }

        let correct_index = usize::try_from(doc.correct)
            .ok()
            .filter(|index| *index < doc.options.len())
            .ok_or(InvalidQuiz::CorrectIndexOutOfRange {
                question: position,
                index: doc.correct,
                options: doc.options.len(),
            })?;

        Ok(Self {
            text: doc.text,
            options: doc.options,
            correct_index,
        })
    }

    pub fn option_count(&self) -> usize {
        self.options.len()
    }
}
