use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::question::{Question, QuestionDocument};

/// Reasons a quiz document cannot be turned into a playable quiz.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidQuiz {
    #[error("quiz has no questions")]
    NoQuestions,
    #[error("quiz duration must be at least one minute, got {0}")]
    InvalidDuration(i64),
    #[error("question {question} has {count} option(s), at least 2 are required")]
    TooFewOptions { question: usize, count: usize },
    #[error("question {question} marks option {index} as correct but has {options} option(s)")]
    CorrectIndexOutOfRange {
        question: usize,
        index: i64,
        options: usize,
    },
}

/// A quiz as stored by the quiz platform.
///
/// Only `time` and `questions` matter to a session; the remaining fields are
/// carried through for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizDocument {
    pub id: String,
    #[serde(default)]
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub grade: String,
    #[serde(default)]
    pub category: String,
    /// Time budget in minutes.
    pub time: i64,
    #[serde(default)]
    pub questions: Vec<QuestionDocument>,
}

/// A validated, immutable quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub grade: String,
    pub category: String,
    pub duration_minutes: u32,
    questions: Vec<Question>,
}

impl Quiz {
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn last_index(&self) -> usize {
        self.questions.len() - 1
    }

    pub fn duration_seconds(&self) -> u32 {
        self.duration_minutes * 60
    }
}

impl TryFrom<QuizDocument> for Quiz {
    type Error = InvalidQuiz;

    fn try_from(doc: QuizDocument) -> Result<Self, Self::Error> {
        let duration_minutes = u32::try_from(doc.time)
            .ok()
            .filter(|minutes| (1..=u32::MAX / 60).contains(minutes))
            .ok_or(InvalidQuiz::InvalidDuration(doc.time))?;

        if doc.questions.is_empty() {
            return Err(InvalidQuiz::NoQuestions);
        }

        let questions = doc
            .questions
            .into_iter()
            .enumerate()
            .map(|(position, question)| Question::from_document(position, question))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id: doc.id,
            slug: doc.slug,
            title: doc.title,
            description: doc.description,
            grade: doc.grade,
            category: doc.category,
            duration_minutes,
            questions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "id": "q-1",
        "slug": "fractions",
        "title": "Fractions",
        "grade": "5",
        "category": "math",
        "time": 2,
        "questions": [
            { "question": "1/2 + 1/2?", "options": ["1", "2"], "correct": 0 },
            { "question": "1/4 of 8?", "options": ["2", "4", "8"], "correct": 0 }
        ]
    }"#;

    #[test]
    fn test_parses_platform_document() {
        let doc: QuizDocument = serde_json::from_str(SAMPLE).unwrap();
        let quiz = Quiz::try_from(doc).unwrap();

        assert_eq!(quiz.slug, "fractions");
        assert_eq!(quiz.duration_seconds(), 120);
        assert_eq!(quiz.total_questions(), 2);
        assert_eq!(quiz.last_index(), 1);
        assert_eq!(quiz.question(1).unwrap().options.len(), 3);
        assert!(quiz.description.is_none());
    }

    #[test]
    fn test_rejects_empty_quiz() {
        let mut doc: QuizDocument = serde_json::from_str(SAMPLE).unwrap();
        doc.questions.clear();
        assert_eq!(Quiz::try_from(doc), Err(InvalidQuiz::NoQuestions));
    }

    #[test]
    fn test_rejects_zero_duration() {
        let mut doc: QuizDocument = serde_json::from_str(SAMPLE).unwrap();
        doc.time = 0;
        assert_eq!(Quiz::try_from(doc), Err(InvalidQuiz::InvalidDuration(0)));
    }

    #[test]
    fn test_reports_offending_question() {
        let mut doc: QuizDocument = serde_json::from_str(SAMPLE).unwrap();
        doc.questions[1].correct = 7;
        let err = Quiz::try_from(doc).unwrap_err();
        assert!(err.to_string().starts_with("question 1 "));
    }
}
