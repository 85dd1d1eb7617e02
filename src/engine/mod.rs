//! The quiz-taking session engine.

mod countdown;
mod evaluator;
mod machine;
mod navigation;
mod snapshot;
mod state;

use std::time::Duration;

pub use countdown::{Countdown, MIN_TICK_PERIOD};
pub use evaluator::{
    score_answer, score_attempt, Score, Tier, EXCELLENT_THRESHOLD, GOOD_THRESHOLD,
};
pub use machine::{Effect, Engine, Event};
pub use navigation::{resolve as resolve_move, Move};
pub use snapshot::{format_clock, SessionSnapshot, LOW_TIME_SECONDS};
pub use state::{Attempt, AttemptId, CompletionReason, Feedback, Status};

/// How long correctness stays on screen after an answer.
pub const DEFAULT_FEEDBACK_WINDOW: Duration = Duration::from_secs(2);
/// Countdown resolution.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_secs(1);

/// Timer settings for a session. A `tick_period` below [`MIN_TICK_PERIOD`]
/// is raised to it when the countdown starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub feedback_window: Duration,
    pub tick_period: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            feedback_window: DEFAULT_FEEDBACK_WINDOW,
            tick_period: DEFAULT_TICK_PERIOD,
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::models::{QuestionDocument, Quiz, QuizDocument};

    /// A quiz whose questions each have three options.
    pub fn quiz_with(correct: &[i64], minutes: i64) -> Quiz {
        Quiz::try_from(QuizDocument {
            id: "test-quiz".to_string(),
            slug: "test-quiz".to_string(),
            title: "Test quiz".to_string(),
            description: None,
            grade: "1".to_string(),
            category: "general".to_string(),
            time: minutes,
            questions: correct
                .iter()
                .enumerate()
                .map(|(i, c)| QuestionDocument {
                    text: format!("Question {}", i + 1),
                    options: vec!["a".into(), "b".into(), "c".into()],
                    correct: *c,
                })
                .collect(),
        })
        .expect("valid test quiz")
    }
}
