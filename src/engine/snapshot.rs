//! Read-only view of a session for presentation.

use serde::Serialize;

use crate::models::Quiz;

use super::evaluator::{rounded_percentage, Score, Tier};
use super::state::{Attempt, AttemptId, CompletionReason, Feedback, Status};

/// Below this many seconds the clock is shown as running low.
pub const LOW_TIME_SECONDS: u32 = 300;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub attempt: AttemptId,
    pub quiz_id: String,
    pub title: String,
    pub grade: String,
    pub category: String,
    pub current_index: usize,
    pub total_questions: usize,
    pub answers: Vec<Option<usize>>,
    pub remaining_seconds: u32,
    pub duration_seconds: u32,
    pub status: Status,
    pub feedback: Option<Feedback>,
    pub score: Option<Score>,
    pub tier: Option<Tier>,
    pub reason: Option<CompletionReason>,
    pub progress_percent: u32,
    pub answered_count: usize,
    pub elapsed_seconds: u32,
    pub time_left_percent: u32,
    pub low_time: bool,
}

impl SessionSnapshot {
    pub fn capture(quiz: &Quiz, attempt: &Attempt) -> Self {
        let total = quiz.total_questions();
        let duration = quiz.duration_seconds();
        let remaining = attempt.remaining_seconds();
        let score = attempt.score();

        Self {
            attempt: attempt.id(),
            quiz_id: quiz.id.clone(),
            title: quiz.title.clone(),
            grade: quiz.grade.clone(),
            category: quiz.category.clone(),
            current_index: attempt.current_index(),
            total_questions: total,
            answers: attempt.answers().to_vec(),
            remaining_seconds: remaining,
            duration_seconds: duration,
            status: attempt.status(),
            feedback: attempt.feedback(),
            score,
            tier: score.map(|s| s.tier()),
            reason: attempt.completion_reason(),
            progress_percent: rounded_percentage(attempt.current_index() + 1, total),
            answered_count: attempt.answered_count(),
            elapsed_seconds: duration - remaining,
            time_left_percent: (u64::from(remaining) * 100 / u64::from(duration)) as u32,
            low_time: remaining < LOW_TIME_SECONDS,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.status == Status::Finished
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 == self.total_questions
    }

    pub fn remaining_clock(&self) -> String {
        format_clock(self.remaining_seconds)
    }

    pub fn elapsed_clock(&self) -> String {
        format_clock(self.elapsed_seconds)
    }
}

/// Format seconds as `m:ss`.
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::quiz_with;

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(65), "1:05");
        assert_eq!(format_clock(600), "10:00");
    }

    #[test]
    fn test_derived_values() {
        let quiz = quiz_with(&[0, 0, 0, 0], 10);
        let mut attempt = Attempt::new(&quiz);
        attempt.record_answer(&quiz, 0);
        attempt.close_feedback();
        attempt.move_to(1);
        for _ in 0..30 {
            attempt.tick();
        }

        let snap = SessionSnapshot::capture(&quiz, &attempt);
        assert_eq!(snap.progress_percent, 50);
        assert_eq!(snap.answered_count, 1);
        assert_eq!(snap.remaining_clock(), "9:30");
        assert_eq!(snap.elapsed_clock(), "0:30");
        assert_eq!(snap.time_left_percent, 95);
        assert!(!snap.low_time);
        assert!(snap.score.is_none());
        assert!(!snap.is_last_question());
    }

    #[test]
    fn test_progress_rounds_half_up() {
        let quiz = quiz_with(&[0, 0, 0], 1);
        let mut attempt = Attempt::new(&quiz);
        assert_eq!(SessionSnapshot::capture(&quiz, &attempt).progress_percent, 33);

        attempt.move_to(1);
        assert_eq!(SessionSnapshot::capture(&quiz, &attempt).progress_percent, 67);

        attempt.move_to(2);
        assert_eq!(SessionSnapshot::capture(&quiz, &attempt).progress_percent, 100);
    }

    #[test]
    fn test_serializes_for_presentation() {
        let quiz = quiz_with(&[1], 1);
        let mut attempt = Attempt::new(&quiz);
        attempt.finish(&quiz, CompletionReason::Submitted);

        let json = serde_json::to_string(&SessionSnapshot::capture(&quiz, &attempt)).unwrap();
        assert!(json.contains("\"status\":\"finished\""));
        assert!(json.contains("\"tier\":\"needs_improvement\""));
        assert!(json.contains("\"answers\":[null]"));
        assert!(json.contains("\"low_time\":true"));
    }
}
