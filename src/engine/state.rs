//! Mutable state of a single quiz attempt.

use serde::Serialize;
use uuid::Uuid;

use crate::models::Quiz;

use super::evaluator::{score_answer, score_attempt, Score};

/// Identifies one attempt. Timer events carry it so that events armed for
/// an earlier attempt are discarded after a restart.
pub type AttemptId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Running,
    Finished,
}

/// Correctness shown for the question just answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Feedback {
    pub question: usize,
    pub correct: bool,
}

/// How an attempt came to an end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionReason {
    Submitted,
    TimedOut,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    id: AttemptId,
    answers: Vec<Option<usize>>,
    remaining_seconds: u32,
    current_index: usize,
    status: Status,
    feedback: Option<Feedback>,
    score: Option<Score>,
    reason: Option<CompletionReason>,
}

impl Attempt {
    pub fn new(quiz: &Quiz) -> Self {
        Self {
            id: Uuid::new_v4(),
            answers: vec![None; quiz.total_questions()],
            remaining_seconds: quiz.duration_seconds(),
            current_index: 0,
            status: Status::Running,
            feedback: None,
            score: None,
            reason: None,
        }
    }

    pub fn id(&self) -> AttemptId {
        self.id
    }

    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    pub fn answer(&self, question: usize) -> Option<usize> {
        self.answers.get(question).copied().flatten()
    }

    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == Status::Running
    }

    pub fn feedback(&self) -> Option<Feedback> {
        self.feedback
    }

    pub fn score(&self) -> Option<Score> {
        self.score
    }

    pub fn completion_reason(&self) -> Option<CompletionReason> {
        self.reason
    }

    /// Record `option` for the current question and open a feedback window.
    pub(crate) fn record_answer(&mut self, quiz: &Quiz, option: usize) -> Feedback {
        let question = self.current_index;
        self.answers[question] = Some(option);

        let correct = quiz
            .question(question)
            .is_some_and(|q| score_answer(q, Some(option)));
        let feedback = Feedback { question, correct };
        self.feedback = Some(feedback);
        feedback
    }

    /// Close the feedback window, returning the question it was shown for.
    pub(crate) fn close_feedback(&mut self) -> Option<usize> {
        self.feedback.take().map(|f| f.question)
    }

    pub(crate) fn move_to(&mut self, index: usize) {
        self.current_index = index;
    }

    /// Consume one second. Returns true once the clock has run out.
    pub(crate) fn tick(&mut self) -> bool {
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        self.remaining_seconds == 0
    }

    /// Freeze the attempt and compute its score.
    pub(crate) fn finish(&mut self, quiz: &Quiz, reason: CompletionReason) -> Score {
        let score = score_attempt(quiz, &self.answers);
        self.status = Status::Finished;
        self.feedback = None;
        self.score = Some(score);
        self.reason = Some(reason);
        score
    }
}
