//! The session state machine.
//!
//! Every input, whether a key press, a countdown tick or the end of a
//! feedback window, enters through [`Engine::dispatch`]. The reducer applies
//! it in one synchronous step and hands back the side effects the runtime
//! must carry out. Inputs that are not allowed in the current state are
//! dropped without error.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::data::LoadError;
use crate::models::Quiz;

use super::evaluator::Score;
use super::navigation::{self, Move};
use super::snapshot::SessionSnapshot;
use super::state::{Attempt, AttemptId, CompletionReason};
use super::SessionConfig;

#[derive(Debug)]
pub enum Event {
    QuizLoaded(Arc<Quiz>),
    LoadFailed(LoadError),
    /// Answer the current question with the given option.
    SelectAnswer(usize),
    GoTo(usize),
    Next,
    Previous,
    Finish,
    Restart,
    Tick { attempt: AttemptId },
    FeedbackElapsed { attempt: AttemptId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    StartCountdown {
        attempt: AttemptId,
    },
    StopCountdown,
    ScheduleFeedbackClose {
        attempt: AttemptId,
        after: Duration,
    },
    CancelFeedback,
    Completed {
        attempt: AttemptId,
        score: Score,
        reason: CompletionReason,
    },
}

#[derive(Debug)]
enum Phase {
    Loading,
    Failed(LoadError),
    Active { quiz: Arc<Quiz>, attempt: Attempt },
}

#[derive(Debug)]
pub struct Engine {
    config: SessionConfig,
    phase: Phase,
}

impl Engine {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            phase: Phase::Loading,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading)
    }

    pub fn load_error(&self) -> Option<&LoadError> {
        match &self.phase {
            Phase::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn quiz(&self) -> Option<&Arc<Quiz>> {
        match &self.phase {
            Phase::Active { quiz, .. } => Some(quiz),
            _ => None,
        }
    }

    pub fn attempt(&self) -> Option<&Attempt> {
        match &self.phase {
            Phase::Active { attempt, .. } => Some(attempt),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        match &self.phase {
            Phase::Active { quiz, attempt } => Some(SessionSnapshot::capture(quiz, attempt)),
            _ => None,
        }
    }

    pub fn dispatch(&mut self, event: Event) -> Vec<Effect> {
        match self.phase {
            Phase::Loading => self.reduce_loading(event),
            Phase::Failed(_) => {
                debug!(?event, "ignoring event after failed load");
                Vec::new()
            }
            Phase::Active { .. } => self.reduce_active(event),
        }
    }

    fn reduce_loading(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::QuizLoaded(quiz) => {
                let attempt = Attempt::new(&quiz);
                let id = attempt.id();
                info!(
                    quiz = %quiz.id,
                    questions = quiz.total_questions(),
                    seconds = attempt.remaining_seconds(),
                    attempt = %id,
                    "attempt started"
                );
                self.phase = Phase::Active { quiz, attempt };
                vec![Effect::StartCountdown { attempt: id }]
            }
            Event::LoadFailed(err) => {
                info!(error = %err, "quiz failed to load");
                self.phase = Phase::Failed(err);
                Vec::new()
            }
            other => {
                debug!(event = ?other, "ignoring event while loading");
                Vec::new()
            }
        }
    }

    fn reduce_active(&mut self, event: Event) -> Vec<Effect> {
        let feedback_window = self.config.feedback_window;
        let Phase::Active { quiz, attempt } = &mut self.phase else {
            return Vec::new();
        };

        match event {
            Event::QuizLoaded(_) | Event::LoadFailed(_) => {
                debug!("quiz already loaded");
                Vec::new()
            }
            Event::SelectAnswer(option) => select_answer(quiz, attempt, option, feedback_window),
            Event::FeedbackElapsed { attempt: id } => close_feedback(quiz, attempt, id),
            Event::GoTo(index) => navigate(quiz, attempt, Move::To(index)),
            Event::Next => navigate(quiz, attempt, Move::Next),
            Event::Previous => navigate(quiz, attempt, Move::Previous),
            Event::Tick { attempt: id } => tick(quiz, attempt, id),
            Event::Finish => {
                if !attempt.is_running() || attempt.feedback().is_some() {
                    debug!(status = ?attempt.status(), "finish ignored");
                    return Vec::new();
                }
                finish(quiz, attempt, CompletionReason::Submitted)
            }
            Event::Restart => {
                if attempt.is_running() {
                    debug!("restart ignored while running");
                    return Vec::new();
                }
                *attempt = Attempt::new(quiz);
                info!(quiz = %quiz.id, attempt = %attempt.id(), "attempt restarted");
                vec![
                    Effect::StopCountdown,
                    Effect::CancelFeedback,
                    Effect::StartCountdown {
                        attempt: attempt.id(),
                    },
                ]
            }
        }
    }
}

fn select_answer(
    quiz: &Quiz,
    attempt: &mut Attempt,
    option: usize,
    feedback_window: Duration,
) -> Vec<Effect> {
    if !attempt.is_running() || attempt.feedback().is_some() {
        debug!(option, "answer ignored");
        return Vec::new();
    }

    let valid = quiz
        .question(attempt.current_index())
        .is_some_and(|q| option < q.option_count());
    if !valid {
        debug!(option, question = attempt.current_index(), "no such option");
        return Vec::new();
    }

    let feedback = attempt.record_answer(quiz, option);
    debug!(
        question = feedback.question,
        option,
        correct = feedback.correct,
        "answer recorded"
    );
    vec![Effect::ScheduleFeedbackClose {
        attempt: attempt.id(),
        after: feedback_window,
    }]
}

fn close_feedback(quiz: &Quiz, attempt: &mut Attempt, id: AttemptId) -> Vec<Effect> {
    if id != attempt.id() || !attempt.is_running() {
        debug!(%id, "stale feedback timeout");
        return Vec::new();
    }

    if let Some(question) = attempt.close_feedback() {
        if question < quiz.last_index() {
            attempt.move_to(question + 1);
        }
    }
    Vec::new()
}

fn navigate(quiz: &Quiz, attempt: &mut Attempt, mv: Move) -> Vec<Effect> {
    match navigation::resolve(attempt, quiz.total_questions(), mv) {
        Some(index) => attempt.move_to(index),
        None => debug!(?mv, from = attempt.current_index(), "navigation refused"),
    }
    Vec::new()
}

fn tick(quiz: &Quiz, attempt: &mut Attempt, id: AttemptId) -> Vec<Effect> {
    if id != attempt.id() || !attempt.is_running() {
        debug!(%id, "tick ignored");
        return Vec::new();
    }

    if attempt.tick() {
        info!(attempt = %attempt.id(), "time is up");
        return finish(quiz, attempt, CompletionReason::TimedOut);
    }
    Vec::new()
}

fn finish(quiz: &Quiz, attempt: &mut Attempt, reason: CompletionReason) -> Vec<Effect> {
    let score = attempt.finish(quiz, reason);
    info!(
        attempt = %attempt.id(),
        correct = score.correct,
        total = score.total,
        percentage = score.percentage,
        ?reason,
        "attempt finished"
    );
    vec![
        Effect::StopCountdown,
        Effect::CancelFeedback,
        Effect::Completed {
            attempt: attempt.id(),
            score,
            reason,
        },
    ]
}
