//! Session runtime.
//!
//! Owns the [`Engine`], the countdown and the feedback timer. Timers never
//! touch the engine themselves: they post events into a channel that the
//! owner drains with [`QuizSession::pump`] or [`QuizSession::process_next`],
//! so each event is applied in one step on the owning task.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::data::{fetch_quiz, LoadError, QuizStore};
use crate::engine::{
    AttemptId, CompletionReason, Countdown, Effect, Engine, Event, Score, SessionConfig,
    SessionSnapshot,
};
use crate::models::Quiz;

/// Reported once per finished attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    pub attempt: AttemptId,
    pub score: Score,
    pub reason: CompletionReason,
}

type Reporter = Box<dyn FnMut(Completion) + Send>;

pub struct QuizSession {
    engine: Engine,
    events_tx: mpsc::UnboundedSender<Event>,
    events_rx: mpsc::UnboundedReceiver<Event>,
    countdown: Option<Countdown>,
    feedback_close: Option<JoinHandle<()>>,
    reporter: Option<Reporter>,
}

impl QuizSession {
    /// A session in the loading phase.
    pub fn new(config: SessionConfig) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            engine: Engine::new(config),
            events_tx,
            events_rx,
            countdown: None,
            feedback_close: None,
            reporter: None,
        }
    }

    /// Fetch `key` from `store` and start the first attempt.
    pub async fn open(
        store: &dyn QuizStore,
        key: &str,
        config: SessionConfig,
    ) -> Result<Self, LoadError> {
        let mut session = Self::new(config);
        match fetch_quiz(store, key).await {
            Ok(quiz) => {
                session.dispatch(Event::QuizLoaded(quiz));
                Ok(session)
            }
            Err(err) => {
                session.dispatch(Event::LoadFailed(err.clone()));
                Err(err)
            }
        }
    }

    /// Start an attempt over an already loaded quiz.
    pub fn start(quiz: Arc<Quiz>, config: SessionConfig) -> Self {
        let mut session = Self::new(config);
        session.dispatch(Event::QuizLoaded(quiz));
        session
    }

    /// Called with the score every time an attempt finishes.
    pub fn with_reporter(mut self, reporter: impl FnMut(Completion) + Send + 'static) -> Self {
        self.reporter = Some(Box::new(reporter));
        self
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn quiz(&self) -> Option<&Arc<Quiz>> {
        self.engine.quiz()
    }

    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        self.engine.snapshot()
    }

    pub fn has_countdown(&self) -> bool {
        self.countdown.is_some()
    }

    pub fn select_answer(&mut self, option: usize) {
        self.dispatch(Event::SelectAnswer(option));
    }

    pub fn go_to(&mut self, index: usize) {
        self.dispatch(Event::GoTo(index));
    }

    pub fn next(&mut self) {
        self.dispatch(Event::Next);
    }

    pub fn previous(&mut self) {
        self.dispatch(Event::Previous);
    }

    pub fn finish(&mut self) {
        self.dispatch(Event::Finish);
    }

    pub fn restart(&mut self) {
        self.dispatch(Event::Restart);
    }

    /// Apply every timer event that is already waiting. Returns how many were applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.dispatch(event);
            applied += 1;
        }
        applied
    }

    /// Wait for the next timer event and apply it.
    pub async fn process_next(&mut self) {
        // The session holds a sender, so the channel never closes under us.
        if let Some(event) = self.events_rx.recv().await {
            self.dispatch(event);
        }
    }

    pub fn dispatch(&mut self, event: Event) {
        for effect in self.engine.dispatch(event) {
            self.apply(effect);
        }
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::StartCountdown { attempt } => {
                // Stop any previous ticker before arming a new one.
                self.countdown = None;
                let period = self.engine.config().tick_period;
                self.countdown = Some(Countdown::start(attempt, period, self.events_tx.clone()));
                debug!(%attempt, ?period, "countdown armed");
            }
            Effect::StopCountdown => {
                if let Some(countdown) = self.countdown.take() {
                    debug!(attempt = %countdown.attempt(), "countdown stopped");
                    countdown.stop();
                }
            }
            Effect::ScheduleFeedbackClose { attempt, after } => {
                self.cancel_feedback();
                self.feedback_close = Some(spawn_feedback_close(
                    attempt,
                    after,
                    self.events_tx.clone(),
                ));
            }
            Effect::CancelFeedback => self.cancel_feedback(),
            Effect::Completed {
                attempt,
                score,
                reason,
            } => {
                info!(
                    %attempt,
                    correct = score.correct,
                    total = score.total,
                    percentage = score.percentage,
                    tier = score.tier().label(),
                    "score reported"
                );
                if let Some(reporter) = self.reporter.as_mut() {
                    reporter(Completion {
                        attempt,
                        score,
                        reason,
                    });
                }
            }
        }
    }

    fn cancel_feedback(&mut self) {
        if let Some(handle) = self.feedback_close.take() {
            handle.abort();
        }
    }
}

impl Drop for QuizSession {
    fn drop(&mut self) {
        self.cancel_feedback();
    }
}

fn spawn_feedback_close(
    attempt: AttemptId,
    after: Duration,
    events: mpsc::UnboundedSender<Event>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(after).await;
        let _ = events.send(Event::FeedbackElapsed { attempt });
    })
}
