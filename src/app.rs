use crate::engine::{AttemptId, SessionSnapshot};
use crate::models::Question;
use crate::session::QuizSession;

/// Terminal-side state wrapped around a running session: which option the
/// cursor is on and how far the result list is scrolled.
pub struct App {
    session: QuizSession,
    highlighted_option: usize,
    result_scroll: usize,
}

impl App {
    pub fn new(session: QuizSession) -> Self {
        Self {
            session,
            highlighted_option: 0,
            result_scroll: 0,
        }
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        self.session.snapshot()
    }

    pub fn current_question(&self) -> Option<&Question> {
        let index = self.current_index()?;
        self.session.quiz()?.question(index)
    }

    pub fn questions(&self) -> &[Question] {
        self.session.quiz().map(|q| q.questions()).unwrap_or(&[])
    }

    pub fn highlighted_option(&self) -> usize {
        self.highlighted_option
    }

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    fn current_index(&self) -> Option<usize> {
        self.session.engine().attempt().map(|a| a.current_index())
    }

    fn option_count(&self) -> usize {
        self.current_question().map_or(0, |q| q.option_count())
    }

    /// Wait for the next countdown or feedback event and apply it.
    pub async fn process_timer_event(&mut self) {
        let before = self.position();
        self.session.process_next().await;
        self.follow_question(before);
    }

    pub fn highlight_next_option(&mut self) {
        let count = self.option_count();
        if count > 0 {
            self.highlighted_option = (self.highlighted_option + 1) % count;
        }
    }

    pub fn highlight_previous_option(&mut self) {
        let count = self.option_count();
        if count > 0 {
            self.highlighted_option = (self.highlighted_option + count - 1) % count;
        }
    }

    pub fn submit_highlighted(&mut self) {
        let option = self.highlighted_option;
        self.session.select_answer(option);
    }

    /// Answer with the option at `option` directly (number keys).
    pub fn answer_with(&mut self, option: usize) {
        if option < self.option_count() {
            self.highlighted_option = option;
            self.session.select_answer(option);
        }
    }

    pub fn next_question(&mut self) {
        self.track_question(QuizSession::next);
    }

    pub fn previous_question(&mut self) {
        self.track_question(QuizSession::previous);
    }

    pub fn go_to_question(&mut self, index: usize) {
        self.track_question(|session| session.go_to(index));
    }

    pub fn finish(&mut self) {
        self.session.finish();
        self.result_scroll = 0;
    }

    pub fn restart(&mut self) {
        self.track_question(QuizSession::restart);
        self.result_scroll = 0;
    }

    pub fn scroll_results_down(&mut self) {
        let max_scroll = self.questions().len().saturating_sub(1);
        self.result_scroll = (self.result_scroll + 1).min(max_scroll);
    }

    pub fn scroll_results_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }

    /// Run `action` and move the cursor to the stored answer when the
    /// question changes.
    fn track_question(&mut self, action: impl FnOnce(&mut QuizSession)) {
        let before = self.position();
        action(&mut self.session);
        self.follow_question(before);
    }

    fn position(&self) -> Option<(AttemptId, usize)> {
        self.session.engine().attempt().map(|a| (a.id(), a.current_index()))
    }

    fn follow_question(&mut self, before: Option<(AttemptId, usize)>) {
        if before != self.position() {
            self.highlighted_option = self
                .session
                .engine()
                .attempt()
                .and_then(|a| a.answer(a.current_index()))
                .unwrap_or(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::engine::{testing::quiz_with, SessionConfig};

    #[tokio::test]
    async fn test_highlight_wraps_over_options() {
        let session = QuizSession::start(Arc::new(quiz_with(&[0, 1], 1)), SessionConfig::default());
        let mut app = App::new(session);

        app.highlight_previous_option();
        assert_eq!(app.highlighted_option(), 2);
        app.highlight_next_option();
        assert_eq!(app.highlighted_option(), 0);
    }

    #[tokio::test]
    async fn test_cursor_follows_stored_answer() {
        let session = QuizSession::start(Arc::new(quiz_with(&[0, 1], 1)), SessionConfig::default());
        let mut app = App::new(session);

        app.answer_with(2);
        let attempt = app.session().engine().attempt().unwrap().id();
        app.track_question(|s| s.dispatch(crate::engine::Event::FeedbackElapsed { attempt }));
        assert_eq!(app.highlighted_option(), 0);

        app.previous_question();
        assert_eq!(app.highlighted_option(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_event_moves_cursor_with_question() {
        let config = SessionConfig {
            feedback_window: Duration::from_millis(500),
            ..SessionConfig::default()
        };
        let mut app = App::new(QuizSession::start(Arc::new(quiz_with(&[0, 1], 1)), config));

        app.answer_with(1);
        assert_eq!(app.highlighted_option(), 1);

        // The feedback window closes first and advances to the next question.
        app.process_timer_event().await;
        let snapshot = app.snapshot().unwrap();
        assert_eq!(snapshot.current_index, 1);
        assert_eq!(snapshot.remaining_seconds, 60);
        assert_eq!(app.highlighted_option(), 0);

        app.process_timer_event().await;
        assert_eq!(app.snapshot().unwrap().remaining_seconds, 59);
    }

    #[tokio::test]
    async fn test_result_scroll_is_bounded() {
        let session = QuizSession::start(Arc::new(quiz_with(&[0, 1], 1)), SessionConfig::default());
        let mut app = App::new(session);
        app.finish();

        for _ in 0..5 {
            app.scroll_results_down();
        }
        assert_eq!(app.result_scroll(), 1);
        app.scroll_results_up();
        app.scroll_results_up();
        assert_eq!(app.result_scroll(), 0);
    }
}
