//! # timed-quiz
//!
//! A timed multiple-choice quiz session engine with a terminal front end.
//!
//! The engine drives one attempt at a quiz: a countdown clock, answer
//! capture with instant feedback, navigation between questions, scoring on
//! completion and restart. Quizzes come from a [`QuizStore`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use timed_quiz::{JsonQuizStore, QuizError, SessionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QuizError> {
//!     let store = JsonQuizStore::new("quizzes.json");
//!     timed_quiz::run(&store, "fractions-basics", SessionConfig::default()).await
//! }
//! ```

mod app;
mod data;
pub mod engine;
mod models;
mod session;
pub mod terminal;
mod ui;

use std::io;

use crossterm::event::{Event as InputEvent, EventStream, KeyCode, KeyEventKind};
use futures_util::{Stream, StreamExt};
use thiserror::Error;
use tracing::info;

pub use app::App;
pub use data::{
    fetch_quiz, load_documents_from_json, parse_documents, JsonQuizStore, LoadError,
    MemoryQuizStore, QuizStore, StoreError,
};
pub use engine::{SessionConfig, SessionSnapshot};
pub use models::{InvalidQuiz, Question, QuestionDocument, Quiz, QuizDocument};
pub use session::{Completion, QuizSession};

/// Error type for quiz operations.
#[derive(Debug, Error)]
pub enum QuizError {
    /// The quiz could not be loaded.
    #[error("Failed to load quiz: {0}")]
    Load(#[from] LoadError),
    /// IO error during quiz execution.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Load `key` from `store` and run the quiz in the terminal until the user quits.
pub async fn run(
    store: &dyn QuizStore,
    key: &str,
    config: SessionConfig,
) -> Result<(), QuizError> {
    let session = QuizSession::open(store, key, config).await?;
    let mut app = App::new(session);

    let mut guard = terminal::TerminalGuard::acquire()?;
    let terminal = guard.terminal();
    let result = run_event_loop(&mut app, &mut EventStream::new(), |app| {
        terminal.draw(|frame| ui::render(frame, app)).map(|_| ())
    })
    .await;
    drop(guard);

    info!("quiz closed");
    result
}

/// Redraw, then wait for whichever comes first: a key press or a timer event.
/// Waiting yields to the runtime, so countdown and feedback tasks keep running
/// on a current-thread runtime too.
async fn run_event_loop<S>(
    app: &mut App,
    input: &mut S,
    mut draw: impl FnMut(&App) -> io::Result<()>,
) -> Result<(), QuizError>
where
    S: Stream<Item = io::Result<InputEvent>> + Unpin,
{
    loop {
        draw(app)?;

        tokio::select! {
            next = input.next() => match next {
                Some(Ok(InputEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                    if handle_input(app, key.code) {
                        break;
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(err)) => return Err(err.into()),
                None => break,
            },
            () = app.process_timer_event() => {}
        }
    }

    Ok(())
}

/// Returns true if the app should exit.
fn handle_input(app: &mut App, key: KeyCode) -> bool {
    let finished = app.snapshot().is_some_and(|s| s.is_finished());
    if finished {
        handle_result_input(app, key)
    } else {
        handle_quiz_input(app, key)
    }
}

fn handle_quiz_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.highlight_previous_option(),
        KeyCode::Down | KeyCode::Char('j') => app.highlight_next_option(),
        KeyCode::Enter | KeyCode::Char(' ') => app.submit_highlighted(),
        KeyCode::Char(c @ '1'..='9') => app.answer_with(c as usize - '1' as usize),
        KeyCode::Left | KeyCode::Char('h') => app.previous_question(),
        KeyCode::Right | KeyCode::Char('l') => app.next_question(),
        KeyCode::Home | KeyCode::Char('g') => app.go_to_question(0),
        KeyCode::Char('f') | KeyCode::Char('F') => app.finish(),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return true,
        _ => {}
    }
    false
}

fn handle_result_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.scroll_results_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_results_up(),
        KeyCode::Char('r') | KeyCode::Char('R') => app.restart(),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return true,
        _ => {}
    }
    false
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use crossterm::event::{KeyEvent, KeyModifiers};
    use futures_util::stream;

    use super::*;
    use crate::engine::testing::quiz_with;

    fn app() -> App {
        App::new(QuizSession::start(
            Arc::new(quiz_with(&[1, 0, 2], 1)),
            SessionConfig::default(),
        ))
    }

    #[tokio::test]
    async fn test_number_keys_answer_current_question() {
        let mut app = app();
        assert!(!handle_input(&mut app, KeyCode::Char('2')));

        let snapshot = app.snapshot().unwrap();
        assert_eq!(snapshot.answers, vec![Some(1), None, None]);
        assert!(snapshot.feedback.unwrap().correct);
    }

    #[tokio::test]
    async fn test_finish_then_restart_from_keys() {
        let mut app = app();
        handle_input(&mut app, KeyCode::Char('l'));
        handle_input(&mut app, KeyCode::Char('f'));
        assert!(app.snapshot().unwrap().is_finished());

        // Answer keys do nothing on the result screen.
        handle_input(&mut app, KeyCode::Char('1'));
        assert_eq!(app.snapshot().unwrap().answers, vec![None, None, None]);

        handle_input(&mut app, KeyCode::Char('r'));
        let snapshot = app.snapshot().unwrap();
        assert!(!snapshot.is_finished());
        assert_eq!(snapshot.current_index, 0);
        assert_eq!(snapshot.remaining_seconds, 60);
    }

    #[tokio::test]
    async fn test_quit_keys() {
        let mut app = app();
        assert!(handle_input(&mut app, KeyCode::Char('q')));
        app.finish();
        assert!(handle_input(&mut app, KeyCode::Esc));
    }

    fn key_after(delay: Duration, code: KeyCode) -> impl Stream<Item = io::Result<InputEvent>> {
        stream::once(async move {
            tokio::time::sleep(delay).await;
            Ok(InputEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)))
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_event_loop_keeps_countdown_running() {
        let mut app = app();
        let mut input = Box::pin(key_after(Duration::from_millis(3_500), KeyCode::Char('q')));
        let mut draws = 0;

        run_event_loop(&mut app, &mut input, |_| {
            draws += 1;
            Ok(())
        })
        .await
        .unwrap();

        assert_eq!(app.snapshot().unwrap().remaining_seconds, 57);
        // Initial frame plus one per tick.
        assert_eq!(draws, 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_event_loop_times_out_without_input() {
        let mut app = app();
        let mut input = Box::pin(key_after(Duration::from_secs(65), KeyCode::Esc));

        run_event_loop(&mut app, &mut input, |_| Ok(())).await.unwrap();

        let snapshot = app.snapshot().unwrap();
        assert!(snapshot.is_finished());
        assert_eq!(snapshot.remaining_seconds, 0);
    }

    #[tokio::test]
    async fn test_event_loop_stops_when_input_ends() {
        let mut app = app();
        let mut input = stream::empty::<io::Result<InputEvent>>();

        run_event_loop(&mut app, &mut input, |_| Ok(())).await.unwrap();
        assert!(!app.snapshot().unwrap().is_finished());
    }
}
