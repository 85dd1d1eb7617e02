use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use timed_quiz::{JsonQuizStore, SessionConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON file holding one quiz or a list of quizzes
    #[arg(short, long, env = "TIMED_QUIZ_STORE")]
    store: PathBuf,

    /// Slug or id of the quiz to take
    #[arg(short, long, env = "TIMED_QUIZ_QUIZ")]
    quiz: String,

    /// How long answer feedback stays on screen, in milliseconds
    #[arg(long, env = "TIMED_QUIZ_FEEDBACK_MS", default_value_t = 2000)]
    feedback_ms: u64,

    /// Countdown tick period, in milliseconds
    #[arg(long, env = "TIMED_QUIZ_TICK_MS", default_value_t = 1000)]
    tick_ms: u64,

    /// Write logs to this file (the terminal is taken by the quiz)
    #[arg(long, env = "TIMED_QUIZ_LOG_FILE")]
    log_file: Option<PathBuf>,
}

impl Args {
    fn session_config(&self) -> SessionConfig {
        SessionConfig {
            feedback_window: Duration::from_millis(self.feedback_ms),
            tick_period: Duration::from_millis(self.tick_ms),
        }
    }
}

fn init_tracing(log_file: Option<&PathBuf>) -> std::io::Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = init_tracing(args.log_file.as_ref()) {
        eprintln!("Error opening log file: {}", e);
        std::process::exit(1);
    }

    let store = JsonQuizStore::new(&args.store);
    if let Err(e) = timed_quiz::run(&store, &args.quiz, args.session_config()).await {
        eprintln!("Error running quiz: {}", e);
        std::process::exit(1);
    }
}
