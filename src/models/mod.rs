mod question;
mod quiz;

pub use question::{Question, QuestionDocument};
pub use quiz::{InvalidQuiz, Quiz, QuizDocument};
