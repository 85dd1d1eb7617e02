//! Scoring of single answers and whole attempts.

use serde::Serialize;

use crate::models::{Question, Quiz};

/// Percentage at or above which an attempt lands in the top tier.
pub const EXCELLENT_THRESHOLD: u32 = 70;
/// Percentage at or above which an attempt lands in the middle tier.
pub const GOOD_THRESHOLD: u32 = 50;

/// Final result of an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
    pub percentage: u32,
}

impl Score {
    pub fn tier(&self) -> Tier {
        Tier::from_percentage(self.percentage)
    }
}

/// User-facing result band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Excellent,
    Good,
    NeedsImprovement,
}

impl Tier {
    pub fn from_percentage(percentage: u32) -> Self {
        match percentage {
            p if p >= EXCELLENT_THRESHOLD => Tier::Excellent,
            p if p >= GOOD_THRESHOLD => Tier::Good,
            _ => Tier::NeedsImprovement,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tier::Excellent => "Excellent!",
            Tier::Good => "Good",
            Tier::NeedsImprovement => "Needs improvement",
        }
    }
}

pub fn score_answer(question: &Question, selected: Option<usize>) -> bool {
    selected == Some(question.correct_index)
}

/// Score an attempt. Unanswered questions count as incorrect.
pub fn score_attempt(quiz: &Quiz, answers: &[Option<usize>]) -> Score {
    let total = quiz.total_questions();
    let correct = quiz
        .questions()
        .iter()
        .zip(answers.iter())
        .filter(|(question, answer)| score_answer(question, **answer))
        .count();

    Score {
        correct,
        total,
        percentage: rounded_percentage(correct, total),
    }
}

/// `part / total * 100`, rounded half up.
pub(crate) fn rounded_percentage(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let scaled = (part as u64 * 200 + total as u64) / (total as u64 * 2);
    scaled as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::quiz_with;

    #[test]
    fn test_score_answer() {
        let q = quiz_with(&[2], 1);
        let question = &q.questions()[0];
        assert!(score_answer(question, Some(2)));
        assert!(!score_answer(question, Some(0)));
        assert!(!score_answer(question, None));
    }

    #[test]
    fn test_unanswered_counts_against_total() {
        let q = quiz_with(&[0, 1, 2], 1);
        let score = score_attempt(&q, &[Some(0), Some(0), None]);
        assert_eq!(
            score,
            Score {
                correct: 1,
                total: 3,
                percentage: 33
            }
        );
        assert_eq!(score_attempt(&q, &[Some(0), Some(0), None]), score);
    }

    #[test]
    fn test_rounds_half_up() {
        assert_eq!(rounded_percentage(2, 3), 67);
        assert_eq!(rounded_percentage(1, 8), 13);
        assert_eq!(rounded_percentage(1, 200), 1);
        assert_eq!(rounded_percentage(0, 5), 0);
        assert_eq!(rounded_percentage(5, 5), 100);
    }

    #[test]
    fn test_percentage_matches_ratio_for_all_counts() {
        for total in 1..=40usize {
            for correct in 0..=total {
                let expected = ((correct * 100) as f64 / total as f64 + 0.5).floor() as u32;
                assert_eq!(rounded_percentage(correct, total), expected, "{correct}/{total}");
            }
        }
    }

    #[test]
    fn test_tier_bands() {
        assert_eq!(Tier::from_percentage(100), Tier::Excellent);
        assert_eq!(Tier::from_percentage(70), Tier::Excellent);
        assert_eq!(Tier::from_percentage(69), Tier::Good);
        assert_eq!(Tier::from_percentage(50), Tier::Good);
        assert_eq!(Tier::from_percentage(49), Tier::NeedsImprovement);
        assert_eq!(Tier::from_percentage(0), Tier::NeedsImprovement);
    }
}
