//! Which question-index changes are allowed.

use super::state::Attempt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    To(usize),
    Next,
    Previous,
}

/// Resolve `mv` to a target index, or `None` when the move is not allowed.
///
/// Moves are refused on a finished attempt and while a feedback window is
/// open. `Next` never steps past the last question; it has to be finished
/// explicitly.
pub fn resolve(attempt: &Attempt, total: usize, mv: Move) -> Option<usize> {
    if !attempt.is_running() || attempt.feedback().is_some() {
        return None;
    }

    let current = attempt.current_index();
    match mv {
        Move::To(index) => (index < total).then_some(index),
        Move::Next => (current + 1 < total).then_some(current + 1),
        Move::Previous => current.checked_sub(1),
    }
}
