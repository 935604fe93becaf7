//! Pure arbitration decision for one recorded guess.
//!
//! The caller re-runs this against every fresh session snapshot inside the
//! commit loop; the decision is a pure function of session state, the round
//! the guess was recorded under, and the submitted value.

use serde::Serialize;

use crate::domain::normalize::guess_matches;
use crate::domain::session::{Session, SessionStatus};

/// Outcome of arbitrating one guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GuessVerdict {
    /// Correct and first for its round; scores exactly one point.
    Scored,
    /// Does not match the current target.
    Incorrect,
    /// Correct or not, the round it was recorded under has already
    /// resolved; the record stands but never scores.
    RoundAlreadyResolved,
    /// The session finished before arbitration; audit-only.
    SessionFinished,
}

/// Decide what a guess recorded under `recorded_round` is worth against the
/// current session state.
pub fn arbitrate(session: &Session, recorded_round: u32, value: &str) -> GuessVerdict {
    if session.status() == SessionStatus::Finished {
        return GuessVerdict::SessionFinished;
    }
    if session.round_no() != recorded_round {
        return GuessVerdict::RoundAlreadyResolved;
    }
    match session.current_target() {
        Some(target) if guess_matches(value, target) => GuessVerdict::Scored,
        _ => GuessVerdict::Incorrect,
    }
}
