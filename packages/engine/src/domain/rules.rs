use crate::domain::session::{PlayerId, Session};

pub const DEFAULT_MAX_ROUNDS: u32 = 5;
pub const DEFAULT_TARGET_SCORE: u32 = 3;

/// How a session decides it is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinCondition {
    /// Play exactly `max_rounds` rounds; the highest score takes the
    /// session.
    FixedRounds { max_rounds: u32 },
    /// First player to reach `target_score` points takes the session.
    ScoreThreshold { target_score: u32 },
}

impl Default for WinCondition {
    fn default() -> Self {
        Self::FixedRounds {
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }
}

/// What happens to the session once a round is over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundDecision {
    /// Move on to the next target.
    Advance,
    /// The session ends now with this winner.
    Finish { winner: PlayerId },
}

/// Decision after `scorer` was credited for the current round. The session
/// must already carry the credited point; `round_no` is still the resolving
/// round.
pub fn decide_after_score(
    condition: &WinCondition,
    session: &Session,
    scorer: &PlayerId,
) -> RoundDecision {
    match condition {
        WinCondition::ScoreThreshold { target_score } => {
            let total = session.score(scorer).unwrap_or(0);
            if total >= *target_score {
                // The scorer just crossed the threshold; anyone else at it
                // would have ended the session earlier.
                RoundDecision::Finish {
                    winner: scorer.clone(),
                }
            } else {
                RoundDecision::Advance
            }
        }
        WinCondition::FixedRounds { max_rounds } => {
            if session.round_no() >= *max_rounds {
                match leading_player(session) {
                    Some(winner) => RoundDecision::Finish { winner },
                    None => RoundDecision::Advance,
                }
            } else {
                RoundDecision::Advance
            }
        }
    }
}

/// Decision after the current round expired without a scorer.
pub fn decide_after_expiry(condition: &WinCondition, session: &Session) -> RoundDecision {
    match condition {
        // A threshold can only be crossed by scoring.
        WinCondition::ScoreThreshold { .. } => RoundDecision::Advance,
        WinCondition::FixedRounds { max_rounds } => {
            if session.round_no() >= *max_rounds {
                match leading_player(session) {
                    Some(winner) => RoundDecision::Finish { winner },
                    None => RoundDecision::Advance,
                }
            } else {
                RoundDecision::Advance
            }
        }
    }
}

/// The member currently holding the session: highest score, tied totals go
/// to whoever reached theirs in the earliest round, an all-zero board falls
/// back to join order. `None` only for an empty member list, which no
/// constructed session has.
pub fn leading_player(session: &Session) -> Option<PlayerId> {
    let mut best: Option<(&PlayerId, u32, u32)> = None;
    for player in session.players() {
        let entry = session.score_entry(player)?;
        let reached = entry.last_scored_round.unwrap_or(0);
        let better = match best {
            None => true,
            Some((_, best_points, best_reached)) => {
                entry.points > best_points
                    || (entry.points == best_points && reached < best_reached)
            }
        };
        if better {
            best = Some((player, entry.points, reached));
        }
    }
    best.map(|(player, _, _)| player.clone())
}
