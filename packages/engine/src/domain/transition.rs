use crate::domain::session::{PlayerId, Session, SessionStatus};

/// Externally meaningful changes derived from a committed mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionTransition {
    /// Explicit: a player joined the session.
    PlayerJoined { player: PlayerId },

    /// Edge-triggered: Waiting -> Active, first round underway.
    SessionStarted,

    /// Edge-triggered: the round ordinal moved while active.
    RoundAdvanced { round_no: u32 },

    /// Explicit: a member's score went up.
    PointScored { player: PlayerId, total: u32 },

    /// Edge-triggered: Active -> Finished with a winner.
    SessionFinished { winner: PlayerId },
}

/// Derive session transitions from before/after state.
pub fn derive_transitions(before: &Session, after: &Session) -> Vec<SessionTransition> {
    let mut transitions = Vec::new();

    // 1. Joins: members are append-only, so anything past the old tail
    //    is new.
    for player in after.players().iter().skip(before.player_count()) {
        transitions.push(SessionTransition::PlayerJoined {
            player: player.clone(),
        });
    }

    // 2. Session start (Waiting -> Active)
    if before.status() == SessionStatus::Waiting && after.status() == SessionStatus::Active {
        transitions.push(SessionTransition::SessionStarted);
    }

    // 3. Score increments
    for (player, entry) in after.score_entries() {
        let old = before.score(player).unwrap_or(0);
        if entry.points > old {
            transitions.push(SessionTransition::PointScored {
                player: player.clone(),
                total: entry.points,
            });
        }
    }

    // 4. Round advance within active play; the first round is covered by
    //    SessionStarted.
    if before.status() == SessionStatus::Active && after.round_no() > before.round_no() {
        transitions.push(SessionTransition::RoundAdvanced {
            round_no: after.round_no(),
        });
    }

    // 5. Finish (!Finished -> Finished)
    if before.status() != SessionStatus::Finished && after.status() == SessionStatus::Finished {
        if let Some(winner) = after.winner() {
            transitions.push(SessionTransition::SessionFinished {
                winner: winner.clone(),
            });
        }
    }

    transitions
}
