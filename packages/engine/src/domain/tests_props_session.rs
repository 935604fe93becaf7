//! Property-based tests for session invariants.
//!
//! These drive the aggregate through arbitrary operation sequences and check
//! that the documented invariants hold in every reachable state.

use std::collections::BTreeSet;

use proptest::prelude::*;

use crate::domain::session::{PlayerId, Session, SessionStatus, Target};

#[derive(Debug, Clone)]
enum Op {
    Join(u8),
    BeginRound(u8),
    AdvanceRound(u8),
    Credit(u8),
    Finish(u8),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..8).prop_map(Op::Join),
        (0u8..4).prop_map(Op::BeginRound),
        (0u8..4).prop_map(Op::AdvanceRound),
        (0u8..8).prop_map(Op::Credit),
        (0u8..8).prop_map(Op::Finish),
    ]
}

fn player(n: u8) -> PlayerId {
    PlayerId::new(format!("p{n}"))
}

fn target(n: u8) -> Target {
    Target::new(format!("t{n}"))
}

fn apply(session: &mut Session, op: &Op) -> Result<(), crate::errors::DomainError> {
    match op {
        Op::Join(n) => session.add_player(player(*n)),
        Op::BeginRound(n) => session.begin_round(target(*n)),
        Op::AdvanceRound(n) => session.advance_round(target(*n)),
        Op::Credit(n) => session.credit_point(&player(*n)).map(|_| ()),
        Op::Finish(n) => session.record_finish(player(*n)),
    }
}

fn assert_invariants(session: &Session) -> Result<(), TestCaseError> {
    let players: BTreeSet<PlayerId> = session.players().iter().cloned().collect();
    let keys: BTreeSet<PlayerId> = session.score_entries().map(|(p, _)| p.clone()).collect();

    // Members are unique and the score key set tracks them exactly.
    prop_assert_eq!(players.len(), session.player_count());
    prop_assert_eq!(keys, players);

    match session.status() {
        SessionStatus::Finished => prop_assert!(session.winner().is_some()),
        _ => prop_assert!(session.winner().is_none()),
    }
    Ok(())
}

proptest! {
    /// Property: score keys equal the member set, members stay unique, a
    /// winner exists exactly on finished sessions, failed operations never
    /// mutate, and scores never decrease.
    #[test]
    fn prop_session_invariants_hold_under_any_op_sequence(
        ops in proptest::collection::vec(op_strategy(), 0..40),
    ) {
        let mut session = Session::new(player(0));
        assert_invariants(&session)?;

        for op in &ops {
            let before = session.clone();
            let result = apply(&mut session, op);

            if result.is_err() {
                prop_assert_eq!(&session, &before, "failed op {:?} mutated state", op);
            }
            assert_invariants(&session)?;

            for (p, entry) in before.score_entries() {
                prop_assert!(
                    session.score(p).unwrap_or(0) >= entry.points,
                    "score of {} decreased", p
                );
            }
        }
    }

    /// Property: once `Finished`, the winner never changes and status never
    /// leaves `Finished`.
    #[test]
    fn prop_winner_is_immutable_once_set(
        ops in proptest::collection::vec(op_strategy(), 0..60),
    ) {
        let mut session = Session::new(player(0));
        let mut recorded_winner: Option<PlayerId> = None;

        for op in &ops {
            let _ = apply(&mut session, op);

            if let Some(expected) = &recorded_winner {
                prop_assert_eq!(session.status(), SessionStatus::Finished);
                prop_assert_eq!(session.winner(), Some(expected));
            } else if session.status() == SessionStatus::Finished {
                recorded_winner = session.winner().cloned();
                prop_assert!(recorded_winner.is_some());
            }
        }
    }
}
