use crate::domain::session::{PlayerId, Session, SessionStatus, Target};
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};

fn player(name: &str) -> PlayerId {
    PlayerId::new(name)
}

#[test]
fn new_session_waits_with_creator_scored_zero() {
    let session = Session::new(player("a"));
    assert_eq!(session.status(), SessionStatus::Waiting);
    assert_eq!(session.players(), &[player("a")]);
    assert_eq!(session.score(&player("a")), Some(0));
    assert_eq!(session.round_no(), 0);
    assert_eq!(session.version(), 1);
    assert!(session.winner().is_none());
    assert!(!session.has_target());
}

#[test]
fn join_appends_in_order_with_zero_score() {
    let mut session = Session::new(player("a"));
    session.add_player(player("b")).unwrap();
    session.add_player(player("c")).unwrap();

    assert_eq!(session.players(), &[player("a"), player("b"), player("c")]);
    assert_eq!(session.score(&player("b")), Some(0));
    assert_eq!(session.score(&player("c")), Some(0));
}

#[test]
fn duplicate_join_is_a_conflict_and_mutates_nothing() {
    let mut session = Session::new(player("a"));
    session.add_player(player("b")).unwrap();
    let before = session.clone();

    let err = session.add_player(player("b")).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::DuplicateMember, _)
    ));
    assert_eq!(session, before);
}

#[test]
fn join_after_start_is_invalid_state() {
    let mut session = Session::new(player("a"));
    session.begin_round(Target::new("🐶")).unwrap();
    let before = session.clone();

    let err = session.add_player(player("b")).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::InvalidState, _)
    ));
    assert_eq!(session, before);
}

#[test]
fn begin_round_starts_round_one() {
    let mut session = Session::new(player("a"));
    session.begin_round(Target::new("🐶")).unwrap();

    assert_eq!(session.status(), SessionStatus::Active);
    assert_eq!(session.round_no(), 1);
    assert_eq!(session.current_target(), Some(&Target::new("🐶")));
}

#[test]
fn begin_round_twice_is_invalid_state() {
    let mut session = Session::new(player("a"));
    session.begin_round(Target::new("🐶")).unwrap();
    let err = session.begin_round(Target::new("🐱")).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::InvalidState, _)
    ));
}

#[test]
fn advance_round_bumps_ordinal_and_swaps_target() {
    let mut session = Session::new(player("a"));
    session.begin_round(Target::new("🐶")).unwrap();
    session.advance_round(Target::new("🐱")).unwrap();

    assert_eq!(session.round_no(), 2);
    assert_eq!(session.current_target(), Some(&Target::new("🐱")));
    assert_eq!(session.status(), SessionStatus::Active);
}

#[test]
fn advance_round_requires_active() {
    let mut waiting = Session::new(player("a"));
    assert!(waiting.advance_round(Target::new("🐱")).is_err());

    let mut finished = Session::new(player("a"));
    finished.begin_round(Target::new("🐶")).unwrap();
    finished.record_finish(player("a")).unwrap();
    assert!(finished.advance_round(Target::new("🐱")).is_err());
}

#[test]
fn credit_point_tracks_total_and_round() {
    let mut session = Session::new(player("a"));
    session.add_player(player("b")).unwrap();
    session.begin_round(Target::new("🐶")).unwrap();

    assert_eq!(session.credit_point(&player("a")).unwrap(), 1);
    session.advance_round(Target::new("🐱")).unwrap();
    assert_eq!(session.credit_point(&player("a")).unwrap(), 2);

    let entry = session.score_entry(&player("a")).unwrap();
    assert_eq!(entry.points, 2);
    assert_eq!(entry.last_scored_round, Some(2));
    assert_eq!(session.score(&player("b")), Some(0));
}

#[test]
fn credit_point_rejects_non_members() {
    let mut session = Session::new(player("a"));
    session.begin_round(Target::new("🐶")).unwrap();
    let err = session.credit_point(&player("ghost")).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::NotAMember, _)
    ));
}

#[test]
fn finish_sets_winner_once_and_clears_target() {
    let mut session = Session::new(player("a"));
    session.add_player(player("b")).unwrap();
    session.begin_round(Target::new("🐶")).unwrap();
    session.record_finish(player("b")).unwrap();

    assert_eq!(session.status(), SessionStatus::Finished);
    assert_eq!(session.winner(), Some(&player("b")));
    assert!(!session.has_target());
}

#[test]
fn finish_is_idempotent_for_the_same_winner_only() {
    let mut session = Session::new(player("a"));
    session.add_player(player("b")).unwrap();
    session.begin_round(Target::new("🐶")).unwrap();
    session.record_finish(player("b")).unwrap();

    assert!(session.record_finish(player("b")).is_ok());
    let err = session.record_finish(player("a")).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::InvalidState, _)
    ));
    assert_eq!(session.winner(), Some(&player("b")));
}

#[test]
fn finish_from_waiting_is_invalid_state() {
    let mut session = Session::new(player("a"));
    let err = session.record_finish(player("a")).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::InvalidState, _)
    ));
}

#[test]
fn finish_rejects_non_member_winner() {
    let mut session = Session::new(player("a"));
    session.begin_round(Target::new("🐶")).unwrap();
    let err = session.record_finish(player("ghost")).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::NotAMember, _)
    ));
    assert_eq!(session.status(), SessionStatus::Active);
}
