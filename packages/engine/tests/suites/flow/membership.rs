// Integration tests for session membership.
//
// Creation, join ordering, duplicate joins, late joins, and joins against
// sessions that do not exist.

use engine::domain::session::{PlayerId, SessionId, SessionStatus};
use engine::domain::transition::SessionTransition;
use engine::store::SessionStore;
use engine::{ErrorCode, GatewayError};

use crate::support::factory::harness;

#[tokio::test]
async fn test_create_session_starts_waiting() -> Result<(), GatewayError> {
    let h = harness();
    let ada = PlayerId::new("ada");

    let session = h.flow.create_session(ada.clone()).await?;

    assert_eq!(session.status(), SessionStatus::Waiting);
    assert_eq!(session.players(), [ada.clone()]);
    assert_eq!(session.score(&ada), Some(0));
    assert_eq!(session.round_no(), 0);
    assert_eq!(session.version(), 1);
    assert!(session.current_target().is_none());
    assert!(session.winner().is_none());
    Ok(())
}

#[tokio::test]
async fn test_joins_append_in_order_with_zero_scores() -> Result<(), GatewayError> {
    let h = harness();
    let session = h.flow.create_session(PlayerId::new("ada")).await?;
    let id = session.id();
    let grace = PlayerId::new("grace");
    let linus = PlayerId::new("linus");

    let first = h.flow.join_session(&id, grace.clone()).await?;
    assert_eq!(first.final_version(), 2);
    assert_eq!(
        first.transitions,
        vec![SessionTransition::PlayerJoined {
            player: grace.clone()
        }]
    );

    let second = h.flow.join_session(&id, linus.clone()).await?;
    assert_eq!(second.final_version(), 3);
    assert_eq!(
        second.session.players(),
        [PlayerId::new("ada"), grace, linus]
    );
    for player in second.session.players() {
        assert_eq!(second.session.score(player), Some(0));
    }
    Ok(())
}

#[tokio::test]
async fn test_duplicate_join_is_rejected_without_mutation() -> Result<(), GatewayError> {
    let h = harness();
    let session = h.flow.create_session(PlayerId::new("ada")).await?;
    let id = session.id();
    h.flow.join_session(&id, PlayerId::new("grace")).await?;

    let err = h
        .flow
        .join_session(&id, PlayerId::new("grace"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::DuplicateMember);
    assert!(matches!(err, GatewayError::Conflict { .. }));
    assert!(!err.is_retryable());

    let stored = h.store.get_session(&id).await.unwrap().unwrap();
    assert_eq!(stored.player_count(), 2);
    assert_eq!(stored.version(), 2, "a rejected join must not commit");
    Ok(())
}

#[tokio::test]
async fn test_join_after_start_is_rejected() -> Result<(), GatewayError> {
    let h = harness();
    let session = h.flow.create_session(PlayerId::new("ada")).await?;
    let id = session.id();
    h.flow.join_session(&id, PlayerId::new("grace")).await?;
    h.flow.start_round(&id, None).await?;

    let err = h
        .flow
        .join_session(&id, PlayerId::new("late"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidState);

    let stored = h.store.get_session(&id).await.unwrap().unwrap();
    assert!(!stored.is_member(&PlayerId::new("late")));
    Ok(())
}

#[tokio::test]
async fn test_join_against_a_missing_session_is_invalid_state() -> Result<(), GatewayError> {
    let h = harness();

    let err = h
        .flow
        .join_session(&SessionId::new(), PlayerId::new("ada"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidState);
    Ok(())
}
