// Integration tests for change announcements.
//
// Every committed mutation announces the version it produced; no-ops and
// failed calls announce nothing. Subscribers watch per-session streams
// through the hub.

use std::sync::Arc;

use engine::domain::session::PlayerId;
use engine::store::MemoryStore;
use engine::GatewayError;

use crate::support::factory::{fixed_rounds, flow_with, harness};
use crate::support::fixed_targets::FixedTargets;
use crate::support::recording_notifier::RecordingNotifier;

#[tokio::test]
async fn test_every_committed_mutation_announces_its_version() -> Result<(), GatewayError> {
    let notifier = Arc::new(RecordingNotifier::default());
    let flow = flow_with(
        Arc::new(MemoryStore::new()),
        Arc::new(FixedTargets::new(&["🐶", "🐱", "🦊"])),
        notifier.clone(),
        fixed_rounds(5),
    );
    let grace = PlayerId::new("grace");
    let session = flow.create_session(PlayerId::new("ada")).await?;
    let id = session.id();

    flow.join_session(&id, grace.clone()).await?;
    flow.start_round(&id, None).await?;
    flow.submit_guess(&id, grace, "🐶", 1_000).await?;
    flow.skip_round(&id).await?;

    assert_eq!(notifier.versions_for(&id), vec![1, 2, 3, 4, 5]);
    Ok(())
}

#[tokio::test]
async fn test_noops_and_failures_announce_nothing() -> Result<(), GatewayError> {
    let notifier = Arc::new(RecordingNotifier::default());
    let flow = flow_with(
        Arc::new(MemoryStore::new()),
        Arc::new(FixedTargets::new(&["🐶"])),
        notifier.clone(),
        fixed_rounds(5),
    );
    let grace = PlayerId::new("grace");
    let session = flow.create_session(PlayerId::new("ada")).await?;
    let id = session.id();
    flow.join_session(&id, grace.clone()).await?;
    flow.start_round(&id, None).await?;
    flow.finish_session(&id, grace.clone()).await?;

    let committed = notifier.events().len();
    assert_eq!(committed, 4);

    // Idempotent repeat finish commits nothing.
    flow.finish_session(&id, grace.clone()).await?;
    // Rejected calls commit nothing.
    let _ = flow
        .join_session(&id, PlayerId::new("late"))
        .await
        .unwrap_err();
    let _ = flow
        .submit_guess(&id, PlayerId::new("mallory"), "🐶", 0)
        .await
        .unwrap_err();
    // Recorded-but-unscored guesses commit nothing either.
    let late = flow.submit_guess(&id, grace, "🐶", 0).await?;
    assert!(!late.scored());

    assert_eq!(notifier.events().len(), committed);
    Ok(())
}

#[tokio::test]
async fn test_hub_subscribers_see_commits_for_their_session() -> Result<(), GatewayError> {
    let h = harness();
    let session = h.flow.create_session(PlayerId::new("ada")).await?;
    let id = session.id();
    let mut rx = h.hub.subscribe(id);

    h.flow.join_session(&id, PlayerId::new("grace")).await?;
    h.flow.start_round(&id, None).await?;

    let first = rx.recv().await.unwrap();
    assert_eq!(first.session_id, id);
    assert_eq!(first.version, 2);
    let second = rx.recv().await.unwrap();
    assert_eq!(second.version, 3);
    Ok(())
}
