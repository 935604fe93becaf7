// Integration tests for the query surface.
//
// Snapshots are the only read model: they expose target presence, never
// the target value, and serialize with stable field names.

use engine::domain::session::SessionStatus;
use engine::GatewayError;
use serde_json::json;

use crate::support::factory::{fixed_rounds, score_threshold, scripted_harness};

#[tokio::test]
async fn test_waiting_snapshot_shape() -> Result<(), GatewayError> {
    let h = scripted_harness(fixed_rounds(5), &["🐶"]);
    let id = h.gateway.create_session("ada").await?;
    let key = id.to_string();
    h.gateway.join_session(&key, "grace").await?;

    let snapshot = h.gateway.get_session(&key).await?;
    let value = serde_json::to_value(&snapshot).unwrap();

    assert_eq!(value["session_id"], json!(key));
    assert_eq!(value["status"], json!("WAITING"));
    assert_eq!(value["players"], json!(["ada", "grace"]));
    assert_eq!(value["scores"], json!({"ada": 0, "grace": 0}));
    assert_eq!(value["round_no"], json!(0));
    assert_eq!(value["has_target"], json!(false));
    assert_eq!(value["winner"], json!(null));
    assert_eq!(value["version"], json!(2));
    Ok(())
}

#[tokio::test]
async fn test_snapshot_never_reveals_the_target() -> Result<(), GatewayError> {
    let h = scripted_harness(fixed_rounds(5), &["🐶"]);
    let key = h.gateway.create_session("ada").await?.to_string();
    h.gateway.start_round(&key).await?;

    let snapshot = h.gateway.get_session(&key).await?;
    assert_eq!(snapshot.status, SessionStatus::Active);
    assert!(snapshot.has_target);

    let raw = serde_json::to_string(&snapshot).unwrap();
    assert!(
        !raw.contains("🐶"),
        "target value leaked into the snapshot: {raw}"
    );
    Ok(())
}

#[tokio::test]
async fn test_snapshot_follows_the_session_to_finished() -> Result<(), GatewayError> {
    let h = scripted_harness(score_threshold(1), &["🐶"]);
    let key = h.gateway.create_session("ada").await?.to_string();
    h.gateway.join_session(&key, "grace").await?;
    h.gateway.start_round(&key).await?;

    let outcome = h.gateway.submit_guess(&key, "grace", "🐶", 1_000).await?;
    let outcome_json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(outcome_json["verdict"], json!("SCORED"));
    assert_eq!(outcome_json["record"]["scored"], json!(true));
    assert_eq!(outcome_json["record"]["round_no"], json!(1));

    let value = serde_json::to_value(&h.gateway.get_session(&key).await?).unwrap();
    assert_eq!(value["status"], json!("FINISHED"));
    assert_eq!(value["winner"], json!("grace"));
    assert_eq!(value["scores"]["grace"], json!(1));
    assert_eq!(value["has_target"], json!(false));
    assert_eq!(value["round_no"], json!(1));
    Ok(())
}

#[tokio::test]
async fn test_round_start_and_skip_return_fresh_snapshots() -> Result<(), GatewayError> {
    let h = scripted_harness(fixed_rounds(5), &["🐶", "🐱"]);
    let key = h.gateway.create_session("ada").await?.to_string();

    let started = h.gateway.start_round(&key).await?;
    assert_eq!(started.status, SessionStatus::Active);
    assert_eq!(started.round_no, 1);
    assert_eq!(started.version, 2);

    let skipped = h.gateway.skip_round(&key).await?;
    assert_eq!(skipped.round_no, 2);
    assert_eq!(skipped.version, 3);
    Ok(())
}
