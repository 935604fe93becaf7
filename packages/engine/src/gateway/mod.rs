//! Typed boundary surface over the session flow service.
//!
//! Each operation validates input shape (identifier syntax, non-blank guess
//! values), maps failures to the stable codes in `errors::error_code`, and
//! is otherwise a direct pass-through. No business logic lives here.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::session::{PlayerId, SessionId};
use crate::domain::snapshot::SessionSnapshot;
use crate::errors::error_code::ErrorCode;
use crate::errors::gateway::GatewayError;
use crate::services::session_flow::{GuessOutcome, SessionFlowService};

/// Membership returned by a join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinOutcome {
    /// Member list after the join, in join order.
    pub players: Vec<PlayerId>,
    /// Version the join committed at.
    pub version: u64,
}

/// Boundary facade: every operation takes caller-shaped input (string ids)
/// and delegates to the flow service.
pub struct SessionGateway {
    flow: Arc<SessionFlowService>,
}

impl SessionGateway {
    pub fn new(flow: Arc<SessionFlowService>) -> Self {
        Self { flow }
    }

    /// Create a session owned by `creator`; returns its id.
    pub async fn create_session(&self, creator: &str) -> Result<SessionId, GatewayError> {
        let creator = parse_player_id(creator)?;
        let session = self.flow.create_session(creator).await?;
        Ok(session.id())
    }

    /// Add a player to a waiting session.
    pub async fn join_session(
        &self,
        session_id: &str,
        player: &str,
    ) -> Result<JoinOutcome, GatewayError> {
        let session_id = parse_session_id(session_id)?;
        let player = parse_player_id(player)?;
        let result = self.flow.join_session(&session_id, player).await?;
        Ok(JoinOutcome {
            players: result.session.players().to_vec(),
            version: result.final_version(),
        })
    }

    /// Submit a guess for arbitration against the current round.
    pub async fn submit_guess(
        &self,
        session_id: &str,
        player: &str,
        value: &str,
        timestamp_ms: i64,
    ) -> Result<GuessOutcome, GatewayError> {
        let session_id = parse_session_id(session_id)?;
        let player = parse_player_id(player)?;
        if value.trim().is_empty() {
            return Err(GatewayError::bad_request(
                ErrorCode::EmptyGuess,
                "guess value must not be blank",
            ));
        }
        self.flow
            .submit_guess(&session_id, player, value, timestamp_ms)
            .await
    }

    /// Latest committed snapshot. The hidden target value never leaves the
    /// core through this surface, only its presence.
    pub async fn get_session(&self, session_id: &str) -> Result<SessionSnapshot, GatewayError> {
        let session_id = parse_session_id(session_id)?;
        self.flow.session_snapshot(&session_id).await
    }

    /// Start the first round of a waiting session.
    pub async fn start_round(&self, session_id: &str) -> Result<SessionSnapshot, GatewayError> {
        let session_id = parse_session_id(session_id)?;
        let result = self.flow.start_round(&session_id, None).await?;
        Ok(SessionSnapshot::from_session(&result.session))
    }

    /// Expire the current round without a scorer.
    pub async fn skip_round(&self, session_id: &str) -> Result<SessionSnapshot, GatewayError> {
        let session_id = parse_session_id(session_id)?;
        let result = self.flow.skip_round(&session_id).await?;
        Ok(SessionSnapshot::from_session(&result.session))
    }
}

fn parse_session_id(raw: &str) -> Result<SessionId, GatewayError> {
    SessionId::parse(raw).ok_or_else(|| {
        GatewayError::bad_request(
            ErrorCode::InvalidSessionId,
            format!("invalid session id: '{raw}'"),
        )
    })
}

fn parse_player_id(raw: &str) -> Result<PlayerId, GatewayError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(GatewayError::bad_request(
            ErrorCode::InvalidPlayerId,
            "player id must not be blank",
        ));
    }
    Ok(PlayerId::new(trimmed))
}
