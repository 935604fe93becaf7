use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::session::{PlayerId, Session, SessionId, SessionStatus};

/// Read-model view of a session, safe to hand to any collaborator.
///
/// Reports target **presence** only; the hidden value itself never leaves
/// the engine through the query surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    pub status: SessionStatus,
    /// Members in join order.
    pub players: Vec<PlayerId>,
    /// Points per member; keys always equal the member set.
    pub scores: BTreeMap<PlayerId, u32>,
    pub round_no: u32,
    pub has_target: bool,
    pub winner: Option<PlayerId>,
    pub version: u64,
}

impl SessionSnapshot {
    pub fn from_session(session: &Session) -> Self {
        Self {
            session_id: session.id(),
            status: session.status(),
            players: session.players().to_vec(),
            scores: session
                .score_entries()
                .map(|(player, entry)| (player.clone(), entry.points))
                .collect(),
            round_no: session.round_no(),
            has_target: session.has_target(),
            winner: session.winner().cloned(),
            version: session.version(),
        }
    }
}
