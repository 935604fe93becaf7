use tracing::info;

use super::mutation::MutationResult;
use super::SessionFlowService;
use crate::domain::session::{PlayerId, Session, SessionId};
use crate::errors::domain::DomainError;
use crate::errors::gateway::GatewayError;
use crate::notify::{SessionChanged, SessionNotifier};
use crate::store::SessionStore;

impl SessionFlowService {
    /// Create a session owned by `creator`, in waiting status with a zero
    /// score. Creator identity is trusted as given.
    pub async fn create_session(&self, creator: PlayerId) -> Result<Session, GatewayError> {
        let session = Session::new(creator.clone());
        let stored = self
            .store
            .insert_session(session)
            .await
            .map_err(DomainError::from)?;

        info!(
            session_id = %stored.id(),
            creator = %creator,
            "session created"
        );
        self.notifier.session_changed(SessionChanged {
            session_id: stored.id(),
            version: stored.version(),
        });
        Ok(stored)
    }

    /// Add `player` to a waiting session.
    ///
    /// Concurrent joins serialize on the session version: a lost commit
    /// re-reads and re-applies, so no join can land on a stale member list.
    pub async fn join_session(
        &self,
        session_id: &SessionId,
        player: PlayerId,
    ) -> Result<MutationResult, GatewayError> {
        let result = self
            .run_mutation(session_id, |current| {
                let mut next = current.clone();
                next.add_player(player.clone())?;
                Ok(next)
            })
            .await?;

        info!(
            session_id = %session_id,
            player = %player,
            players = result.session.player_count(),
            version = result.final_version(),
            "player joined"
        );
        Ok(result)
    }
}
