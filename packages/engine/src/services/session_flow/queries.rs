use super::SessionFlowService;
use crate::domain::guess::GuessRecord;
use crate::domain::session::SessionId;
use crate::domain::snapshot::SessionSnapshot;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::errors::gateway::GatewayError;
use crate::store::SessionStore;

impl SessionFlowService {
    /// Read the latest committed snapshot of a session. Unknown ids are
    /// not-found errors here, unlike on the mutation paths.
    pub async fn session_snapshot(
        &self,
        session_id: &SessionId,
    ) -> Result<SessionSnapshot, GatewayError> {
        let found = self
            .store
            .get_session(session_id)
            .await
            .map_err(DomainError::from)?;
        let session = found.ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Session, format!("session {session_id}"))
        })?;
        Ok(SessionSnapshot::from_session(&session))
    }

    /// Audit log for one round, in arrival order.
    pub async fn round_guesses(
        &self,
        session_id: &SessionId,
        round_no: u32,
    ) -> Result<Vec<GuessRecord>, GatewayError> {
        let records = self
            .store
            .guesses_for_round(session_id, round_no)
            .await
            .map_err(DomainError::from)?;
        Ok(records)
    }

    /// Full audit log for a session, in arrival order.
    pub async fn session_guesses(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<GuessRecord>, GatewayError> {
        let records = self
            .store
            .guesses_for_session(session_id)
            .await
            .map_err(DomainError::from)?;
        Ok(records)
    }
}
