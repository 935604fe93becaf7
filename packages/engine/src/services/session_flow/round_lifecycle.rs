use tracing::{debug, info};

use super::mutation::{retries_exhausted, MutationResult};
use super::SessionFlowService;
use crate::domain::rules::{decide_after_expiry, RoundDecision};
use crate::domain::session::{PlayerId, SessionId, SessionStatus, Target};
use crate::errors::domain::{DomainError, ValidationKind};
use crate::errors::gateway::GatewayError;
use crate::store::{SessionStore, StoreError};
use crate::targets::TargetSource;

impl SessionFlowService {
    /// Start the first round of a waiting session.
    ///
    /// Later rounds advance on their own as guesses resolve (or through
    /// [`SessionFlowService::skip_round`]); a session that is already active
    /// or finished rejects this. When no `target` is supplied one is drawn
    /// from the target source before the commit loop.
    pub async fn start_round(
        &self,
        session_id: &SessionId,
        target: Option<Target>,
    ) -> Result<MutationResult, GatewayError> {
        let target = match target {
            Some(target) => target,
            None => self.targets.next_target(None).await?,
        };

        let result = self
            .run_mutation(session_id, |current| {
                let mut next = current.clone();
                next.begin_round(target.clone())?;
                Ok(next)
            })
            .await?;

        info!(
            session_id = %session_id,
            round_no = result.session.round_no(),
            version = result.final_version(),
            "round started"
        );
        Ok(result)
    }

    /// Expire the current round without a scorer: advance the target, or
    /// finish the session when the expiring round was the last one under a
    /// fixed-round condition.
    ///
    /// This is the hook for an external timer collaborator; the engine
    /// keeps no timers of its own.
    pub async fn skip_round(&self, session_id: &SessionId) -> Result<MutationResult, GatewayError> {
        for attempt in 1..=self.config.mutation_retries {
            let current = self.require_session(session_id).await?;
            if current.status() != SessionStatus::Active {
                return Err(DomainError::validation(
                    ValidationKind::InvalidState,
                    format!(
                        "cannot skip a round while session {session_id} is {:?}",
                        current.status()
                    ),
                )
                .into());
            }

            let mut updated = current.clone();
            match decide_after_expiry(&self.config.win_condition, &current) {
                RoundDecision::Advance => {
                    let next_target = self.targets.next_target(current.current_target()).await?;
                    updated.advance_round(next_target)?;
                }
                RoundDecision::Finish { winner } => updated.record_finish(winner)?,
            }

            let old_version = current.version();
            match self
                .store
                .compare_and_swap(session_id, old_version, updated)
                .await
            {
                Ok(committed) => {
                    let result = self.announce_commit(&current, committed, old_version);
                    info!(
                        session_id = %session_id,
                        round_no = result.session.round_no(),
                        status = ?result.session.status(),
                        version = result.final_version(),
                        "round skipped"
                    );
                    return Ok(result);
                }
                Err(StoreError::VersionMismatch { expected, actual }) => {
                    debug!(
                        session_id = %session_id,
                        attempt,
                        expected,
                        actual,
                        "skip lost a version race, retrying"
                    );
                }
                Err(err) => return Err(DomainError::from(err).into()),
            }
        }

        Err(retries_exhausted(session_id, self.config.mutation_retries))
    }

    /// Finish a session with an explicit winner.
    ///
    /// Round resolution normally finishes sessions on its own; this is the
    /// escape hatch for operators and tests. Idempotent when the session
    /// already finished with the same winner.
    pub async fn finish_session(
        &self,
        session_id: &SessionId,
        winner: PlayerId,
    ) -> Result<MutationResult, GatewayError> {
        let result = self
            .run_mutation(session_id, |current| {
                let mut next = current.clone();
                next.record_finish(winner.clone())?;
                Ok(next)
            })
            .await?;

        if !result.transitions.is_empty() {
            info!(
                session_id = %session_id,
                winner = %winner,
                version = result.final_version(),
                "session finished"
            );
        }
        Ok(result)
    }
}
