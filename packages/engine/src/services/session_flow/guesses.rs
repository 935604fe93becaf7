use serde::Serialize;
use tracing::{debug, info};

use super::mutation::retries_exhausted;
use super::SessionFlowService;
use crate::domain::arbitration::{arbitrate, GuessVerdict};
use crate::domain::guess::{GuessRecord, NewGuess};
use crate::domain::rules::{decide_after_score, RoundDecision};
use crate::domain::session::{PlayerId, Session, SessionId, SessionStatus};
use crate::errors::domain::{DomainError, ValidationKind};
use crate::errors::gateway::GatewayError;
use crate::store::{SessionStore, StoreError};
use crate::targets::TargetSource;

/// What one submitted guess produced.
#[derive(Debug, Clone, Serialize)]
pub struct GuessOutcome {
    /// How arbitration ruled.
    pub verdict: GuessVerdict,
    /// The audit record, with `scored` reflecting the ruling.
    pub record: GuessRecord,
    /// Session version the ruling was decided against. Unchanged from the
    /// submission-time read when the ruling committed nothing.
    pub session_version: u64,
}

impl GuessOutcome {
    pub fn scored(&self) -> bool {
        self.verdict == GuessVerdict::Scored
    }
}

impl SessionFlowService {
    /// Record one guess and arbitrate it against the current round.
    ///
    /// The guess is appended to the audit log before arbitration; a failed
    /// append fails the whole call and arbitration never runs. At most one
    /// guess per round scores, decided by commit order on the session, not
    /// by caller timestamps.
    pub async fn submit_guess(
        &self,
        session_id: &SessionId,
        player: PlayerId,
        value: impl Into<String>,
        timestamp_ms: i64,
    ) -> Result<GuessOutcome, GatewayError> {
        let value = value.into();
        let session = self.require_session(session_id).await?;

        if !session.is_member(&player) {
            return Err(DomainError::validation(
                ValidationKind::NotAMember,
                format!("player {player} is not a member of session {session_id}"),
            )
            .into());
        }
        if session.status() == SessionStatus::Waiting {
            return Err(DomainError::validation(
                ValidationKind::InvalidState,
                format!("session {session_id} has no round to guess against"),
            )
            .into());
        }

        // Audit first: the record must exist even when it can never score.
        let record = self
            .store
            .append_guess(NewGuess {
                session_id: *session_id,
                player_id: player.clone(),
                value,
                timestamp_ms,
                round_no: session.round_no(),
            })
            .await
            .map_err(DomainError::from)?;
        debug!(
            session_id = %session_id,
            player = %player,
            guess_id = %record.id,
            round_no = record.round_no,
            "guess recorded"
        );

        self.arbitrate_recorded(session, record, player).await
    }

    /// Run the recorded guess through arbitration, committing the score and
    /// the round decision in one compare-and-swap when it wins.
    async fn arbitrate_recorded(
        &self,
        first_read: Session,
        record: GuessRecord,
        player: PlayerId,
    ) -> Result<GuessOutcome, GatewayError> {
        let session_id = first_read.id();
        let mut current = first_read;

        for attempt in 1..=self.config.mutation_retries {
            let verdict = arbitrate(&current, record.round_no, &record.value);
            if verdict != GuessVerdict::Scored {
                debug!(
                    session_id = %session_id,
                    guess_id = %record.id,
                    verdict = ?verdict,
                    "guess did not score"
                );
                return Ok(GuessOutcome {
                    verdict,
                    record,
                    session_version: current.version(),
                });
            }

            let mut updated = current.clone();
            let total = updated.credit_point(&player)?;
            let decision = decide_after_score(&self.config.win_condition, &updated, &player);
            match &decision {
                RoundDecision::Advance => {
                    // Drawn outside the commit; a lost race wastes the draw.
                    let next_target = self.targets.next_target(updated.current_target()).await?;
                    updated.advance_round(next_target)?;
                }
                RoundDecision::Finish { winner } => {
                    updated.record_finish(winner.clone())?;
                }
            }

            let old_version = current.version();
            match self
                .store
                .compare_and_swap(&session_id, old_version, updated)
                .await
            {
                Ok(committed) => {
                    self.store
                        .mark_guess_scored(record.id)
                        .await
                        .map_err(DomainError::from)?;
                    let result = self.announce_commit(&current, committed, old_version);
                    info!(
                        session_id = %session_id,
                        player = %player,
                        guess_id = %record.id,
                        total,
                        status = ?result.session.status(),
                        version = result.final_version(),
                        "guess scored"
                    );
                    let mut record = record;
                    record.scored = true;
                    return Ok(GuessOutcome {
                        verdict: GuessVerdict::Scored,
                        record,
                        session_version: result.final_version(),
                    });
                }
                Err(StoreError::VersionMismatch { expected, actual }) => {
                    debug!(
                        session_id = %session_id,
                        attempt,
                        expected,
                        actual,
                        "arbitration lost a version race, retrying"
                    );
                    current = self.require_session(&session_id).await?;
                }
                Err(err) => return Err(DomainError::from(err).into()),
            }
        }

        Err(retries_exhausted(&session_id, self.config.mutation_retries))
    }
}
