use tracing::{debug, warn};

use super::SessionFlowService;
use crate::domain::session::{Session, SessionId};
use crate::domain::transition::{derive_transitions, SessionTransition};
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};
use crate::errors::gateway::GatewayError;
use crate::notify::{SessionChanged, SessionNotifier};
use crate::store::{SessionStore, StoreError};

/// Outcome of one committed (or no-op) mutation.
#[derive(Debug)]
pub struct MutationResult {
    pub session: Session,
    pub old_version: u64,
    pub transitions: Vec<SessionTransition>,
}

impl MutationResult {
    pub fn final_version(&self) -> u64 {
        self.session.version()
    }
}

impl SessionFlowService {
    /// Read-mutate-commit against the store with bounded optimistic retry.
    ///
    /// `mutate` receives the freshest committed session and returns the
    /// desired successor; it may be re-run once per commit attempt, so it
    /// must not carry side effects. Returning a value equal to the input is
    /// the no-op path: nothing commits, nothing is announced.
    pub(super) async fn run_mutation<F>(
        &self,
        session_id: &SessionId,
        mut mutate: F,
    ) -> Result<MutationResult, GatewayError>
    where
        F: FnMut(&Session) -> Result<Session, DomainError>,
    {
        for attempt in 1..=self.config.mutation_retries {
            let current = self.require_session(session_id).await?;
            let old_version = current.version();

            let updated = mutate(&current)?;
            if updated == current {
                return Ok(MutationResult {
                    session: current,
                    old_version,
                    transitions: Vec::new(),
                });
            }

            match self
                .store
                .compare_and_swap(session_id, old_version, updated)
                .await
            {
                Ok(committed) => {
                    return Ok(self.announce_commit(&current, committed, old_version))
                }
                Err(StoreError::VersionMismatch { expected, actual }) => {
                    debug!(
                        session_id = %session_id,
                        attempt,
                        expected,
                        actual,
                        "commit lost a version race, retrying"
                    );
                }
                Err(err) => return Err(DomainError::from(err).into()),
            }
        }

        warn!(
            session_id = %session_id,
            retries = self.config.mutation_retries,
            "mutation gave up after repeated version races"
        );
        Err(retries_exhausted(session_id, self.config.mutation_retries))
    }

    /// Load the session a mutation targets. Mutating a session that does
    /// not exist is an invalid-state error: lifecycle operations apply to
    /// live sessions only.
    pub(super) async fn require_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Session, GatewayError> {
        let found = self
            .store
            .get_session(session_id)
            .await
            .map_err(DomainError::from)?;
        found.ok_or_else(|| {
            DomainError::validation(
                ValidationKind::InvalidState,
                format!("session {session_id} does not exist"),
            )
            .into()
        })
    }

    /// Log the transitions a commit produced and announce the new version.
    pub(super) fn announce_commit(
        &self,
        before: &Session,
        committed: Session,
        old_version: u64,
    ) -> MutationResult {
        let transitions = derive_transitions(before, &committed);
        for transition in &transitions {
            debug!(
                session_id = %committed.id(),
                version = committed.version(),
                transition = ?transition,
                "session transition"
            );
        }
        self.notifier.session_changed(SessionChanged {
            session_id: committed.id(),
            version: committed.version(),
        });
        MutationResult {
            session: committed,
            old_version,
            transitions,
        }
    }
}

/// The conflict surfaced when every commit attempt lost its version race.
pub(super) fn retries_exhausted(session_id: &SessionId, retries: u32) -> GatewayError {
    DomainError::conflict(
        ConflictKind::OptimisticLock,
        format!("session {session_id} kept changing across {retries} commit attempts"),
    )
    .into()
}
