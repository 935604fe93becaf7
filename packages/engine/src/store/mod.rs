//! Storage boundary for sessions and the guess audit log.
//!
//! The engine owns no persistence; it drives any store implementing
//! [`SessionStore`]. Two contracts matter for correctness:
//!
//! - `compare_and_swap` must be linearizable per session key: the version
//!   check and the write commit as one step, and a successful commit bumps
//!   the stored version to `expected_version + 1`.
//! - `append_guess` must assign strictly monotone ids; id order is the
//!   store's total arrival order and breaks ties between simultaneously
//!   submitted guesses.

pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::guess::{GuessId, GuessRecord, NewGuess};
use crate::domain::session::{Session, SessionId};
use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};

pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The stored version moved under the caller; re-read and retry.
    #[error("version mismatch: expected {expected}, but session has version {actual}")]
    VersionMismatch { expected: u64, actual: u64 },
    #[error("session {0} already exists")]
    DuplicateSession(SessionId),
    #[error("session {0} not found")]
    SessionNotFound(SessionId),
    #[error("guess {0} not found")]
    GuessNotFound(GuessId),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::VersionMismatch { .. } => {
                DomainError::conflict(ConflictKind::OptimisticLock, err.to_string())
            }
            StoreError::SessionNotFound(_) => {
                DomainError::not_found(NotFoundKind::Session, err.to_string())
            }
            StoreError::DuplicateSession(_) | StoreError::GuessNotFound(_) => {
                DomainError::infra(InfraErrorKind::Other("store".into()), err.to_string())
            }
            StoreError::Unavailable(_) => DomainError::infra(InfraErrorKind::Store, err.to_string()),
        }
    }
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Insert a freshly created session at version 1.
    async fn insert_session(&self, session: Session) -> Result<Session, StoreError>;

    /// Latest committed state of a session, if any.
    async fn get_session(&self, id: &SessionId) -> Result<Option<Session>, StoreError>;

    /// Commit `updated` iff the stored version still equals
    /// `expected_version`. Returns the committed record carrying the bumped
    /// version.
    async fn compare_and_swap(
        &self,
        id: &SessionId,
        expected_version: u64,
        updated: Session,
    ) -> Result<Session, StoreError>;

    /// Append an audit record, assigning its id. Never skipped and never
    /// rolled back by later arbitration.
    async fn append_guess(&self, guess: NewGuess) -> Result<GuessRecord, StoreError>;

    /// Flip the scored flag on a recorded guess; at most once per guess.
    async fn mark_guess_scored(&self, id: GuessId) -> Result<(), StoreError>;

    /// Audit lookup for one round of one session, in arrival order.
    async fn guesses_for_round(
        &self,
        session_id: &SessionId,
        round_no: u32,
    ) -> Result<Vec<GuessRecord>, StoreError>;

    /// Full audit trail for a session, in arrival order.
    async fn guesses_for_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<GuessRecord>, StoreError>;
}
