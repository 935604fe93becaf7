//! In-memory reference store for tests, the simulator, and embedded use.

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::RwLock;
use time::OffsetDateTime;

use crate::domain::guess::{GuessId, GuessRecord, NewGuess};
use crate::domain::session::{Session, SessionId};
use crate::store::{SessionStore, StoreError};

/// Keyed in-memory store.
///
/// Sessions live in a `DashMap`; `compare_and_swap` holds the entry's shard
/// guard across the version check and the write, which makes commits
/// linearizable per key. The guess log is a single append-only vector; ids
/// are assigned under the write lock, so id order is exactly append order.
#[derive(Default)]
pub struct MemoryStore {
    sessions: DashMap<SessionId, Session>,
    guesses: RwLock<Vec<GuessRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn insert_session(&self, session: Session) -> Result<Session, StoreError> {
        let id = session.id();
        match self.sessions.entry(id) {
            dashmap::mapref::entry::Entry::Occupied(_) => Err(StoreError::DuplicateSession(id)),
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(session.clone());
                Ok(session)
            }
        }
    }

    async fn get_session(&self, id: &SessionId) -> Result<Option<Session>, StoreError> {
        Ok(self.sessions.get(id).map(|entry| entry.clone()))
    }

    async fn compare_and_swap(
        &self,
        id: &SessionId,
        expected_version: u64,
        updated: Session,
    ) -> Result<Session, StoreError> {
        let mut entry = self
            .sessions
            .get_mut(id)
            .ok_or(StoreError::SessionNotFound(*id))?;
        let actual = entry.version();
        if actual != expected_version {
            return Err(StoreError::VersionMismatch {
                expected: expected_version,
                actual,
            });
        }
        let mut committed = updated;
        committed.set_version(expected_version + 1);
        *entry = committed.clone();
        Ok(committed)
    }

    async fn append_guess(&self, guess: NewGuess) -> Result<GuessRecord, StoreError> {
        let mut log = self.guesses.write();
        let id = GuessId::new(log.len() as u64 + 1);
        let record = GuessRecord::from_submission(id, guess, OffsetDateTime::now_utc());
        log.push(record.clone());
        Ok(record)
    }

    async fn mark_guess_scored(&self, id: GuessId) -> Result<(), StoreError> {
        let mut log = self.guesses.write();
        match log.iter_mut().find(|record| record.id == id) {
            Some(record) => {
                record.scored = true;
                Ok(())
            }
            None => Err(StoreError::GuessNotFound(id)),
        }
    }

    async fn guesses_for_round(
        &self,
        session_id: &SessionId,
        round_no: u32,
    ) -> Result<Vec<GuessRecord>, StoreError> {
        let log = self.guesses.read();
        Ok(log
            .iter()
            .filter(|record| record.session_id == *session_id && record.round_no == round_no)
            .cloned()
            .collect())
    }

    async fn guesses_for_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<GuessRecord>, StoreError> {
        let log = self.guesses.read();
        Ok(log
            .iter()
            .filter(|record| record.session_id == *session_id)
            .cloned()
            .collect())
    }
}
