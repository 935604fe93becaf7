use std::fmt;

use serde::Serialize;
use time::OffsetDateTime;

use crate::domain::session::{PlayerId, SessionId};

/// Store-assigned guess identifier. Ids are strictly monotone in append
/// order, so id order doubles as the store's total arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct GuessId(u64);

impl GuessId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for GuessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A guess as submitted, before the store assigns identity.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGuess {
    pub session_id: SessionId,
    pub player_id: PlayerId,
    /// Submitted content, stored as received.
    pub value: String,
    /// Caller-supplied order key (wall-clock milliseconds); audit metadata.
    pub timestamp_ms: i64,
    /// Round the guess was submitted against.
    pub round_no: u32,
}

/// Immutable audit record of one submitted guess.
///
/// Records are appended before arbitration and never deleted while their
/// session exists. `scored` is the only field that ever changes, flipped at
/// most once when the guess wins its round.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuessRecord {
    pub id: GuessId,
    pub session_id: SessionId,
    pub player_id: PlayerId,
    pub value: String,
    pub timestamp_ms: i64,
    pub round_no: u32,
    pub scored: bool,
    /// Server-side receive time.
    #[serde(with = "time::serde::rfc3339")]
    pub submitted_at: OffsetDateTime,
}

impl GuessRecord {
    /// Materialize a new record from its submission. Used by stores when
    /// appending; `scored` always starts false.
    pub fn from_submission(id: GuessId, guess: NewGuess, submitted_at: OffsetDateTime) -> Self {
        Self {
            id,
            session_id: guess.session_id,
            player_id: guess.player_id,
            value: guess.value,
            timestamp_ms: guess.timestamp_ms,
            round_no: guess.round_no,
            scored: false,
            submitted_at,
        }
    }
}
