use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};

/// Opaque unique session identifier, assigned at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a boundary-supplied identifier. `None` when malformed.
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw.trim()).ok().map(Self)
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque player identifier supplied by the identity collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The hidden value players guess at during a round.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target(String);

impl Target {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Session lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    /// Accepting joins, no round yet.
    Waiting,
    /// A round is in progress, accepting guesses.
    Active,
    /// Terminal, read-only.
    Finished,
}

/// Score entry for one member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlayerScore {
    /// Points accumulated; moves by +1, at most once per round.
    pub points: u32,
    /// Round in which the most recent point landed. Decides who reached a
    /// tied total first when the session ends.
    pub last_scored_round: Option<u32>,
}

impl PlayerScore {
    fn zero() -> Self {
        Self {
            points: 0,
            last_scored_round: None,
        }
    }
}

/// The session aggregate: lifecycle, membership, and the authoritative
/// score map.
///
/// Fields are private so the key-set invariant
/// (`scores.keys() == set(players)`) can only change through
/// [`Session::add_player`], and scores only ever increment through
/// [`Session::credit_point`]. All mutation happens on a copy inside the
/// store commit loop; nothing mutates a committed session in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    id: SessionId,
    status: SessionStatus,
    current_target: Option<Target>,
    players: Vec<PlayerId>,
    scores: BTreeMap<PlayerId, PlayerScore>,
    round_no: u32,
    winner: Option<PlayerId>,
    version: u64,
    created_at: OffsetDateTime,
}

impl Session {
    /// A new session in `Waiting`, owned by `creator` with a zero score.
    pub fn new(creator: PlayerId) -> Self {
        let mut scores = BTreeMap::new();
        scores.insert(creator.clone(), PlayerScore::zero());
        Self {
            id: SessionId::new(),
            status: SessionStatus::Waiting,
            current_target: None,
            players: vec![creator],
            scores,
            round_no: 0,
            winner: None,
            version: 1,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn current_target(&self) -> Option<&Target> {
        self.current_target.as_ref()
    }

    pub fn has_target(&self) -> bool {
        self.current_target.is_some()
    }

    /// Members in join order.
    pub fn players(&self) -> &[PlayerId] {
        &self.players
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn is_member(&self, player: &PlayerId) -> bool {
        self.players.contains(player)
    }

    /// Current round ordinal; 0 while `Waiting`.
    pub fn round_no(&self) -> u32 {
        self.round_no
    }

    pub fn winner(&self) -> Option<&PlayerId> {
        self.winner.as_ref()
    }

    /// Optimistic-concurrency counter, managed by the store.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Overwrite the version counter. Intended for `SessionStore`
    /// implementations committing a mutation; flow code never calls this.
    pub fn set_version(&mut self, version: u64) {
        self.version = version;
    }

    pub fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    pub fn score(&self, player: &PlayerId) -> Option<u32> {
        self.scores.get(player).map(|s| s.points)
    }

    pub fn score_entry(&self, player: &PlayerId) -> Option<&PlayerScore> {
        self.scores.get(player)
    }

    /// Score entries keyed by player. Keys always equal the member set.
    pub fn score_entries(&self) -> impl Iterator<Item = (&PlayerId, &PlayerScore)> {
        self.scores.iter()
    }

    /// Append a member with a zero score, atomically with respect to this
    /// value. Only legal while `Waiting`.
    pub fn add_player(&mut self, player: PlayerId) -> Result<(), DomainError> {
        if self.status != SessionStatus::Waiting {
            return Err(DomainError::validation(
                ValidationKind::InvalidState,
                format!(
                    "cannot join session {} in status {:?}",
                    self.id, self.status
                ),
            ));
        }
        if self.is_member(&player) {
            return Err(DomainError::conflict(
                ConflictKind::DuplicateMember,
                format!("player {player} is already a member of session {}", self.id),
            ));
        }
        self.scores.insert(player.clone(), PlayerScore::zero());
        self.players.push(player);
        Ok(())
    }

    /// Start the first round: `Waiting` becomes `Active` with `round_no` 1.
    pub fn begin_round(&mut self, target: Target) -> Result<(), DomainError> {
        match self.status {
            SessionStatus::Waiting => {
                self.status = SessionStatus::Active;
                self.round_no = 1;
                self.current_target = Some(target);
                Ok(())
            }
            SessionStatus::Active => Err(DomainError::validation(
                ValidationKind::InvalidState,
                format!("round {} is already in progress", self.round_no),
            )),
            SessionStatus::Finished => Err(DomainError::validation(
                ValidationKind::InvalidState,
                format!("session {} is finished", self.id),
            )),
        }
    }

    /// Move to the next round after the current one resolved or expired.
    pub fn advance_round(&mut self, target: Target) -> Result<(), DomainError> {
        if self.status != SessionStatus::Active {
            return Err(DomainError::validation(
                ValidationKind::InvalidState,
                format!(
                    "cannot advance a round while session is {:?}",
                    self.status
                ),
            ));
        }
        self.round_no += 1;
        self.current_target = Some(target);
        Ok(())
    }

    /// Add one point to a member's score and remember the round it landed
    /// in. Only legal while `Active`. Returns the new total.
    pub fn credit_point(&mut self, player: &PlayerId) -> Result<u32, DomainError> {
        if self.status != SessionStatus::Active {
            return Err(DomainError::validation(
                ValidationKind::InvalidState,
                format!("cannot score while session is {:?}", self.status),
            ));
        }
        let round_no = self.round_no;
        match self.scores.get_mut(player) {
            Some(entry) => {
                entry.points += 1;
                entry.last_scored_round = Some(round_no);
                Ok(entry.points)
            }
            None => Err(DomainError::validation(
                ValidationKind::NotAMember,
                format!("player {player} is not a member of session {}", self.id),
            )),
        }
    }

    /// Transition to `Finished` with `winner`. Idempotent when already
    /// finished with the same winner; any other repeat is an error.
    pub fn record_finish(&mut self, winner: PlayerId) -> Result<(), DomainError> {
        match self.status {
            SessionStatus::Active => {
                if !self.is_member(&winner) {
                    return Err(DomainError::validation(
                        ValidationKind::NotAMember,
                        format!("winner {winner} is not a member of session {}", self.id),
                    ));
                }
                self.status = SessionStatus::Finished;
                self.winner = Some(winner);
                self.current_target = None;
                Ok(())
            }
            SessionStatus::Finished => {
                if self.winner.as_ref() == Some(&winner) {
                    Ok(())
                } else {
                    Err(DomainError::validation(
                        ValidationKind::InvalidState,
                        format!(
                            "session {} already finished with a different winner",
                            self.id
                        ),
                    ))
                }
            }
            SessionStatus::Waiting => Err(DomainError::validation(
                ValidationKind::InvalidState,
                format!("session {} has not started", self.id),
            )),
        }
    }
}
