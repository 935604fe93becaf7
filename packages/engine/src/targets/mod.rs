//! Target selection for rounds.

use std::collections::HashSet;

use async_trait::async_trait;
use parking_lot::Mutex;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::domain::session::Target;
use crate::errors::domain::{DomainError, ValidationKind};

/// Supplies the hidden value for each round.
///
/// Implementations may be arbitrarily slow (a remote service, say); the flow
/// layer resolves targets before entering its commit path, so a slow source
/// delays round advancement but never holds a session entry.
#[async_trait]
pub trait TargetSource: Send + Sync {
    /// Pick the target for the next round. `excluding` carries the target of
    /// the round that just ended; the pick must differ from it.
    async fn next_target(&self, excluding: Option<&Target>) -> Result<Target, DomainError>;
}

/// Faces dealt by a deck built with [`EmojiDeck::new`].
pub const DEFAULT_FACES: [&str; 20] = [
    "🐶", "🐱", "🐭", "🐹", "🐰", "🦊", "🐻", "🐼", "🐨", "🐯", "🦁", "🐮", "🐷", "🐸", "🐵",
    "🐔", "🐧", "🐦", "🦄", "🐙",
];

/// Seedable deck of emoji faces.
///
/// Draws uniformly among faces other than the excluded one. Decks built with
/// the same seed replay the same sequence, which tests and the simulator
/// rely on for reproducible sessions.
#[derive(Debug)]
pub struct EmojiDeck {
    faces: Vec<Target>,
    rng: Mutex<ChaCha8Rng>,
}

impl EmojiDeck {
    /// Deck over [`DEFAULT_FACES`] with a fixed seed.
    pub fn new(seed: u64) -> Self {
        Self {
            faces: DEFAULT_FACES.iter().map(|face| Target::new(*face)).collect(),
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    /// Deck over a caller-supplied face list. Needs at least two distinct
    /// faces so a draw that excludes the previous target always has a
    /// candidate left.
    pub fn with_faces(faces: Vec<Target>, seed: u64) -> Result<Self, DomainError> {
        let distinct: HashSet<&Target> = faces.iter().collect();
        if distinct.len() < 2 {
            return Err(DomainError::validation(
                ValidationKind::InvalidInput,
                format!(
                    "deck needs at least 2 distinct faces, got {}",
                    distinct.len()
                ),
            ));
        }
        Ok(Self {
            faces,
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        })
    }
}

impl Default for EmojiDeck {
    fn default() -> Self {
        Self {
            faces: DEFAULT_FACES.iter().map(|face| Target::new(*face)).collect(),
            rng: Mutex::new(ChaCha8Rng::from_os_rng()),
        }
    }
}

#[async_trait]
impl TargetSource for EmojiDeck {
    async fn next_target(&self, excluding: Option<&Target>) -> Result<Target, DomainError> {
        // Construction guarantees at least one candidate after exclusion.
        let candidates: Vec<&Target> = self
            .faces
            .iter()
            .filter(|face| Some(*face) != excluding)
            .collect();
        let mut rng = self.rng.lock();
        let pick = candidates[rng.random_range(0..candidates.len())];
        Ok(pick.clone())
    }
}
