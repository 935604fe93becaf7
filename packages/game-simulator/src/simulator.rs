//! In-memory session simulator.
//!
//! Drives the real engine with bot players racing their guesses at every
//! round, exercising the same commit loop a live deployment runs.

use std::sync::Arc;

use engine::config::EngineConfig;
use engine::domain::session::{PlayerId, SessionId, SessionStatus};
use engine::errors::gateway::GatewayError;
use engine::notify::ChangeHub;
use engine::services::session_flow::SessionFlowService;
use engine::store::MemoryStore;
use engine::targets::{EmojiDeck, DEFAULT_FACES};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tokio::task::JoinSet;
use tracing::debug;

/// Concurrent guess waves a round gets before the simulator skips it.
const MAX_WAVES_PER_ROUND: u32 = 12;

/// Outcome of one simulated session.
#[derive(Debug, Clone)]
pub struct SessionResult {
    pub winner: Option<String>,
    pub rounds_played: u32,
    pub guesses_submitted: u64,
    pub rounds_skipped: u32,
}

/// One engine instance plus the bots playing against it.
pub struct Simulator {
    flow: Arc<SessionFlowService>,
    players: Vec<PlayerId>,
    rng: ChaCha8Rng,
}

impl Simulator {
    /// Build a simulator over a fresh in-memory engine. `players` must be
    /// at least 2; the CLI enforces that.
    pub fn new(config: EngineConfig, players: usize, seed: u64) -> Self {
        let hub = Arc::new(ChangeHub::new(config.notify_capacity));
        let flow = Arc::new(SessionFlowService::new(
            Arc::new(MemoryStore::new()),
            Arc::new(EmojiDeck::new(seed)),
            hub,
            config,
        ));
        Self {
            flow,
            players: (0..players)
                .map(|i| PlayerId::new(format!("bot-{i}")))
                .collect(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Run one session from creation to finish.
    pub async fn run_session(&mut self) -> Result<SessionResult, GatewayError> {
        let session = self.flow.create_session(self.players[0].clone()).await?;
        let id = session.id();
        for player in &self.players[1..] {
            self.flow.join_session(&id, player.clone()).await?;
        }
        self.flow.start_round(&id, None).await?;

        let mut guesses_submitted = 0u64;
        let mut rounds_skipped = 0u32;
        let mut timestamp = 0i64;

        loop {
            let snapshot = self.flow.session_snapshot(&id).await?;
            if snapshot.status == SessionStatus::Finished {
                return Ok(SessionResult {
                    winner: snapshot.winner.map(|p| p.to_string()),
                    rounds_played: snapshot.round_no,
                    guesses_submitted,
                    rounds_skipped,
                });
            }
            let round = snapshot.round_no;

            let mut resolved = false;
            for _ in 0..MAX_WAVES_PER_ROUND {
                guesses_submitted += self.guess_wave(id, &mut timestamp).await?;
                let now = self.flow.session_snapshot(&id).await?;
                if now.status == SessionStatus::Finished || now.round_no != round {
                    resolved = true;
                    break;
                }
            }
            if !resolved {
                // Nobody hit the target; expire the round like a timer would.
                self.flow.skip_round(&id).await?;
                rounds_skipped += 1;
            }
        }
    }

    /// One wave: every bot submits a random face, all at once.
    async fn guess_wave(
        &mut self,
        id: SessionId,
        timestamp: &mut i64,
    ) -> Result<u64, GatewayError> {
        let mut tasks = JoinSet::new();
        for player in &self.players {
            *timestamp += 1;
            let face = DEFAULT_FACES[self.rng.random_range(0..DEFAULT_FACES.len())];
            let flow = self.flow.clone();
            let player = player.clone();
            let at = *timestamp;
            tasks.spawn(async move { flow.submit_guess(&id, player, face, at).await });
        }

        let mut submitted = 0u64;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok(outcome)) => {
                    submitted += 1;
                    if outcome.scored() {
                        debug!(
                            player = %outcome.record.player_id,
                            round_no = outcome.record.round_no,
                            "bot scored"
                        );
                    }
                }
                Ok(Err(err)) => {
                    // Only reachable under pathological contention; the
                    // session keeps going without this guess.
                    debug!(error = %err, "guess rejected");
                }
                Err(err) => return Err(GatewayError::internal(err.to_string())),
            }
        }
        Ok(submitted)
    }
}
