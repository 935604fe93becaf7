//! Session flow orchestration - bridges pure domain logic with the session
//! store.
//!
//! Every mutation follows the same shape: read the versioned session, apply
//! domain logic to a copy, commit with compare-and-swap, bounded retry on
//! version mismatch. A committed mutation logs its transitions and announces
//! the new version through the notifier.

mod guesses;
mod membership;
mod mutation;
mod queries;
mod round_lifecycle;

use std::sync::Arc;

use crate::config::EngineConfig;
use crate::notify::SessionNotifier;
use crate::store::SessionStore;
use crate::targets::TargetSource;

pub use guesses::GuessOutcome;
pub use mutation::MutationResult;

/// Session flow service - owns the store, the target source, and the
/// notification hook.
pub struct SessionFlowService {
    store: Arc<dyn SessionStore>,
    targets: Arc<dyn TargetSource>,
    notifier: Arc<dyn SessionNotifier>,
    config: EngineConfig,
}

impl SessionFlowService {
    pub fn new(
        store: Arc<dyn SessionStore>,
        targets: Arc<dyn TargetSource>,
        notifier: Arc<dyn SessionNotifier>,
        config: EngineConfig,
    ) -> Self {
        Self {
            store,
            targets,
            notifier,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
