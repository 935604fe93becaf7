#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod errors;
pub mod gateway;
pub mod notify;
pub mod services;
pub mod store;
pub mod targets;

// Re-exports for public API
pub use config::EngineConfig;
pub use domain::session::{PlayerId, Session, SessionId, SessionStatus, Target};
pub use domain::snapshot::SessionSnapshot;
pub use errors::{DomainError, ErrorCode, GatewayError};
pub use gateway::{JoinOutcome, SessionGateway};
pub use notify::{ChangeHub, NullNotifier, SessionChanged, SessionNotifier};
pub use services::session_flow::{GuessOutcome, SessionFlowService};
pub use store::{MemoryStore, SessionStore};
pub use targets::{EmojiDeck, TargetSource};

// Prelude for test convenience
pub mod prelude {
    pub use super::config::*;
    pub use super::domain::*;
    pub use super::errors::*;
    pub use super::gateway::*;
    pub use super::notify::*;
    pub use super::store::*;
    pub use super::targets::*;
}

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    engine_test_support::logging::init();
}
