//! Domain layer: pure session logic, types, and helpers.

pub mod arbitration;
pub mod guess;
pub mod normalize;
pub mod rules;
pub mod session;
pub mod snapshot;
pub mod transition;

#[cfg(test)]
mod tests_normalize;
#[cfg(test)]
mod tests_props_session;
#[cfg(test)]
mod tests_session;

// Re-exports for ergonomics
pub use arbitration::GuessVerdict;
pub use guess::{GuessId, GuessRecord, NewGuess};
pub use session::{PlayerId, Session, SessionId, SessionStatus, Target};
pub use snapshot::SessionSnapshot;
pub use transition::SessionTransition;
