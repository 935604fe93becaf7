//! Error handling for the guessmoji engine.

pub mod domain;
pub mod error_code;
pub mod gateway;


pub use domain::DomainError;
pub use error_code::ErrorCode;
pub use gateway::GatewayError;
