//! Error codes for the guessmoji engine boundary.
//!
//! This module defines all error codes exposed through the session gateway.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in boundary responses.

use core::fmt;

/// Centralized error codes for the guessmoji engine boundary.
///
/// This enum ensures type safety and prevents the use of ad-hoc error codes.
/// Each variant maps to a canonical SCREAMING_SNAKE_CASE string that appears
/// in boundary responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// Invalid session ID provided
    InvalidSessionId,
    /// Invalid player ID provided
    InvalidPlayerId,
    /// Empty guess value
    EmptyGuess,
    /// General validation error
    ValidationError,

    // Membership & Lifecycle
    /// Operation not legal in the session's current status
    InvalidState,
    /// Player is not a member of the session
    NotAMember,

    // Resource Not Found
    /// Session not found
    SessionNotFound,
    /// General not found error
    NotFound,

    // Business Logic Conflicts
    /// Player is already a member of the session
    DuplicateMember,
    /// Optimistic lock conflict
    OptimisticLock,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    /// Storage unavailable
    StoreUnavailable,
    /// Configuration error
    ConfigError,
    /// Internal error
    Internal,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    ///
    /// This is the exact string that appears in boundary responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            // Request Validation
            Self::InvalidSessionId => "INVALID_SESSION_ID",
            Self::InvalidPlayerId => "INVALID_PLAYER_ID",
            Self::EmptyGuess => "EMPTY_GUESS",
            Self::ValidationError => "VALIDATION_ERROR",

            // Membership & Lifecycle
            Self::InvalidState => "INVALID_STATE",
            Self::NotAMember => "NOT_A_MEMBER",

            // Resource Not Found
            Self::SessionNotFound => "SESSION_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            // Business Logic Conflicts
            Self::DuplicateMember => "DUPLICATE_MEMBER",
            Self::OptimisticLock => "OPTIMISTIC_LOCK",
            Self::Conflict => "CONFLICT",

            // System Errors
            Self::StoreUnavailable => "STORE_UNAVAILABLE",
            Self::ConfigError => "CONFIG_ERROR",
            Self::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
