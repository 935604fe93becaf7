//! Boundary error type returned by the session gateway.
//!
//! Every `DomainError` maps to exactly one stable `ErrorCode` here. Callers
//! are expected to treat `OPTIMISTIC_LOCK` as transient-retryable and every
//! other code as non-retryable.

use thiserror::Error;

use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::errors::error_code::ErrorCode;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Bad request: {detail}")]
    BadRequest { code: ErrorCode, detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: ErrorCode, detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Internal error: {detail}")]
    Internal { code: ErrorCode, detail: String },
}

impl GatewayError {
    /// The stable boundary code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            GatewayError::BadRequest { code, .. } => *code,
            GatewayError::Conflict { code, .. } => *code,
            GatewayError::NotFound { code, .. } => *code,
            GatewayError::Config { .. } => ErrorCode::ConfigError,
            GatewayError::Internal { code, .. } => *code,
        }
    }

    /// Human-readable detail for this error.
    pub fn detail(&self) -> &str {
        match self {
            GatewayError::BadRequest { detail, .. } => detail,
            GatewayError::Conflict { detail, .. } => detail,
            GatewayError::NotFound { detail, .. } => detail,
            GatewayError::Config { detail } => detail,
            GatewayError::Internal { detail, .. } => detail,
        }
    }

    /// Whether a caller may retry the same call unchanged.
    pub fn is_retryable(&self) -> bool {
        self.code() == ErrorCode::OptimisticLock
    }

    pub fn bad_request(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            detail: detail.into(),
        }
    }

    pub fn conflict(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            detail: detail.into(),
        }
    }

    pub fn not_found(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            code: ErrorCode::Internal,
            detail: detail.into(),
        }
    }
}

impl From<DomainError> for GatewayError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(kind, detail) => {
                let code = match kind {
                    ValidationKind::InvalidState => ErrorCode::InvalidState,
                    ValidationKind::NotAMember => ErrorCode::NotAMember,
                    ValidationKind::InvalidInput => ErrorCode::ValidationError,
                    _ => ErrorCode::ValidationError,
                };
                GatewayError::BadRequest { code, detail }
            }
            DomainError::Conflict(kind, detail) => {
                let code = match kind {
                    ConflictKind::DuplicateMember => ErrorCode::DuplicateMember,
                    ConflictKind::OptimisticLock => ErrorCode::OptimisticLock,
                    _ => ErrorCode::Conflict,
                };
                GatewayError::Conflict { code, detail }
            }
            DomainError::NotFound(kind, detail) => {
                let code = match kind {
                    NotFoundKind::Session => ErrorCode::SessionNotFound,
                    _ => ErrorCode::NotFound,
                };
                GatewayError::NotFound { code, detail }
            }
            DomainError::Infra(kind, detail) => match kind {
                InfraErrorKind::Store => GatewayError::Internal {
                    code: ErrorCode::StoreUnavailable,
                    detail,
                },
                InfraErrorKind::Config => GatewayError::Config { detail },
                _ => GatewayError::Internal {
                    code: ErrorCode::Internal,
                    detail,
                },
            },
        }
    }
}
