use thiserror::Error;

use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind, ValidationKind};
use crate::errors::ErrorCode;

/// Caller-facing error with a stable code.
///
/// Everything below the service boundary speaks `DomainError`; services hand
/// this type back so callers can branch on `code()` for user feedback.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation { code: ErrorCode, detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Persistence error: {detail}")]
    Persistence { code: ErrorCode, detail: String },
    #[error("Billing error: {detail}")]
    Billing { code: ErrorCode, detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { code, .. } => *code,
            AppError::NotFound { code, .. } => *code,
            AppError::Persistence { code, .. } => *code,
            AppError::Billing { code, .. } => *code,
            AppError::Config { .. } => ErrorCode::ConfigError,
            AppError::Internal { .. } => ErrorCode::Internal,
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            AppError::Validation { detail, .. }
            | AppError::NotFound { detail, .. }
            | AppError::Persistence { detail, .. }
            | AppError::Billing { detail, .. }
            | AppError::Config { detail }
            | AppError::Internal { detail } => detail,
        }
    }

    /// Non-fatal failures: the score entry that preceded them stands.
    pub fn is_warning(&self) -> bool {
        matches!(self, AppError::Billing { .. } | AppError::Persistence { .. })
    }

    pub fn invalid(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Validation {
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
            detail: detail.into(),
        }
    }
}

fn validation_code(kind: &ValidationKind) -> ErrorCode {
    match kind {
        ValidationKind::TooFewPlayers => ErrorCode::TooFewPlayers,
        ValidationKind::DuplicatePlayer => ErrorCode::DuplicatePlayer,
        ValidationKind::UnknownPlayer => ErrorCode::UnknownPlayer,
        ValidationKind::GuestMissingHost => ErrorCode::GuestMissingHost,
        ValidationKind::UnknownHost => ErrorCode::UnknownHost,
        ValidationKind::InvalidPeriod => ErrorCode::InvalidPeriod,
        ValidationKind::InvalidScoreValue => ErrorCode::InvalidScoreValue,
        ValidationKind::NotAPermutation => ErrorCode::NotAPermutation,
        ValidationKind::ReorderRequiresManual => ErrorCode::ReorderRequiresManual,
        ValidationKind::PlayerNotOnSheet => ErrorCode::PlayerNotOnSheet,
        ValidationKind::UnresolvableHost => ErrorCode::UnresolvableHost,
        ValidationKind::Other(_) => ErrorCode::ValidationError,
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(kind, detail) => AppError::Validation {
                code: validation_code(&kind),
                detail,
            },
            DomainError::NotFound(kind, detail) => {
                let code = match kind {
                    NotFoundKind::Sheet => ErrorCode::SheetNotFound,
                    NotFoundKind::Member => ErrorCode::MemberNotFound,
                    NotFoundKind::Other(_) => ErrorCode::NotFound,
                };
                AppError::NotFound { code, detail }
            }
            DomainError::Infra(kind, detail) => {
                let code = match kind {
                    InfraErrorKind::Timeout => ErrorCode::WriteDeadlineExceeded,
                    InfraErrorKind::DbUnavailable => ErrorCode::DbUnavailable,
                    InfraErrorKind::DataCorruption => ErrorCode::DataCorruption,
                    InfraErrorKind::Other(_) => ErrorCode::PersistenceFailed,
                };
                AppError::Persistence { code, detail }
            }
            DomainError::Billing(detail) => AppError::Billing {
                code: ErrorCode::BillingFailed,
                detail,
            },
        }
    }
}

impl From<std::env::VarError> for AppError {
    fn from(e: std::env::VarError) -> Self {
        AppError::config(format!("env var error: {e}"))
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        AppError::from(DomainError::from(e))
    }
}
