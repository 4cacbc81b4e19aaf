//! SeaORM -> DomainError translation helpers.
//!
//! Adapters return `sea_orm::DbErr`; repos convert here so services only
//! ever see `DomainError`.

use tracing::{error, warn};

use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind};

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Structured not-found markers raised by adapters via `DbErr::Custom`.
const SHEET_NOT_FOUND: &str = "SHEET_NOT_FOUND:";
const CORRUPT_ROW: &str = "CORRUPT_ROW:";

pub fn sheet_not_found(sheet_id: &str) -> sea_orm::DbErr {
    sea_orm::DbErr::Custom(format!("{SHEET_NOT_FOUND}{sheet_id}"))
}

pub fn corrupt_row(detail: impl AsRef<str>) -> sea_orm::DbErr {
    sea_orm::DbErr::Custom(format!("{CORRUPT_ROW}{}", detail.as_ref()))
}

/// Translate a `DbErr` into a `DomainError`; raw driver text stays in logs.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();

    match &e {
        sea_orm::DbErr::RecordNotFound(_) => {
            return DomainError::not_found(NotFoundKind::Other("Record".into()), "Record not found");
        }
        sea_orm::DbErr::Custom(msg) if msg.starts_with(SHEET_NOT_FOUND) => {
            let sheet_id = msg.trim_start_matches(SHEET_NOT_FOUND);
            return DomainError::not_found(
                NotFoundKind::Sheet,
                format!("Sheet {sheet_id} not found"),
            );
        }
        sea_orm::DbErr::Custom(msg) if msg.starts_with(CORRUPT_ROW) => {
            error!(raw_error = %msg, "Stored sheet data could not be decoded");
            return DomainError::infra(
                InfraErrorKind::DataCorruption,
                msg.trim_start_matches(CORRUPT_ROW).to_string(),
            );
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(raw_error = %error_msg, "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        warn!(raw_error = %error_msg, "Unique constraint violation");
        return DomainError::validation_other("Unique constraint violation");
    }

    if mentions_sqlstate(&error_msg, "23503") || error_msg.contains("FOREIGN KEY constraint failed")
    {
        warn!(raw_error = %error_msg, "Foreign key constraint violation");
        return DomainError::validation_other("Foreign key constraint violation");
    }

    if error_msg.contains("timeout")
        || error_msg.contains("pool")
        || error_msg.contains("unavailable")
    {
        warn!(raw_error = %error_msg, "Database timeout or pool issue");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(raw_error = %error_msg, "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}
