//! Validation and orchestration services over the record store.
//!
//! Services receive raw text fields from the presentation layer, validate
//! them, and delegate to the [`Database`](crate::db::Database). Every call
//! returns either a success payload or a tagged [`ServiceError`]; the
//! presentation layer owns all user-facing wording.

mod patients;
mod appointments;

pub use patients::*;
pub use appointments::*;

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::db::DbError;

/// Service errors surfaced to the presentation layer.
///
/// Parse failures keep the raw input so the caller can re-display it.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Invalid birth date: {input}")]
    InvalidDateFormat { input: String },

    #[error("Invalid appointment date-time: {input}")]
    InvalidDateTimeFormat { input: String },

    #[error("Identifier already registered: {identifier}")]
    DuplicateIdentifier { identifier: String },

    #[error("Patient not found: {identifier}")]
    NotFound { identifier: String },

    #[error("No patient with identifier: {identifier}")]
    PatientNotFound { identifier: String },

    #[error("Database error: {0}")]
    Db(DbError),
}

// Store-level constraint hits (a racing duplicate insert, a foreign-key
// miss) surface as the same tagged errors the pre-checks produce.
impl From<DbError> for ServiceError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::DuplicateIdentifier(identifier) => {
                ServiceError::DuplicateIdentifier { identifier }
            }
            DbError::NotFound(identifier) => ServiceError::NotFound { identifier },
            DbError::PatientNotFound(identifier) => ServiceError::PatientNotFound { identifier },
            other => ServiceError::Db(other),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Parse a birth date in `YYYY-MM-DD` form.
pub fn parse_birth_date(input: &str) -> ServiceResult<NaiveDate> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| ServiceError::InvalidDateFormat {
        input: input.to_string(),
    })
}

/// Parse an appointment time in `YYYY-MM-DDTHH:MM` form.
pub fn parse_scheduled_at(input: &str) -> ServiceResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M").map_err(|_| {
        ServiceError::InvalidDateTimeFormat {
            input: input.to_string(),
        }
    })
}
