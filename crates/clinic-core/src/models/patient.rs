//! Patient model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A registered patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    /// Store-assigned row id, never reused
    pub id: i64,
    /// Full name
    pub name: String,
    /// National ID (cedula) - unique across all patients
    pub identifier: String,
    /// Date of birth, no time component
    pub birth_date: NaiveDate,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}
