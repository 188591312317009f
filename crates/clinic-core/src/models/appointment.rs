//! Appointment model.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A scheduled appointment.
///
/// Appointments are never edited after creation; they disappear either with
/// their patient or when the retention policy trims the oldest entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    /// Store-assigned row id
    pub id: i64,
    /// Scheduled date and time of day
    pub scheduled_at: NaiveDateTime,
    /// Visit reason, non-empty and bounded
    pub reason: String,
    /// Identifier of the owning patient
    pub patient_identifier: String,
    /// Creation timestamp
    pub created_at: String,
}
