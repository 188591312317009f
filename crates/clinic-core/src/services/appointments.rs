//! Appointment scheduling service.

use tracing::info;

use super::{parse_scheduled_at, ServiceError, ServiceResult};
use crate::db::Database;
use crate::models::Appointment;
use crate::retention::RetentionPolicy;

/// Result of scheduling one appointment.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleOutcome {
    /// The stored appointment
    pub appointment: Appointment,
    /// How many old appointments the retention policy removed afterwards
    pub trimmed: usize,
}

/// Validates and orchestrates appointment creation and retrieval.
pub struct AppointmentService<'a> {
    db: &'a mut Database,
    retention: RetentionPolicy,
}

impl<'a> AppointmentService<'a> {
    /// Service with the default retention policy.
    pub fn new(db: &'a mut Database) -> Self {
        Self {
            db,
            retention: RetentionPolicy::default(),
        }
    }

    /// Service with a custom retention policy.
    pub fn with_retention(db: &'a mut Database, retention: RetentionPolicy) -> Self {
        Self { db, retention }
    }

    /// Schedule an appointment for an existing patient.
    ///
    /// The creation commits first; retention runs as a separate transaction,
    /// so a trim failure never undoes the new appointment. The outcome
    /// reports how many old appointments were evicted, if any.
    pub fn schedule(
        &mut self,
        patient_identifier: &str,
        scheduled_at_text: &str,
        reason: &str,
    ) -> ServiceResult<ScheduleOutcome> {
        let scheduled_at = parse_scheduled_at(scheduled_at_text)?;

        if self
            .db
            .get_patient_by_identifier(patient_identifier)?
            .is_none()
        {
            return Err(ServiceError::PatientNotFound {
                identifier: patient_identifier.to_string(),
            });
        }

        let appointment = self
            .db
            .insert_appointment(patient_identifier, scheduled_at, reason)?;
        let trimmed = self.retention.enforce(self.db)?;

        info!(patient = patient_identifier, trimmed, "scheduled appointment");
        Ok(ScheduleOutcome {
            appointment,
            trimmed,
        })
    }

    /// Appointments sorted by scheduled time, latest first.
    pub fn list_recent(&self) -> ServiceResult<Vec<Appointment>> {
        Ok(self.db.list_appointments_descending()?)
    }

    /// Appointments sorted by scheduled time, earliest first.
    pub fn list_upcoming_first(&self) -> ServiceResult<Vec<Appointment>> {
        Ok(self.db.list_appointments_ascending()?)
    }
}
