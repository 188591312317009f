//! Appointment table operations.

use chrono::{NaiveDateTime, Utc};
use rusqlite::{params, Row};

use super::{is_foreign_key_violation, Database, DbError, DbResult};
use crate::models::Appointment;

fn map_appointment(row: &Row) -> rusqlite::Result<Appointment> {
    Ok(Appointment {
        id: row.get(0)?,
        scheduled_at: row.get(1)?,
        reason: row.get(2)?,
        patient_identifier: row.get(3)?,
        created_at: row.get(4)?,
    })
}

const APPOINTMENT_COLUMNS: &str = "id, scheduled_at, reason, patient_identifier, created_at";

impl Database {
    /// Insert a new appointment and return the stored row.
    pub fn insert_appointment(
        &self,
        patient_identifier: &str,
        scheduled_at: NaiveDateTime,
        reason: &str,
    ) -> DbResult<Appointment> {
        let now = Utc::now().to_rfc3339();
        self.conn
            .execute(
                r#"
                INSERT INTO appointments (scheduled_at, reason, patient_identifier, created_at)
                VALUES (?1, ?2, ?3, ?4)
                "#,
                params![scheduled_at, reason, patient_identifier, now],
            )
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    DbError::PatientNotFound(patient_identifier.to_string())
                } else {
                    e.into()
                }
            })?;

        Ok(Appointment {
            id: self.conn.last_insert_rowid(),
            scheduled_at,
            reason: reason.to_string(),
            patient_identifier: patient_identifier.to_string(),
            created_at: now,
        })
    }

    /// List appointments sorted by scheduled time, latest first.
    pub fn list_appointments_descending(&self) -> DbResult<Vec<Appointment>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {APPOINTMENT_COLUMNS} FROM appointments ORDER BY scheduled_at DESC, id ASC"
        ))?;

        let rows = stmt.query_map([], map_appointment)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// List appointments sorted by scheduled time, earliest first.
    pub fn list_appointments_ascending(&self) -> DbResult<Vec<Appointment>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {APPOINTMENT_COLUMNS} FROM appointments ORDER BY scheduled_at ASC, id ASC"
        ))?;

        let rows = stmt.query_map([], map_appointment)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// List all appointments for one patient, latest first.
    pub fn list_appointments_for_patient(&self, identifier: &str) -> DbResult<Vec<Appointment>> {
        let mut stmt = self.conn.prepare(&format!(
            r#"
            SELECT {APPOINTMENT_COLUMNS} FROM appointments
            WHERE patient_identifier = ?
            ORDER BY scheduled_at DESC, id ASC
            "#
        ))?;

        let rows = stmt.query_map([identifier], map_appointment)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Delete an appointment by id.
    pub fn delete_appointment(&self, id: i64) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM appointments WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }

    /// Total number of stored appointments.
    pub fn count_appointments(&self) -> DbResult<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM appointments", [], |row| row.get(0))
            .map_err(Into::into)
    }
}
