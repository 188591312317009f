//! Patient table operations.

use chrono::{NaiveDate, Utc};
use rusqlite::{params, OptionalExtension, Row};
use tracing::debug;

use super::{is_unique_violation, Database, DbError, DbResult};
use crate::models::Patient;

fn map_patient(row: &Row) -> rusqlite::Result<Patient> {
    Ok(Patient {
        id: row.get(0)?,
        name: row.get(1)?,
        identifier: row.get(2)?,
        birth_date: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

const PATIENT_COLUMNS: &str = "id, name, identifier, birth_date, created_at, updated_at";

impl Database {
    /// Insert a new patient and return the stored row.
    pub fn insert_patient(
        &self,
        name: &str,
        identifier: &str,
        birth_date: NaiveDate,
    ) -> DbResult<Patient> {
        let now = Utc::now().to_rfc3339();
        self.conn
            .execute(
                r#"
                INSERT INTO patients (name, identifier, birth_date, created_at, updated_at)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
                params![name, identifier, birth_date, now, now],
            )
            .map_err(|e| {
                if is_unique_violation(&e) {
                    DbError::DuplicateIdentifier(identifier.to_string())
                } else {
                    e.into()
                }
            })?;

        Ok(Patient {
            id: self.conn.last_insert_rowid(),
            name: name.to_string(),
            identifier: identifier.to_string(),
            birth_date,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Get a patient by national identifier.
    pub fn get_patient_by_identifier(&self, identifier: &str) -> DbResult<Option<Patient>> {
        self.conn
            .query_row(
                &format!("SELECT {PATIENT_COLUMNS} FROM patients WHERE identifier = ?"),
                [identifier],
                map_patient,
            )
            .optional()
            .map_err(Into::into)
    }

    /// List all patients in insertion order.
    pub fn list_patients(&self) -> DbResult<Vec<Patient>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {PATIENT_COLUMNS} FROM patients ORDER BY id"))?;

        let rows = stmt.query_map([], map_patient)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Update name, identifier, and birth date of an existing patient.
    ///
    /// When the identifier changes, uniqueness is re-checked against all
    /// other patients and the appointments referencing the old identifier
    /// are rewritten in the same transaction, so no appointment is ever
    /// left pointing at a missing patient.
    pub fn update_patient(
        &mut self,
        current_identifier: &str,
        name: &str,
        new_identifier: &str,
        birth_date: NaiveDate,
    ) -> DbResult<Patient> {
        let tx = self.conn.transaction()?;

        let target: Option<i64> = tx
            .query_row(
                "SELECT id FROM patients WHERE identifier = ?",
                [current_identifier],
                |row| row.get(0),
            )
            .optional()?;
        if target.is_none() {
            return Err(DbError::NotFound(current_identifier.to_string()));
        }

        let renaming = new_identifier != current_identifier;
        if renaming {
            let clash: Option<i64> = tx
                .query_row(
                    "SELECT id FROM patients WHERE identifier = ?",
                    [new_identifier],
                    |row| row.get(0),
                )
                .optional()?;
            if clash.is_some() {
                return Err(DbError::DuplicateIdentifier(new_identifier.to_string()));
            }
            // FK checks must wait until both sides of the rename are updated
            tx.pragma_update(None, "defer_foreign_keys", true)?;
        }

        tx.execute(
            r#"
            UPDATE patients SET
                name = ?2,
                identifier = ?3,
                birth_date = ?4,
                updated_at = datetime('now')
            WHERE identifier = ?1
            "#,
            params![current_identifier, name, new_identifier, birth_date],
        )
        .map_err(|e| {
            if is_unique_violation(&e) {
                DbError::DuplicateIdentifier(new_identifier.to_string())
            } else {
                e.into()
            }
        })?;

        if renaming {
            let moved = tx.execute(
                "UPDATE appointments SET patient_identifier = ?2 WHERE patient_identifier = ?1",
                [current_identifier, new_identifier],
            )?;
            debug!(moved, "carried appointments over to renamed identifier");
        }

        let updated = tx.query_row(
            &format!("SELECT {PATIENT_COLUMNS} FROM patients WHERE identifier = ?"),
            [new_identifier],
            map_patient,
        )?;

        tx.commit()?;
        Ok(updated)
    }

    /// Delete a patient and every appointment referencing it, atomically.
    ///
    /// Returns how many appointments the cascade removed.
    pub fn delete_patient(&mut self, identifier: &str) -> DbResult<usize> {
        let tx = self.conn.transaction()?;

        let target: Option<i64> = tx
            .query_row(
                "SELECT id FROM patients WHERE identifier = ?",
                [identifier],
                |row| row.get(0),
            )
            .optional()?;
        if target.is_none() {
            return Err(DbError::NotFound(identifier.to_string()));
        }

        // Children first, then the parent, in one unit
        let cascade = tx.execute(
            "DELETE FROM appointments WHERE patient_identifier = ?",
            [identifier],
        )?;
        tx.execute("DELETE FROM patients WHERE identifier = ?", [identifier])?;

        tx.commit()?;
        debug!(identifier, cascade, "deleted patient");
        Ok(cascade)
    }
}
