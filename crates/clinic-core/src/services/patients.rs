//! Patient lifecycle service.

use tracing::info;

use super::{parse_birth_date, ServiceError, ServiceResult};
use crate::db::Database;
use crate::models::Patient;

/// Validates and orchestrates patient registration, modification, and
/// removal.
pub struct PatientService<'a> {
    db: &'a mut Database,
}

impl<'a> PatientService<'a> {
    /// Create a new patient service over an open database.
    pub fn new(db: &'a mut Database) -> Self {
        Self { db }
    }

    /// Register a new patient.
    ///
    /// The duplicate pre-check makes the common case a tagged error before
    /// the store is touched; the store's UNIQUE constraint closes the race
    /// window and maps to the same error.
    pub fn register(
        &mut self,
        name: &str,
        identifier: &str,
        birth_date_text: &str,
    ) -> ServiceResult<Patient> {
        let birth_date = parse_birth_date(birth_date_text)?;

        if self.db.get_patient_by_identifier(identifier)?.is_some() {
            return Err(ServiceError::DuplicateIdentifier {
                identifier: identifier.to_string(),
            });
        }

        let patient = self.db.insert_patient(name, identifier, birth_date)?;
        info!(identifier, "registered patient");
        Ok(patient)
    }

    /// Update name, identifier, and birth date of an existing patient.
    pub fn modify(
        &mut self,
        current_identifier: &str,
        name: &str,
        new_identifier: &str,
        birth_date_text: &str,
    ) -> ServiceResult<Patient> {
        let birth_date = parse_birth_date(birth_date_text)?;

        if self
            .db
            .get_patient_by_identifier(current_identifier)?
            .is_none()
        {
            return Err(ServiceError::NotFound {
                identifier: current_identifier.to_string(),
            });
        }
        if new_identifier != current_identifier
            && self.db.get_patient_by_identifier(new_identifier)?.is_some()
        {
            return Err(ServiceError::DuplicateIdentifier {
                identifier: new_identifier.to_string(),
            });
        }

        let patient =
            self.db
                .update_patient(current_identifier, name, new_identifier, birth_date)?;
        info!(identifier = new_identifier, "modified patient");
        Ok(patient)
    }

    /// Delete a patient and every appointment referencing it.
    ///
    /// Returns how many appointments the cascade removed, so the caller can
    /// report it.
    pub fn remove(&mut self, identifier: &str) -> ServiceResult<usize> {
        let cascade = self.db.delete_patient(identifier)?;
        info!(identifier, cascade, "removed patient");
        Ok(cascade)
    }

    /// Look up a single patient by identifier.
    pub fn get(&self, identifier: &str) -> ServiceResult<Patient> {
        self.db
            .get_patient_by_identifier(identifier)?
            .ok_or_else(|| ServiceError::NotFound {
                identifier: identifier.to_string(),
            })
    }

    /// All registered patients, no filtering.
    pub fn list(&self) -> ServiceResult<Vec<Patient>> {
        Ok(self.db.list_patients()?)
    }
}
