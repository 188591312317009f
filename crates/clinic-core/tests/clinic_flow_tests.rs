//! End-to-end front-desk flows.
//!
//! These tests drive the services the way the presentation layer does:
//! raw text fields in, tagged outcomes back.

use clinic_core::{AppointmentService, Database, PatientService, ServiceError};

fn setup_db() -> Database {
    Database::open_in_memory().unwrap()
}

#[test]
fn registered_patients_are_exactly_what_list_returns() {
    let mut db = setup_db();

    let entries = [
        ("Ana", "V123", "1990-05-20"),
        ("Bob", "V456", "1985-01-01"),
        ("Carla", "V789", "2001-12-31"),
    ];
    for (name, identifier, birth_date) in entries {
        PatientService::new(&mut db)
            .register(name, identifier, birth_date)
            .unwrap();
    }

    let listed = PatientService::new(&mut db).list().unwrap();
    assert_eq!(listed.len(), entries.len());
    for ((name, identifier, birth_date), patient) in entries.iter().zip(&listed) {
        assert_eq!(&patient.name, name);
        assert_eq!(&patient.identifier, identifier);
        assert_eq!(patient.birth_date.to_string(), *birth_date);
    }
}

#[test]
fn duplicate_identifier_leaves_store_unchanged() {
    let mut db = setup_db();

    PatientService::new(&mut db)
        .register("Ana", "V123", "1990-05-20")
        .unwrap();
    let err = PatientService::new(&mut db)
        .register("Bob", "V123", "1985-01-01")
        .unwrap_err();
    assert!(matches!(err, ServiceError::DuplicateIdentifier { identifier } if identifier == "V123"));

    let listed = PatientService::new(&mut db).list().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "Ana");
}

#[test]
fn deleting_a_patient_removes_only_its_appointments() {
    let mut db = setup_db();

    PatientService::new(&mut db)
        .register("Ana", "V1", "1990-05-20")
        .unwrap();
    PatientService::new(&mut db)
        .register("Bob", "V2", "1985-01-01")
        .unwrap();

    AppointmentService::new(&mut db)
        .schedule("V1", "2024-01-10T09:00", "Checkup")
        .unwrap();
    AppointmentService::new(&mut db)
        .schedule("V1", "2024-01-11T09:00", "Follow-up")
        .unwrap();
    AppointmentService::new(&mut db)
        .schedule("V2", "2024-01-12T09:00", "Vaccine")
        .unwrap();

    let cascade = PatientService::new(&mut db).remove("V1").unwrap();
    assert_eq!(cascade, 2);

    let remaining = AppointmentService::new(&mut db).list_recent().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].patient_identifier, "V2");
}

#[test]
fn scheduling_for_unknown_patient_creates_no_row() {
    let mut db = setup_db();

    let err = AppointmentService::new(&mut db)
        .schedule("V999", "2024-01-10T09:00", "Checkup")
        .unwrap_err();
    assert!(matches!(err, ServiceError::PatientNotFound { identifier } if identifier == "V999"));
    assert!(AppointmentService::new(&mut db)
        .list_recent()
        .unwrap()
        .is_empty());
}

#[test]
fn identifier_change_to_taken_value_performs_no_update() {
    let mut db = setup_db();

    PatientService::new(&mut db)
        .register("Ana", "V1", "1990-05-20")
        .unwrap();
    PatientService::new(&mut db)
        .register("Bob", "V2", "1985-01-01")
        .unwrap();

    let err = PatientService::new(&mut db)
        .modify("V2", "Robert", "V1", "1985-01-01")
        .unwrap_err();
    assert!(matches!(err, ServiceError::DuplicateIdentifier { identifier } if identifier == "V1"));

    let bob = PatientService::new(&mut db).get("V2").unwrap();
    assert_eq!(bob.name, "Bob");
}

#[test]
fn identifier_rename_carries_appointments_along() {
    let mut db = setup_db();

    PatientService::new(&mut db)
        .register("Ana", "V1", "1990-05-20")
        .unwrap();
    AppointmentService::new(&mut db)
        .schedule("V1", "2024-01-10T09:00", "Checkup")
        .unwrap();

    PatientService::new(&mut db)
        .modify("V1", "Ana", "V9", "1990-05-20")
        .unwrap();

    let appointments = AppointmentService::new(&mut db).list_recent().unwrap();
    assert_eq!(appointments.len(), 1);
    assert_eq!(appointments[0].patient_identifier, "V9");
}

#[test]
fn birth_date_round_trips_exactly() {
    let mut db = setup_db();

    PatientService::new(&mut db)
        .register("Ana", "V123", "1990-05-20")
        .unwrap();

    let patient = PatientService::new(&mut db).get("V123").unwrap();
    assert_eq!(patient.birth_date.to_string(), "1990-05-20");
}

#[test]
fn parse_errors_keep_the_raw_input_for_redisplay() {
    let mut db = setup_db();

    let err = PatientService::new(&mut db)
        .register("Ana", "V123", "May 20, 1990")
        .unwrap_err();
    assert!(matches!(&err, ServiceError::InvalidDateFormat { input } if input == "May 20, 1990"));

    PatientService::new(&mut db)
        .register("Ana", "V123", "1990-05-20")
        .unwrap();
    let err = AppointmentService::new(&mut db)
        .schedule("V123", "2024-01-10 09:00", "Checkup")
        .unwrap_err();
    assert!(
        matches!(&err, ServiceError::InvalidDateTimeFormat { input } if input == "2024-01-10 09:00")
    );
}

// The walk-through from the front desk: register, schedule, collide, delete.
#[test]
fn front_desk_scenario() {
    let mut db = setup_db();

    let ana = PatientService::new(&mut db)
        .register("Ana", "V123", "1990-05-20")
        .unwrap();
    assert_eq!(ana.identifier, "V123");

    let outcome = AppointmentService::new(&mut db)
        .schedule("V123", "2024-01-10T09:00", "Checkup")
        .unwrap();
    assert_eq!(outcome.trimmed, 0);

    let err = PatientService::new(&mut db)
        .register("Bob", "V123", "1985-01-01")
        .unwrap_err();
    assert!(matches!(err, ServiceError::DuplicateIdentifier { .. }));

    PatientService::new(&mut db).remove("V123").unwrap();
    let remaining = AppointmentService::new(&mut db).list_recent().unwrap();
    assert!(remaining
        .iter()
        .all(|a| a.patient_identifier != "V123"));
    assert!(remaining.is_empty());
}

#[test]
fn file_backed_database_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clinic.db");

    {
        let mut db = Database::open(&path).unwrap();
        PatientService::new(&mut db)
            .register("Ana", "V123", "1990-05-20")
            .unwrap();
        AppointmentService::new(&mut db)
            .schedule("V123", "2024-01-10T09:00", "Checkup")
            .unwrap();
        db.close().unwrap();
    }

    let mut db = Database::open(&path).unwrap();
    let patient = PatientService::new(&mut db).get("V123").unwrap();
    assert_eq!(patient.name, "Ana");
    assert_eq!(patient.birth_date.to_string(), "1990-05-20");

    let appointments = AppointmentService::new(&mut db).list_recent().unwrap();
    assert_eq!(appointments.len(), 1);
    assert_eq!(appointments[0].reason, "Checkup");
}
