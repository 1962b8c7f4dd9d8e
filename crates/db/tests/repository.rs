//! Repository behaviour against a real SQLite file.
//!
//! Every repository call opens its own connection, so each test gets a
//! file-backed database inside a temporary directory rather than an
//! in-memory one.

use chrono::{NaiveDate, NaiveDateTime};
use tempfile::TempDir;

use db::models::{
    AppointmentFields, AppointmentStatus, DoctorFields, NewAppointment, PatientFields,
};
use db::repository::{appointments, departments, doctors, patients};
use db::{init_schema, Database, DbError};

async fn fresh_db() -> (TempDir, Database) {
    let dir = TempDir::new().expect("temp dir");
    let db = Database::open(dir.path().join("hospital.db"));
    init_schema(&db).await.expect("schema");
    (dir, db)
}

fn at(date: (i32, u32, u32), time: (u32, u32)) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(date.0, date.1, date.2)
        .and_then(|d| d.and_hms_opt(time.0, time.1, 0))
        .expect("valid timestamp")
}

fn doctor(first: &str, last: &str, department_id: Option<i64>) -> DoctorFields {
    DoctorFields {
        first_name: first.into(),
        last_name: last.into(),
        department_id,
        email: None,
    }
}

// ============================================================
// Schema
// ============================================================

#[tokio::test]
async fn schema_can_be_applied_twice() {
    let (_dir, db) = fresh_db().await;
    init_schema(&db).await.expect("second init is a no-op");
    assert!(patients::list_patients(&db).await.unwrap().is_empty());
}

// ============================================================
// Patients
// ============================================================

#[tokio::test]
async fn patient_with_only_names_has_empty_optional_fields() {
    let (_dir, db) = fresh_db().await;

    let id = patients::add_patient(&db, &PatientFields::named("Ada", "Lovelace"))
        .await
        .unwrap();
    let patient = patients::get_patient(&db, id).await.unwrap().expect("row exists");

    assert_eq!(patient.id, id);
    assert_eq!(patient.first_name, "Ada");
    assert_eq!(patient.last_name, "Lovelace");
    assert_eq!(patient.dob, None);
    assert_eq!(patient.gender, None);
    assert_eq!(patient.phone, None);
    assert_eq!(patient.email, None);
}

#[tokio::test]
async fn patient_ids_are_fresh_and_increasing() {
    let (_dir, db) = fresh_db().await;

    let first = patients::add_patient(&db, &PatientFields::named("A", "One")).await.unwrap();
    let second = patients::add_patient(&db, &PatientFields::named("B", "Two")).await.unwrap();
    assert!(second > first);

    // A deleted id is never handed out again.
    patients::delete_patient(&db, second).await.unwrap();
    let third = patients::add_patient(&db, &PatientFields::named("C", "Three")).await.unwrap();
    assert!(third > second);
}

#[tokio::test]
async fn patients_are_listed_newest_first() {
    let (_dir, db) = fresh_db().await;

    let older = patients::add_patient(&db, &PatientFields::named("Old", "Timer")).await.unwrap();
    let newer = patients::add_patient(&db, &PatientFields::named("New", "Comer")).await.unwrap();

    let ids: Vec<i64> = patients::list_patients(&db)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, vec![newer, older]);
}

#[tokio::test]
async fn patient_update_replaces_every_field() {
    let (_dir, db) = fresh_db().await;

    let id = patients::add_patient(
        &db,
        &PatientFields {
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            dob: NaiveDate::from_ymd_opt(1906, 12, 9),
            gender: Some("Female".into()),
            phone: Some("555-0100".into()),
            email: Some("grace@example.com".into()),
        },
    )
    .await
    .unwrap();

    patients::update_patient(&db, id, &PatientFields::named("Grace", "Murray"))
        .await
        .unwrap();

    let patient = patients::get_patient(&db, id).await.unwrap().unwrap();
    assert_eq!(patient.last_name, "Murray");
    assert_eq!(patient.dob, None);
    assert_eq!(patient.phone, None);
    assert_eq!(patient.email, None);
}

#[tokio::test]
async fn missing_patient_is_absent_not_an_error() {
    let (_dir, db) = fresh_db().await;

    assert!(patients::get_patient(&db, 999).await.unwrap().is_none());
    assert!(matches!(
        patients::update_patient(&db, 999, &PatientFields::named("No", "One")).await,
        Err(DbError::NotFound)
    ));
    assert!(matches!(patients::delete_patient(&db, 999).await, Err(DbError::NotFound)));
}

// ============================================================
// Departments
// ============================================================

#[tokio::test]
async fn duplicate_department_returns_existing_id() {
    let (_dir, db) = fresh_db().await;

    let first = departments::add_department(&db, "Cardiology").await.unwrap();
    departments::add_department(&db, "Neurology").await.unwrap();
    let again = departments::add_department(&db, "Cardiology").await.unwrap();

    assert_eq!(first, again);
    assert_eq!(departments::list_departments(&db).await.unwrap().len(), 2);
}

#[tokio::test]
async fn checked_insert_reports_whether_a_row_was_created() {
    let (_dir, db) = fresh_db().await;

    let first = departments::add_department_checked(&db, "Oncology").await.unwrap();
    let again = departments::add_department_checked(&db, "Oncology").await.unwrap();

    assert!(first.created);
    assert!(!again.created);
    assert_eq!(first.id, again.id);
}

#[tokio::test]
async fn departments_are_listed_alphabetically() {
    let (_dir, db) = fresh_db().await;

    for name in ["Pediatrics", "Cardiology", "Oncology"] {
        departments::add_department(&db, name).await.unwrap();
    }

    let names: Vec<String> = departments::list_departments(&db)
        .await
        .unwrap()
        .into_iter()
        .map(|d| d.name)
        .collect();
    assert_eq!(names, vec!["Cardiology", "Oncology", "Pediatrics"]);
}

#[tokio::test]
async fn renaming_onto_an_existing_department_is_a_unique_violation() {
    let (_dir, db) = fresh_db().await;

    departments::add_department(&db, "Cardiology").await.unwrap();
    let neuro = departments::add_department(&db, "Neurology").await.unwrap();

    let err = departments::update_department(&db, neuro, "Cardiology").await.unwrap_err();
    assert!(matches!(err, DbError::UniqueViolation(_)), "got {err:?}");

    departments::update_department(&db, neuro, "Neuroscience").await.unwrap();
    let renamed = departments::get_department(&db, neuro).await.unwrap().unwrap();
    assert_eq!(renamed.name, "Neuroscience");
}

#[tokio::test]
async fn deleting_a_department_clears_doctor_references() {
    let (_dir, db) = fresh_db().await;

    let dept = departments::add_department(&db, "Oncology").await.unwrap();
    let doc = doctors::add_doctor(&db, &doctor("Marie", "Curie", Some(dept))).await.unwrap();

    departments::delete_department(&db, dept).await.unwrap();

    let row = doctors::get_doctor(&db, doc).await.unwrap().expect("doctor kept");
    assert_eq!(row.department_id, None);
    assert!(departments::get_department(&db, dept).await.unwrap().is_none());
}

// ============================================================
// Doctors
// ============================================================

#[tokio::test]
async fn doctors_carry_their_department_name() {
    let (_dir, db) = fresh_db().await;

    let cardio = departments::add_department(&db, "Cardiology").await.unwrap();
    let with_dept = doctors::add_doctor(&db, &doctor("Helen", "Taussig", Some(cardio)))
        .await
        .unwrap();
    let without = doctors::add_doctor(&db, &doctor("Joseph", "Lister", None)).await.unwrap();

    let listing = doctors::list_doctors(&db).await.unwrap();
    assert_eq!(listing.len(), 2);

    // Ordered by last name: Lister before Taussig.
    assert_eq!(listing[0].doctor.id, without);
    assert_eq!(listing[0].department_name, None);
    assert_eq!(listing[1].doctor.id, with_dept);
    assert_eq!(listing[1].department_name.as_deref(), Some("Cardiology"));
}

#[tokio::test]
async fn doctor_in_unknown_department_is_rejected() {
    let (_dir, db) = fresh_db().await;

    let err = doctors::add_doctor(&db, &doctor("No", "Where", Some(42))).await.unwrap_err();
    assert!(matches!(err, DbError::MissingReference(_)), "got {err:?}");
}

#[tokio::test]
async fn doctor_update_and_delete() {
    let (_dir, db) = fresh_db().await;

    let id = doctors::add_doctor(&db, &doctor("John", "Snow", None)).await.unwrap();
    let mut fields = doctor("John", "Snow", None);
    fields.email = Some("snow@example.com".into());
    doctors::update_doctor(&db, id, &fields).await.unwrap();

    let row = doctors::get_doctor(&db, id).await.unwrap().unwrap();
    assert_eq!(row.email.as_deref(), Some("snow@example.com"));

    doctors::delete_doctor(&db, id).await.unwrap();
    assert!(doctors::get_doctor(&db, id).await.unwrap().is_none());
    assert!(matches!(doctors::delete_doctor(&db, id).await, Err(DbError::NotFound)));
}

// ============================================================
// Appointments
// ============================================================

#[tokio::test]
async fn end_to_end_booking_resolves_names() {
    let (_dir, db) = fresh_db().await;

    let cardio = departments::add_department(&db, "Cardiology").await.unwrap();
    let doc = doctors::add_doctor(&db, &doctor("Helen", "Taussig", Some(cardio))).await.unwrap();
    let patient = patients::add_patient(&db, &PatientFields::named("Ada", "Lovelace"))
        .await
        .unwrap();

    let start = at((2024, 5, 1), (9, 30));
    let appt = appointments::add_appointment(
        &db,
        &NewAppointment {
            doctor_id: Some(doc),
            department_id: Some(cardio),
            reason: Some("Palpitations".into()),
            ..NewAppointment::new(patient, start)
        },
    )
    .await
    .unwrap();

    let row = appointments::get_appointment(&db, appt).await.unwrap().expect("row exists");
    assert_eq!(row.status, AppointmentStatus::Scheduled);
    assert_eq!(row.start_time, start);
    assert_eq!(row.end_time, None);

    let listing = appointments::list_appointments(&db).await.unwrap();
    assert_eq!(listing.len(), 1);
    let entry = &listing[0];
    assert_eq!(entry.appointment.id, appt);
    assert_eq!(entry.patient_first, "Ada");
    assert_eq!(entry.patient_last, "Lovelace");
    assert_eq!(entry.doctor_first.as_deref(), Some("Helen"));
    assert_eq!(entry.doctor_last.as_deref(), Some("Taussig"));
    assert_eq!(entry.department_name.as_deref(), Some("Cardiology"));
}

#[tokio::test]
async fn doctor_names_present_only_with_a_doctor() {
    let (_dir, db) = fresh_db().await;

    let doc = doctors::add_doctor(&db, &doctor("Paul", "Farmer", None)).await.unwrap();
    let patient = patients::add_patient(&db, &PatientFields::named("Sam", "Lee")).await.unwrap();
    let start = at((2024, 1, 2), (8, 0));

    let walk_in = appointments::add_appointment(&db, &NewAppointment::new(patient, start))
        .await
        .unwrap();
    let booked = appointments::add_appointment(
        &db,
        &NewAppointment {
            doctor_id: Some(doc),
            ..NewAppointment::new(patient, start)
        },
    )
    .await
    .unwrap();

    for entry in appointments::list_appointments(&db).await.unwrap() {
        assert_eq!(entry.patient_first, "Sam");
        assert_eq!(entry.patient_last, "Lee");
        let has_doctor = entry.appointment.doctor_id.is_some();
        assert_eq!(entry.doctor_first.is_some(), has_doctor);
        assert_eq!(entry.doctor_last.is_some(), has_doctor);
        if entry.appointment.id == walk_in {
            assert!(!has_doctor);
        } else {
            assert_eq!(entry.appointment.id, booked);
            assert_eq!(entry.doctor_last.as_deref(), Some("Farmer"));
        }
    }
}

#[tokio::test]
async fn start_time_keeps_fractional_seconds() {
    let (_dir, db) = fresh_db().await;

    let patient = patients::add_patient(&db, &PatientFields::named("Sam", "Lee")).await.unwrap();
    let start = NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_micro_opt(9, 0, 0, 123_456))
        .unwrap();
    let appt = appointments::add_appointment(&db, &NewAppointment::new(patient, start))
        .await
        .unwrap();

    let row = appointments::get_appointment(&db, appt).await.unwrap().expect("row exists");
    assert_eq!(row.start_time, start);
}

#[tokio::test]
async fn appointment_for_unknown_patient_is_rejected() {
    let (_dir, db) = fresh_db().await;

    let err = appointments::add_appointment(&db, &NewAppointment::new(77, at((2024, 1, 1), (9, 0))))
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::MissingReference(_)), "got {err:?}");
}

#[tokio::test]
async fn deleting_a_patient_removes_their_appointments() {
    let (_dir, db) = fresh_db().await;

    let keep = patients::add_patient(&db, &PatientFields::named("Keep", "Me")).await.unwrap();
    let gone = patients::add_patient(&db, &PatientFields::named("Gone", "Soon")).await.unwrap();
    let start = at((2024, 2, 3), (10, 0));
    let kept = appointments::add_appointment(&db, &NewAppointment::new(keep, start)).await.unwrap();
    let dropped = appointments::add_appointment(&db, &NewAppointment::new(gone, start))
        .await
        .unwrap();

    patients::delete_patient(&db, gone).await.unwrap();

    assert!(appointments::get_appointment(&db, dropped).await.unwrap().is_none());
    let ids: Vec<i64> = appointments::list_appointments(&db)
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.appointment.id)
        .collect();
    assert_eq!(ids, vec![kept]);
}

#[tokio::test]
async fn deleting_a_doctor_keeps_appointments_without_doctor() {
    let (_dir, db) = fresh_db().await;

    let doc = doctors::add_doctor(&db, &doctor("Paul", "Farmer", None)).await.unwrap();
    let patient = patients::add_patient(&db, &PatientFields::named("Sam", "Lee")).await.unwrap();
    let appt = appointments::add_appointment(
        &db,
        &NewAppointment {
            doctor_id: Some(doc),
            ..NewAppointment::new(patient, at((2024, 1, 2), (8, 0)))
        },
    )
    .await
    .unwrap();

    doctors::delete_doctor(&db, doc).await.unwrap();

    let listing = appointments::list_appointments(&db).await.unwrap();
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0].appointment.id, appt);
    assert_eq!(listing[0].appointment.doctor_id, None);
    assert_eq!(listing[0].doctor_first, None);
}

#[tokio::test]
async fn appointment_update_replaces_status_and_times() {
    let (_dir, db) = fresh_db().await;

    let patient = patients::add_patient(&db, &PatientFields::named("Sam", "Lee")).await.unwrap();
    let booking = NewAppointment::new(patient, at((2024, 1, 2), (8, 0)));
    let appt = appointments::add_appointment(&db, &booking).await.unwrap();

    let start = at((2024, 1, 3), (9, 0));
    let end = at((2024, 1, 3), (9, 45));
    appointments::update_appointment(
        &db,
        appt,
        &AppointmentFields {
            booking: NewAppointment {
                end_time: Some(end),
                reason: Some("Rescheduled".into()),
                ..NewAppointment::new(patient, start)
            },
            status: AppointmentStatus::Completed,
        },
    )
    .await
    .unwrap();

    let row = appointments::get_appointment(&db, appt).await.unwrap().unwrap();
    assert_eq!(row.start_time, start);
    assert_eq!(row.end_time, Some(end));
    assert_eq!(row.status, AppointmentStatus::Completed);
    assert_eq!(row.reason.as_deref(), Some("Rescheduled"));
}

#[tokio::test]
async fn updating_a_missing_appointment_changes_nothing() {
    let (_dir, db) = fresh_db().await;

    let patient = patients::add_patient(&db, &PatientFields::named("Sam", "Lee")).await.unwrap();
    let start = at((2024, 1, 2), (8, 0));
    let appt = appointments::add_appointment(&db, &NewAppointment::new(patient, start))
        .await
        .unwrap();
    let before = appointments::list_appointments(&db).await.unwrap();

    let result = appointments::update_appointment(
        &db,
        appt + 100,
        &AppointmentFields {
            booking: NewAppointment::new(patient, at((2030, 1, 1), (0, 0))),
            status: AppointmentStatus::Cancelled,
        },
    )
    .await;

    assert!(matches!(result, Err(DbError::NotFound)));
    assert_eq!(appointments::list_appointments(&db).await.unwrap(), before);
}

#[tokio::test]
async fn appointment_delete_is_by_id() {
    let (_dir, db) = fresh_db().await;

    let patient = patients::add_patient(&db, &PatientFields::named("Sam", "Lee")).await.unwrap();
    let booking = NewAppointment::new(patient, at((2024, 1, 2), (8, 0)));
    let appt = appointments::add_appointment(&db, &booking).await.unwrap();

    appointments::delete_appointment(&db, appt).await.unwrap();
    assert!(appointments::get_appointment(&db, appt).await.unwrap().is_none());
    assert!(patients::get_patient(&db, patient).await.unwrap().is_some());
    assert!(matches!(
        appointments::delete_appointment(&db, appt).await,
        Err(DbError::NotFound)
    ));
}
