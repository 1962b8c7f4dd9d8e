//! Randomised sample data for a fresh store.
//!
//! Departments come from a fixed list and are inserted with
//! insert-or-ignore, so re-seeding never duplicates them. Doctors,
//! patients and appointments are appended on every run.

use chrono::{Duration, NaiveDate, NaiveDateTime, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use sqlx::Connection;
use tracing::info;

use crate::repository::iso_text;
use crate::{Database, DbError};

pub const DEPARTMENTS: [&str; 5] = [
    "Cardiology",
    "Neurology",
    "Pediatrics",
    "Oncology",
    "Emergency",
];

const DOCTOR_COUNT: usize = 10;
const PATIENT_COUNT: usize = 20;
const APPOINTMENT_COUNT: usize = 30;

const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "Robert", "Patricia", "John", "Jennifer", "Michael", "Linda", "David",
    "Elizabeth", "William", "Barbara", "Richard", "Susan", "Joseph", "Jessica", "Thomas", "Sarah",
    "Charles", "Karen", "Daniel", "Nancy", "Matthew", "Lisa", "Anthony", "Betty",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson", "White", "Harris", "Clark",
];

const MAIL_DOMAINS: &[&str] = &["example.com", "example.org", "example.net"];

const WORDS: &[&str] = &[
    "follow", "up", "routine", "checkup", "persistent", "cough", "chest", "pain", "review",
    "results", "blood", "pressure", "headache", "annual", "physical", "consultation", "referral",
    "therapy", "session", "fever", "dizziness", "medication", "renewal", "scan",
];

/// Row counts written by one [`seed_sample_data`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub departments: u64,
    pub doctors: u64,
    pub patients: u64,
    pub appointments: u64,
}

/// Populate the store with sample rows using an OS-seeded generator.
pub async fn seed_sample_data(db: &Database) -> Result<SeedReport, DbError> {
    let mut rng = StdRng::from_entropy();
    seed_with_rng(db, &mut rng).await
}

/// Populate the store with sample rows drawn from `rng`.
///
/// Runs on a single connection inside one transaction: either every
/// sample row is written or none is.
pub async fn seed_with_rng(db: &Database, rng: &mut StdRng) -> Result<SeedReport, DbError> {
    let mut conn = db.connect().await?;
    let mut tx = conn.begin().await?;
    let mut report = SeedReport::default();

    for name in DEPARTMENTS {
        report.departments += sqlx::query("INSERT OR IGNORE INTO departments (name) VALUES (?)")
            .bind(name)
            .execute(&mut *tx)
            .await?
            .rows_affected();
    }

    let department_ids: Vec<i64> = sqlx::query_scalar("SELECT id FROM departments")
        .fetch_all(&mut *tx)
        .await?;

    for _ in 0..DOCTOR_COUNT {
        let (first, last) = person_name(rng);
        let email = email_for(rng, first, last);
        let department_id = department_ids.choose(rng).copied();
        sqlx::query(
            "INSERT INTO doctors (first_name, last_name, department_id, email) VALUES (?, ?, ?, ?)",
        )
        .bind(first)
        .bind(last)
        .bind(department_id)
        .bind(email)
        .execute(&mut *tx)
        .await?;
        report.doctors += 1;
    }

    let today = Utc::now().date_naive();
    for _ in 0..PATIENT_COUNT {
        let (first, last) = person_name(rng);
        let email = email_for(rng, first, last);
        let dob = date_of_birth(rng, today);
        let gender = if rng.gen_bool(0.5) { "Male" } else { "Female" };
        let phone = phone_number(rng);
        sqlx::query(
            r#"
            INSERT INTO patients (first_name, last_name, dob, gender, phone, email)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(first)
        .bind(last)
        .bind(dob)
        .bind(gender)
        .bind(phone)
        .bind(email)
        .execute(&mut *tx)
        .await?;
        report.patients += 1;
    }

    let patient_ids: Vec<i64> = sqlx::query_scalar("SELECT id FROM patients")
        .fetch_all(&mut *tx)
        .await?;
    let doctor_ids: Vec<i64> = sqlx::query_scalar("SELECT id FROM doctors")
        .fetch_all(&mut *tx)
        .await?;

    let now = Utc::now().naive_utc();
    for _ in 0..APPOINTMENT_COUNT {
        let Some(&patient_id) = patient_ids.choose(rng) else {
            break;
        };
        let (start, end) = appointment_window(rng, now);
        sqlx::query(
            r#"
            INSERT INTO appointments
                (patient_id, doctor_id, department_id, start_time, end_time, reason)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(patient_id)
        .bind(doctor_ids.choose(rng).copied())
        .bind(department_ids.choose(rng).copied())
        .bind(iso_text(&start))
        .bind(iso_text(&end))
        .bind(sentence(rng, 6))
        .execute(&mut *tx)
        .await?;
        report.appointments += 1;
    }

    tx.commit().await?;
    conn.close().await?;

    info!(
        departments = report.departments,
        doctors = report.doctors,
        patients = report.patients,
        appointments = report.appointments,
        "Sample data seeded"
    );
    Ok(report)
}

fn person_name(rng: &mut StdRng) -> (&'static str, &'static str) {
    let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Alex");
    let last = LAST_NAMES.choose(rng).copied().unwrap_or("Doe");
    (first, last)
}

fn email_for(rng: &mut StdRng, first: &str, last: &str) -> String {
    let domain = MAIL_DOMAINS.choose(rng).copied().unwrap_or("example.com");
    format!(
        "{}.{}{}@{domain}",
        first.to_lowercase(),
        last.to_lowercase(),
        rng.gen_range(1..100)
    )
}

fn phone_number(rng: &mut StdRng) -> String {
    format!(
        "({:03}) {:03}-{:04}",
        rng.gen_range(200..1000),
        rng.gen_range(200..1000),
        rng.gen_range(0..10_000)
    )
}

/// A birth date between today and 90 years ago.
fn date_of_birth(rng: &mut StdRng, today: NaiveDate) -> NaiveDate {
    today - Duration::days(rng.gen_range(0..=90 * 365))
}

/// A start within the last 30 days and an end between the start and now.
fn appointment_window(rng: &mut StdRng, now: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
    let start = now - Duration::seconds(rng.gen_range(0..=30 * 24 * 3600));
    let span = (now - start).num_seconds();
    let end = start + Duration::seconds(rng.gen_range(0..=span));
    (start, end)
}

fn sentence(rng: &mut StdRng, words: usize) -> String {
    let mut text = (0..words)
        .filter_map(|_| WORDS.choose(rng).copied())
        .collect::<Vec<_>>()
        .join(" ");
    if let Some(first) = text.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    text.push('.');
    text
}
