//! `db` crate — pure persistence layer.
//!
//! Provides a SQLite connection factory, the hospital schema, sample-data
//! seeding, typed row structs, and repository functions for every table
//! (patients, departments, doctors, appointments). No business logic lives here.

pub mod database;
pub mod error;
pub mod models;
pub mod repository;
pub mod schema;
pub mod seed;

pub use database::Database;
pub use error::DbError;
pub use schema::init_schema;
pub use seed::{seed_sample_data, SeedReport};
