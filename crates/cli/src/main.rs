//! `hospital-admin` CLI entry-point.
//!
//! Available sub-commands:
//! - `init`  — create the tables, optionally seeding sample data.
//! - `seed`  — append a batch of sample data.
//! - `serve` — apply the schema and start the API server.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use db::Database;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "hospital-admin",
    about = "Administrative back end for a small hospital records store",
    version
)]
struct Cli {
    /// Path to the SQLite database file.
    #[arg(long, global = true, env = "HOSPITAL_DB", default_value = "hospital.db")]
    database: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create any missing tables.
    Init {
        /// Also insert sample departments, doctors, patients and appointments.
        #[arg(long)]
        seed: bool,
    },
    /// Append sample data (departments are never duplicated).
    Seed,
    /// Start the REST API server.
    Serve {
        #[arg(long, default_value = "0.0.0.0:8080")]
        bind: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let db = Database::open(&cli.database);

    match cli.command {
        Command::Init { seed } => {
            db::init_schema(&db).await.context("failed to apply schema")?;
            if seed {
                seed_store(&db).await?;
            }
            info!("Database ready at {}", db.path().display());
        }
        Command::Seed => {
            seed_store(&db).await?;
        }
        Command::Serve { bind } => {
            db::init_schema(&db).await.context("failed to apply schema")?;
            info!("Starting API server on {bind}");
            api::serve(&bind, db).await.context("API server failed")?;
        }
    }

    Ok(())
}

async fn seed_store(db: &Database) -> anyhow::Result<()> {
    let report = db::seed_sample_data(db)
        .await
        .context("failed to seed sample data")?;
    println!(
        "Seeded {} departments, {} doctors, {} patients, {} appointments",
        report.departments, report.doctors, report.patients, report.appointments
    );
    Ok(())
}
