//! `api` crate — HTTP JSON API over the hospital repository.
//!
//! Exposes:
//!   GET    /api/v1/health
//!   GET    /api/v1/overview
//!   POST   /api/v1/admin/init
//!   GET    /api/v1/{patients,departments,doctors,appointments}
//!   POST   /api/v1/{patients,departments,doctors,appointments}
//!   GET    /api/v1/{resource}/:id
//!   PUT    /api/v1/{resource}/:id
//!   DELETE /api/v1/{resource}/:id
//!   POST   /api/v1/appointments/schedule

use axum::{routing::get, routing::post, Router};
use db::Database;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

pub mod error;
pub mod extract;
pub mod handlers;

pub use error::ApiError;

use handlers::{appointments, departments, doctors, overview, patients};

/// Shared handler state: the connection factory, not a connection.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

/// Build the full router for the given store.
pub fn router(db: Database) -> Router {
    let api = Router::new()
        .route("/health", get(overview::health))
        .route("/overview", get(overview::overview))
        .route("/admin/init", post(overview::init))
        .route("/patients", get(patients::list).post(patients::create))
        .route(
            "/patients/:id",
            get(patients::get).put(patients::update).delete(patients::delete),
        )
        .route("/departments", get(departments::list).post(departments::create))
        .route(
            "/departments/:id",
            get(departments::get).put(departments::update).delete(departments::delete),
        )
        .route("/doctors", get(doctors::list).post(doctors::create))
        .route(
            "/doctors/:id",
            get(doctors::get).put(doctors::update).delete(doctors::delete),
        )
        .route("/appointments", get(appointments::list).post(appointments::create))
        .route("/appointments/schedule", post(appointments::schedule))
        .route(
            "/appointments/:id",
            get(appointments::get).put(appointments::update).delete(appointments::delete),
        );

    Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(AppState { db })
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(addr: &str, db: Database) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, router(db))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {e}");
        return;
    }
    info!("Shutdown signal received");
}
