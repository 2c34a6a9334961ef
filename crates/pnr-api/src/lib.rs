//! # pnr-api — Axum API Service for the PNR Registry
//!
//! HTTP surface over `pnr-core`. Every route that needs the registry reads
//! the file fresh for that request.
//!
//! ## API Surface
//!
//! | Route                            | Module                 |
//! |----------------------------------|------------------------|
//! | `/pnums/listall`                 | [`routes::pnums`]      |
//! | `/pnums/listbygroups`            | [`routes::pnums`]      |
//! | `/pnums/age/{pnum}`              | [`routes::pnums`]      |
//! | `/pnums/gender/{pnum}`           | [`routes::pnums`]      |
//! | `/pnums/isvalid/{pnum}`          | [`routes::pnums`]      |
//! | `/pnums/isregistered/{pnum}`     | [`routes::pnums`]      |
//! | `/openapi.json`                  | [`openapi`]            |
//! | `/health/*`, `/metrics`          | this module            |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → MetricsMiddleware → Handler
//! ```
//!
//! Unknown routes, including a pnum route with its path segment missing,
//! return 404.

pub mod cli;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::middleware::from_fn;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};

use crate::middleware::metrics::{ApiMetrics, MetricsSnapshot};

pub use error::AppError;
pub use state::{AppConfig, AppState};

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let metrics = ApiMetrics::new();

    let api = Router::new()
        .merge(routes::pnums::router())
        .merge(openapi::router())
        .fallback(not_found)
        .layer(from_fn(middleware::metrics::metrics_middleware))
        .layer(middleware::tracing_layer::layer())
        .layer(Extension(metrics.clone()))
        .with_state(state.clone());

    // Probes and metrics sit outside the counted stack.
    let ops = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness))
        .route("/metrics", get(metrics_snapshot))
        .layer(Extension(metrics))
        .with_state(state);

    Router::new().merge(ops).merge(api)
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("no route for {}", uri.path()))
}

/// Liveness probe — always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe — 200 when the registry file is readable, 503 otherwise.
async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    if state.dataset_available().await {
        (StatusCode::OK, "ready")
    } else {
        tracing::warn!(
            path = %state.config.dataset_path.display(),
            "readiness check failed: dataset unavailable"
        );
        (StatusCode::SERVICE_UNAVAILABLE, "dataset unavailable")
    }
}

/// GET /metrics — Request and error counters.
async fn metrics_snapshot(Extension(metrics): Extension<ApiMetrics>) -> Json<MetricsSnapshot> {
    Json(metrics.snapshot())
}
