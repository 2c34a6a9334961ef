//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented routes into a single OpenAPI document,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "PNR Registry API",
        version = "0.1.0",
        description = "Validation, age and gender derivation, registry membership, and aggregate statistics for 11-digit personal numbers.",
        license(name = "AGPL-3.0-or-later")
    ),
    paths(
        crate::routes::pnums::list_all,
        crate::routes::pnums::list_by_groups,
        crate::routes::pnums::get_age,
        crate::routes::pnums::get_gender,
        crate::routes::pnums::get_validity,
        crate::routes::pnums::get_registration,
    ),
    components(schemas(
        crate::routes::pnums::ListAllResponse,
        crate::routes::pnums::AgeResponse,
        crate::routes::pnums::GenderResponse,
        crate::routes::pnums::ValidityResponse,
        crate::routes::pnums::RegistrationResponse,
        crate::error::InvalidPnumBody,
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        crate::middleware::metrics::MetricsSnapshot,
    )),
    tags(
        (name = "pnums", description = "Personal number validation and registry statistics"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json — Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
