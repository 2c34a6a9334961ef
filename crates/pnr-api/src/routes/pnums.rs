//! # Pnum Routes
//!
//! Validation, derivation, membership, and aggregate statistics over the
//! registry file. All numeric values are returned as strings and every
//! `pnum` field echoes the trimmed path segment.
//!
//! | Route                        | Handler                 |
//! |------------------------------|-------------------------|
//! | `GET /pnums/listall`         | [`list_all`]            |
//! | `GET /pnums/listbygroups`    | [`list_by_groups`]      |
//! | `GET /pnums/age/{pnum}`      | [`get_age`]             |
//! | `GET /pnums/gender/{pnum}`   | [`get_gender`]          |
//! | `GET /pnums/isvalid/{pnum}`  | [`get_validity`]        |
//! | `GET /pnums/isregistered/{pnum}` | [`get_registration`] |
//!
//! Handlers delegate to `pnr-core`; no business logic lives here.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use pnr_core::{GroupTally, PnumCounts};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use utoipa::ToSchema;

use crate::error::AppError;
use crate::extractors::PnumPath;
use crate::state::AppState;

/// Counts over the whole registry.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ListAllResponse {
    #[serde(rename = "total pnums")]
    pub total_pnums: String,
    #[serde(rename = "valid pnums")]
    pub valid_pnums: String,
    #[serde(rename = "invalid pnums")]
    pub invalid_pnums: String,
    pub male: String,
    pub female: String,
}

impl From<PnumCounts> for ListAllResponse {
    fn from(counts: PnumCounts) -> Self {
        Self {
            total_pnums: counts.total.to_string(),
            valid_pnums: counts.valid.to_string(),
            invalid_pnums: counts.invalid.to_string(),
            male: counts.male.to_string(),
            female: counts.female.to_string(),
        }
    }
}

/// `('<label>', '<gender>')` → stringified count, in discovery order.
#[derive(Debug, Default)]
pub struct GroupedCounts(Vec<(String, String)>);

impl From<&GroupTally> for GroupedCounts {
    fn from(tally: &GroupTally) -> Self {
        Self(
            tally
                .iter()
                .map(|(key, count)| (key.to_string(), count.to_string()))
                .collect(),
        )
    }
}

impl Serialize for GroupedCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, count) in &self.0 {
            map.serialize_entry(key, count)?;
        }
        map.end()
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AgeResponse {
    pub pnum: String,
    pub age: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GenderResponse {
    pub pnum: String,
    pub gender: String,
}

/// Validity verdict. `reason` is present only when invalid.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ValidityResponse {
    pub pnum: String,
    #[serde(rename = "is valid pnum")]
    pub is_valid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegistrationResponse {
    pub pnum: String,
    #[serde(rename = "is in dataset")]
    pub in_dataset: String,
    #[serde(rename = "is valid pnum")]
    pub is_valid: String,
}

fn yes_no(flag: bool) -> String {
    let answer = if flag { "yes" } else { "no" };
    answer.to_string()
}

/// Build the pnum router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pnums/listall", get(list_all))
        .route("/pnums/listbygroups", get(list_by_groups))
        .route("/pnums/age/{pnum}", get(get_age))
        .route("/pnums/gender/{pnum}", get(get_gender))
        .route("/pnums/isvalid/{pnum}", get(get_validity))
        .route("/pnums/isregistered/{pnum}", get(get_registration))
}

/// GET /pnums/listall — Count total, valid, invalid, male and female pnums.
#[utoipa::path(
    get,
    path = "/pnums/listall",
    responses(
        (status = 200, description = "Registry counts", body = ListAllResponse),
        (status = 500, description = "Registry unreadable", body = crate::error::ErrorBody),
    ),
    tag = "pnums"
)]
pub async fn list_all(State(state): State<AppState>) -> Result<Json<ListAllResponse>, AppError> {
    let dataset = state.load_dataset().await?;
    let counts = pnr_core::count_all(&dataset);
    tracing::debug!(total = counts.total, valid = counts.valid, "counted registry");
    Ok(Json(counts.into()))
}

/// GET /pnums/listbygroups — Tally valid pnums by age group and gender.
#[utoipa::path(
    get,
    path = "/pnums/listbygroups",
    responses(
        (status = 200, description = "Counts keyed by ('age group', 'gender')", body = std::collections::HashMap<String, String>),
        (status = 500, description = "Registry unreadable", body = crate::error::ErrorBody),
    ),
    tag = "pnums"
)]
pub async fn list_by_groups(
    State(state): State<AppState>,
) -> Result<Json<GroupedCounts>, AppError> {
    let dataset = state.load_dataset().await?;
    let tally = pnr_core::group_by_age_and_gender(&dataset, state.today());
    Ok(Json(GroupedCounts::from(&tally)))
}

/// GET /pnums/age/{pnum} — Age of a valid pnum holder.
#[utoipa::path(
    get,
    path = "/pnums/age/{pnum}",
    params(("pnum" = String, Path, description = "Candidate personal number")),
    responses(
        (status = 200, description = "Derived age", body = AgeResponse),
        (status = 400, description = "Invalid pnum", body = crate::error::InvalidPnumBody),
    ),
    tag = "pnums"
)]
pub async fn get_age(
    State(state): State<AppState>,
    path: PnumPath,
) -> Result<Json<AgeResponse>, AppError> {
    let pnum = path.parse()?;
    let age = pnr_core::age(&pnum, state.today());
    Ok(Json(AgeResponse {
        pnum: pnum.to_string(),
        age: age.to_string(),
    }))
}

/// GET /pnums/gender/{pnum} — Gender of a valid pnum holder.
#[utoipa::path(
    get,
    path = "/pnums/gender/{pnum}",
    params(("pnum" = String, Path, description = "Candidate personal number")),
    responses(
        (status = 200, description = "Derived gender", body = GenderResponse),
        (status = 400, description = "Invalid pnum", body = crate::error::InvalidPnumBody),
    ),
    tag = "pnums"
)]
pub async fn get_gender(path: PnumPath) -> Result<Json<GenderResponse>, AppError> {
    let pnum = path.parse()?;
    Ok(Json(GenderResponse {
        gender: pnr_core::gender(&pnum).to_string(),
        pnum: pnum.to_string(),
    }))
}

/// GET /pnums/isvalid/{pnum} — Validity verdict with reason.
#[utoipa::path(
    get,
    path = "/pnums/isvalid/{pnum}",
    params(("pnum" = String, Path, description = "Candidate personal number")),
    responses(
        (status = 200, description = "Validity verdict", body = ValidityResponse),
    ),
    tag = "pnums"
)]
pub async fn get_validity(path: PnumPath) -> Json<ValidityResponse> {
    let verdict = path.parse();
    Json(ValidityResponse {
        pnum: path.0,
        is_valid: yes_no(verdict.is_ok()),
        reason: verdict.err().map(|e| e.reason()),
    })
}

/// GET /pnums/isregistered/{pnum} — Registry membership and validity.
#[utoipa::path(
    get,
    path = "/pnums/isregistered/{pnum}",
    params(("pnum" = String, Path, description = "Candidate personal number")),
    responses(
        (status = 200, description = "Membership verdict", body = RegistrationResponse),
        (status = 500, description = "Registry unreadable", body = crate::error::ErrorBody),
    ),
    tag = "pnums"
)]
pub async fn get_registration(
    State(state): State<AppState>,
    path: PnumPath,
) -> Result<Json<RegistrationResponse>, AppError> {
    let dataset = state.load_dataset().await?;
    let registered = pnr_core::is_registered(path.as_str(), &dataset);
    Ok(Json(RegistrationResponse {
        is_valid: yes_no(path.parse().is_ok()),
        in_dataset: yes_no(registered),
        pnum: path.0,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pnr_core::Dataset;

    #[test]
    fn list_all_stringifies_counts() {
        let counts = PnumCounts {
            total: 6,
            valid: 4,
            invalid: 2,
            male: 2,
            female: 2,
        };
        let json = serde_json::to_value(ListAllResponse::from(counts)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "total pnums": "6",
                "valid pnums": "4",
                "invalid pnums": "2",
                "male": "2",
                "female": "2"
            })
        );
    }

    #[test]
    fn grouped_counts_keep_discovery_order() {
        let ds = Dataset::from_rows(["10107045478", "24129745378"]);
        let today = NaiveDate::from_ymd_opt(2023, 6, 15).unwrap();
        let tally = pnr_core::group_by_age_and_gender(&ds, today);
        let json = serde_json::to_string(&GroupedCounts::from(&tally)).unwrap();
        assert_eq!(
            json,
            r#"{"('50 - 59 years', 'female')":"1","('20 - 29 years', 'male')":"1"}"#
        );
    }

    #[test]
    fn validity_omits_reason_when_valid() {
        let json = serde_json::to_value(ValidityResponse {
            pnum: "24129745378".into(),
            is_valid: yes_no(true),
            reason: None,
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"pnum": "24129745378", "is valid pnum": "yes"})
        );
    }
}
