use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use serde_json::{Value, json};
use utoipa::ToSchema;

use crate::infrastructure::AppState;
use crate::infrastructure::auth::Operator;
use crate::services::match_service::{self, DonorMatchView, SchoolMatchView};
use crate::services::ServiceError;

#[derive(Debug, Deserialize, ToSchema)]
pub struct StatusUpdate {
    /// One of `Pending`, `InTransit`, `Delivered`, `Cancelled`
    pub status: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/matches",
    responses(
        (status = 200, description = "All matches, oldest first", body = [crate::models::Match])
    )
)]
pub async fn list_matches(State(state): State<AppState>) -> Result<Json<Value>, ServiceError> {
    let matches = match_service::list_matches(&state).await?;
    Ok(Json(json!({
        "matches": matches,
        "total": matches.len()
    })))
}

#[utoipa::path(
    get,
    path = "/api/schools/{id}/matches",
    params(("id" = i32, Path, description = "School user ID")),
    responses(
        (status = 200, description = "Matches for the school's requests", body = [SchoolMatchView]),
        (status = 404, description = "School not found")
    )
)]
pub async fn school_matches(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<SchoolMatchView>>, ServiceError> {
    Ok(Json(match_service::matches_for_school(&state, id).await?))
}

#[utoipa::path(
    get,
    path = "/api/donors/{id}/matches",
    params(("id" = i32, Path, description = "Donor user ID")),
    responses(
        (status = 200, description = "Matches for the donor's donations", body = [DonorMatchView]),
        (status = 404, description = "Donor not found")
    )
)]
pub async fn donor_matches(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<DonorMatchView>>, ServiceError> {
    Ok(Json(match_service::matches_for_donor(&state, id).await?))
}

#[utoipa::path(
    put,
    path = "/api/matches/{id}/status",
    params(("id" = i32, Path, description = "Match ID")),
    request_body = StatusUpdate,
    responses(
        (status = 200, description = "Status updated"),
        (status = 400, description = "Missing or invalid status"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Match not found")
    )
)]
pub async fn update_match_status(
    Operator(claims): Operator,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<StatusUpdate>,
) -> Result<Json<Value>, ServiceError> {
    let status = payload
        .status
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ServiceError::Validation("Status is required".to_string()))?;

    tracing::debug!("{} sets match {} to {}", claims.sub, id, status);
    let change = match_service::set_match_status(&state, id, &status).await?;

    Ok(Json(json!({
        "message": "Match status updated",
        "match_id": change.record.id,
        "status": change.record.status,
        "previous_status": change.previous_status
    })))
}
