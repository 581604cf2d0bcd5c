use axum::{Json, extract::State};
use serde::Serialize;
use utoipa::ToSchema;

use crate::infrastructure::AppState;
use crate::infrastructure::auth::Operator;
use crate::services::matching_service::{self, CreatedMatch};
use crate::services::ServiceError;

#[derive(Debug, Serialize, ToSchema)]
pub struct MatchingRunResponse {
    /// `matched`, `nothing_to_match` or `no_compatible_matches`
    pub outcome: String,
    pub message: String,
    pub matches_created: usize,
    pub matches: Vec<CreatedMatch>,
}

#[utoipa::path(
    post,
    path = "/api/matching/run",
    responses(
        (status = 200, description = "Run finished", body = MatchingRunResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Operator role required"),
        (status = 409, description = "A listing lost capacity, nothing was saved")
    )
)]
pub async fn run_matching(
    Operator(claims): Operator,
    State(state): State<AppState>,
) -> Result<Json<MatchingRunResponse>, ServiceError> {
    tracing::info!("Matching run requested by {}", claims.sub);

    let outcome = matching_service::run_matching(&state).await?;
    let matches = outcome.created().to_vec();

    Ok(Json(MatchingRunResponse {
        outcome: outcome.label().to_string(),
        message: outcome.message(),
        matches_created: matches.len(),
        matches,
    }))
}
