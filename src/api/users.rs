use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::{Value, json};
use utoipa::IntoParams;

use crate::domain::CreateUserInput;
use crate::infrastructure::AppState;
use crate::services::{ServiceError, user_service};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserQuery {
    /// `donor` or `school`
    pub role: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/users",
    params(UserQuery),
    responses(
        (status = 200, description = "Registered users", body = [crate::models::User]),
        (status = 400, description = "Unknown role")
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<Value>, ServiceError> {
    let users = user_service::list_users(&state, query.role).await?;
    Ok(Json(json!({
        "users": users,
        "total": users.len()
    })))
}

#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserInput,
    responses(
        (status = 201, description = "User registered", body = crate::models::User),
        (status = 400, description = "Validation failed")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    Json(input): Json<CreateUserInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let user = user_service::register_user(&state, input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User", body = crate::models::User),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<crate::models::User>, ServiceError> {
    Ok(Json(user_service::get_user(&state, id).await?))
}
