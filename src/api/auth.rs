use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use sea_orm::*;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::infrastructure::AppState;
use crate::infrastructure::auth::{OPERATOR_ROLE, create_jwt, verify_password};
use crate::models::operator;

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    token: String,
}

fn invalid_credentials() -> axum::response::Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "Invalid credentials" })),
    )
        .into_response()
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Operator token", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    tracing::info!("Login attempt for operator: {}", payload.username);

    let account = match operator::Entity::find()
        .filter(operator::Column::Username.eq(&payload.username))
        .one(state.db())
        .await
    {
        Ok(Some(account)) => account,
        Ok(None) => {
            tracing::warn!("Operator not found: {}", payload.username);
            return invalid_credentials();
        }
        Err(e) => {
            tracing::error!("Operator lookup failed: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Database error" })),
            )
                .into_response();
        }
    };

    match verify_password(&payload.password, &account.password_hash) {
        Ok(true) => match create_jwt(&account.username, OPERATOR_ROLE) {
            Ok(token) => {
                tracing::info!("Operator {} logged in", account.username);
                (StatusCode::OK, Json(LoginResponse { token })).into_response()
            }
            Err(e) => {
                tracing::error!("Token creation failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Could not issue token" })),
                )
                    .into_response()
            }
        },
        _ => {
            tracing::warn!("Password verification failed for operator: {}", account.username);
            invalid_credentials()
        }
    }
}
