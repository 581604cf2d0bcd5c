use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::{Value, json};
use utoipa::IntoParams;

use crate::domain::{BookFilter, CreateBookInput};
use crate::infrastructure::AppState;
use crate::models::Book;
use crate::services::{ServiceError, book_service};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookQuery {
    /// `donation` or `request`
    pub kind: Option<String>,
    pub owner_id: Option<i32>,
    /// Only listings that still have copies to give or receive
    pub active: Option<bool>,
}

impl BookQuery {
    fn into_filter(self) -> Result<BookFilter, ServiceError> {
        let is_donation = match self.kind.as_deref() {
            None | Some("") => None,
            Some("donation") => Some(true),
            Some("request") => Some(false),
            Some(other) => {
                return Err(ServiceError::Validation(format!(
                    "Invalid kind '{}'. Must be one of: donation, request",
                    other
                )));
            }
        };

        Ok(BookFilter {
            is_donation,
            owner_id: self.owner_id,
            active_only: self.active.unwrap_or(false),
        })
    }
}

#[utoipa::path(
    get,
    path = "/api/books",
    params(BookQuery),
    responses(
        (status = 200, description = "Donation and request listings", body = [Book]),
        (status = 400, description = "Unknown kind")
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<BookQuery>,
) -> Result<Json<Value>, ServiceError> {
    let books = book_service::list_listings(&state, query.into_filter()?).await?;
    Ok(Json(json!({
        "books": books,
        "total": books.len()
    })))
}

#[utoipa::path(
    post,
    path = "/api/books",
    request_body = CreateBookInput,
    responses(
        (status = 201, description = "Listing created", body = Book),
        (status = 400, description = "Validation failed")
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    Json(input): Json<CreateBookInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let book = book_service::create_listing(&state, input).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

#[utoipa::path(
    get,
    path = "/api/books/{id}",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Listing", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Book>, ServiceError> {
    Ok(Json(book_service::get_listing(&state, id).await?))
}
