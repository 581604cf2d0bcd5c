//! Book Service - donation and request listings
//!
//! A listing is a donation when offered by a donor and a request when
//! posted by a school; the owner's role must agree with the listing kind.

use super::ServiceError;
use crate::domain::{BookFilter, CreateBookInput};
use crate::infrastructure::AppState;
use crate::models::{Book, UserRole};

fn validate(input: &CreateBookInput) -> Result<(), ServiceError> {
    if input.title.trim().is_empty() {
        return Err(ServiceError::Validation("Title is required".to_string()));
    }
    if input.quantity < 1 {
        return Err(ServiceError::Validation(
            "Quantity must be at least 1".to_string(),
        ));
    }
    Ok(())
}

pub async fn create_listing(
    state: &AppState,
    mut input: CreateBookInput,
) -> Result<Book, ServiceError> {
    validate(&input)?;
    input.title = input.title.trim().to_string();

    let owner = state
        .user_repo
        .find_by_id(input.owner_id)
        .await?
        .ok_or_else(|| ServiceError::Validation(format!("Unknown owner {}", input.owner_id)))?;

    let expected = if input.is_donation {
        UserRole::Donor
    } else {
        UserRole::School
    };
    if owner.role != expected.as_str() {
        return Err(ServiceError::Validation(format!(
            "{} can only be listed by a {}",
            if input.is_donation {
                "Donations"
            } else {
                "Requests"
            },
            expected
        )));
    }

    let book = state.book_repo.create(input).await?;
    tracing::info!(
        "{} {} listed: '{}' x{}",
        if book.is_donation { "Donation" } else { "Request" },
        book.id,
        book.title,
        book.quantity
    );
    Ok(book)
}

pub async fn list_listings(state: &AppState, filter: BookFilter) -> Result<Vec<Book>, ServiceError> {
    tracing::debug!("List listings - {:?}", filter);
    Ok(state.book_repo.find_all(filter).await?)
}

pub async fn get_listing(state: &AppState, id: i32) -> Result<Book, ServiceError> {
    state
        .book_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Book not found".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(title: &str, quantity: i32) -> CreateBookInput {
        CreateBookInput {
            owner_id: 1,
            is_donation: true,
            title: title.to_string(),
            grade_level: Some("Elementary".to_string()),
            language: Some("English".to_string()),
            condition: None,
            photo_url: None,
            quantity,
        }
    }

    #[test]
    fn test_validate() {
        assert!(validate(&listing("Atlas", 1)).is_ok());
        assert!(validate(&listing("", 3)).is_err());
        assert!(validate(&listing("Atlas", 0)).is_err());
    }
}
