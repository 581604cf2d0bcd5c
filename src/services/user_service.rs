//! User Service - donor and school registration

use super::ServiceError;
use crate::domain::CreateUserInput;
use crate::infrastructure::AppState;
use crate::models::{User, UserRole};

pub const MAX_RATING: i32 = 5;

fn validate(input: &CreateUserInput) -> Result<(), ServiceError> {
    if input.name.trim().is_empty() {
        return Err(ServiceError::Validation("Name is required".to_string()));
    }
    if input.email.trim().is_empty() {
        return Err(ServiceError::Validation("Email is required".to_string()));
    }
    input
        .role
        .parse::<UserRole>()
        .map_err(ServiceError::Validation)?;
    if let Some(rating) = input.rating
        && !(0..=MAX_RATING).contains(&rating)
    {
        return Err(ServiceError::Validation(format!(
            "Rating must be between 0 and {}",
            MAX_RATING
        )));
    }
    Ok(())
}

pub async fn register_user(
    state: &AppState,
    mut input: CreateUserInput,
) -> Result<User, ServiceError> {
    validate(&input)?;
    // FromStr accepted it, store the canonical spelling
    if let Ok(role) = input.role.parse::<UserRole>() {
        input.role = role.as_str().to_string();
    }

    let user = state.user_repo.create(input).await?;
    tracing::info!("Registered {} {} (id {})", user.role, user.name, user.id);
    Ok(user)
}

pub async fn list_users(state: &AppState, role: Option<String>) -> Result<Vec<User>, ServiceError> {
    let role = match role {
        Some(r) if !r.is_empty() => Some(
            r.parse::<UserRole>()
                .map_err(ServiceError::Validation)?
                .as_str()
                .to_string(),
        ),
        _ => None,
    };
    Ok(state.user_repo.find_all(role).await?)
}

pub async fn get_user(state: &AppState, id: i32) -> Result<User, ServiceError> {
    state
        .user_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("User not found".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(role: &str, rating: Option<i32>) -> CreateUserInput {
        CreateUserInput {
            name: "Principal Smith".to_string(),
            email: "smith@example.edu".to_string(),
            phone: None,
            address: Some("789 School Ave".to_string()),
            role: role.to_string(),
            organization: Some("City Elementary School".to_string()),
            rating,
        }
    }

    #[test]
    fn test_validate_accepts_known_roles() {
        assert!(validate(&input("school", Some(4))).is_ok());
        assert!(validate(&input("Donor", None)).is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_input() {
        assert!(matches!(
            validate(&input("admin", None)),
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            validate(&input("school", Some(6))),
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            validate(&input("school", Some(-1))),
            Err(ServiceError::Validation(_))
        ));

        let mut nameless = input("school", None);
        nameless.name = "  ".to_string();
        assert!(validate(&nameless).is_err());
    }
}
