//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.
//!
//! Relationships are never traversed implicitly: callers ask for related
//! records by their foreign identifiers.

use async_trait::async_trait;
use serde::Deserialize;
use utoipa::ToSchema;

use super::DomainError;
use super::matching::Allocation;
use crate::models::{Book, Match, MatchStatus, User};

/// Filter criteria for listing queries
#[derive(Debug, Default, Clone)]
pub struct BookFilter {
    /// `Some(true)` for donations, `Some(false)` for requests
    pub is_donation: Option<bool>,
    pub owner_id: Option<i32>,
    /// Only listings with fulfilled_qty < quantity
    pub active_only: bool,
}

impl BookFilter {
    pub fn active_donations() -> Self {
        Self {
            is_donation: Some(true),
            owner_id: None,
            active_only: true,
        }
    }

    pub fn active_requests() -> Self {
        Self {
            is_donation: Some(false),
            owner_id: None,
            active_only: true,
        }
    }
}

/// Input for listing a donation or a request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateBookInput {
    pub owner_id: i32,
    pub is_donation: bool,
    pub title: String,
    pub grade_level: Option<String>,
    pub language: Option<String>,
    pub condition: Option<String>,
    pub photo_url: Option<String>,
    pub quantity: i32,
}

/// Input for registering a donor or a school
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateUserInput {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: String,
    pub organization: Option<String>,
    pub rating: Option<i32>,
}

/// Result of a status change on a match
#[derive(Debug, Clone)]
pub struct StatusChange {
    pub record: Match,
    pub previous_status: String,
    /// School credited with the delivered copies, if this change delivered them
    pub credited_school_id: Option<i32>,
}

/// Repository trait for User entity
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find all users, optionally restricted to one role
    async fn find_all(&self, role: Option<String>) -> Result<Vec<User>, DomainError>;

    /// Find a user by ID
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, DomainError>;

    /// Find every user whose ID is in `ids`
    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<User>, DomainError>;

    /// Create a new user
    async fn create(&self, input: CreateUserInput) -> Result<User, DomainError>;
}

/// Repository trait for Book (listing) entity
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Find all listings matching the filter, ordered by ID
    async fn find_all(&self, filter: BookFilter) -> Result<Vec<Book>, DomainError>;

    /// Find a single listing by ID
    async fn find_by_id(&self, id: i32) -> Result<Option<Book>, DomainError>;

    /// Find every listing whose ID is in `ids`
    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Book>, DomainError>;

    /// Create a new listing
    async fn create(&self, input: CreateBookInput) -> Result<Book, DomainError>;
}

/// Repository trait for Match entity
#[async_trait]
pub trait MatchRepository: Send + Sync {
    /// Find all matches, oldest first
    async fn find_all(&self) -> Result<Vec<Match>, DomainError>;

    /// Find a match by ID
    async fn find_by_id(&self, id: i32) -> Result<Option<Match>, DomainError>;

    /// Matches whose request listing is in `request_ids`
    async fn find_by_request_ids(&self, request_ids: &[i32]) -> Result<Vec<Match>, DomainError>;

    /// Matches whose donation listing is in `donation_ids`
    async fn find_by_donation_ids(&self, donation_ids: &[i32])
    -> Result<Vec<Match>, DomainError>;

    /// Persist allocations as Pending matches and bump the fulfilled
    /// quantity of both listings, all in one transaction.
    ///
    /// Fails with [`DomainError::Conflict`] (and persists nothing) when a
    /// listing no longer has the capacity an allocation needs.
    async fn record_allocations(&self, allocations: &[Allocation])
    -> Result<Vec<Match>, DomainError>;

    /// Set the status of a match. Entering `Delivered` credits the school
    /// that owns the request with the matched quantity.
    async fn update_status(&self, id: i32, status: MatchStatus)
    -> Result<StatusChange, DomainError>;
}
