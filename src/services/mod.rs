//! Services Layer
//!
//! This module contains pure business logic extracted from HTTP handlers.
//! Handlers stay thin: they parse input, call a service, shape the JSON.

pub mod book_service;
pub mod match_service;
pub mod matching_service;
pub mod user_service;

use std::fmt;

use crate::domain::DomainError;

/// Error type for service operations
#[derive(Debug)]
pub enum ServiceError {
    Database(String),
    NotFound(String),
    Validation(String),
    Conflict(String),
    External(String),
    Internal(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Database(msg) => write!(f, "Database error: {}", msg),
            ServiceError::NotFound(msg)
            | ServiceError::Validation(msg)
            | ServiceError::Conflict(msg) => write!(f, "{}", msg),
            ServiceError::External(msg) => write!(f, "External service error: {}", msg),
            ServiceError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<DomainError> for ServiceError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NotFound => ServiceError::NotFound("Resource not found".to_string()),
            DomainError::Validation(msg) => ServiceError::Validation(msg),
            DomainError::Conflict(msg) => ServiceError::Conflict(msg),
            DomainError::Database(msg) => ServiceError::Database(msg),
            DomainError::External(msg) => ServiceError::External(msg),
            DomainError::Internal(msg) => ServiceError::Internal(msg),
        }
    }
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self {
        ServiceError::Database(e.to_string())
    }
}
