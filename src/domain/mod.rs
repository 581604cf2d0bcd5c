//! Domain layer - Pure business abstractions
//!
//! No Axum and no SeaORM queries here: trait definitions, domain error
//! types, the distance abstraction and the matching core.

pub mod distance;
pub mod errors;
pub mod matching;
pub mod repositories;

pub use distance::{Coordinates, DistanceProvider, FixedDistance};
pub use errors::DomainError;
pub use repositories::*;
