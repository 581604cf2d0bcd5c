//! Application state containing repositories and shared resources

use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{BookRepository, DistanceProvider, MatchRepository, UserRepository};
use crate::infrastructure::{SeaOrmBookRepository, SeaOrmMatchRepository, SeaOrmUserRepository};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    /// User repository
    pub user_repo: Arc<dyn UserRepository>,
    /// Book (listing) repository
    pub book_repo: Arc<dyn BookRepository>,
    /// Match repository
    pub match_repo: Arc<dyn MatchRepository>,
    /// Donor-to-school distance lookup used by matching runs
    pub distance: Arc<dyn DistanceProvider>,
    /// Held for the whole of a matching run
    matching_lock: Arc<Mutex<()>>,
}

impl AppState {
    /// Create a new AppState with all repositories initialized
    pub fn new(db: DatabaseConnection, distance: Arc<dyn DistanceProvider>) -> Self {
        let user_repo = Arc::new(SeaOrmUserRepository::new(db.clone()));
        let book_repo = Arc::new(SeaOrmBookRepository::new(db.clone()));
        let match_repo = Arc::new(SeaOrmMatchRepository::new(db.clone()));

        Self {
            db,
            user_repo,
            book_repo,
            match_repo,
            distance,
            matching_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Get the database connection
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn matching_lock(&self) -> &Mutex<()> {
        &self.matching_lock
    }
}
