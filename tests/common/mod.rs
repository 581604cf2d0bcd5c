#![allow(dead_code)]

use async_trait::async_trait;
use books4all::db;
use books4all::domain::{CreateBookInput, DistanceProvider, DomainError};
use books4all::infrastructure::AppState;
use books4all::models::{Book, User, user};
use sea_orm::{ActiveModelTrait, Set};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Distances keyed by (donor address, school address); unknown pairs fail.
#[derive(Default)]
pub struct TableDistance {
    pub table: HashMap<(String, String), f64>,
    pub calls: AtomicUsize,
}

impl TableDistance {
    pub fn with(mut self, from: &str, to: &str, km: f64) -> Self {
        self.table.insert((from.to_string(), to.to_string()), km);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DistanceProvider for TableDistance {
    async fn distance_km(&self, from: &str, to: &str) -> Result<f64, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.table
            .get(&(from.to_string(), to.to_string()))
            .copied()
            .ok_or_else(|| DomainError::External(format!("no route {} -> {}", from, to)))
    }
}

pub async fn setup_state(distance: Arc<dyn DistanceProvider>) -> AppState {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    AppState::new(db, distance)
}

pub async fn create_user(
    state: &AppState,
    name: &str,
    role: &str,
    address: &str,
    rating: i32,
    books_received: i32,
) -> User {
    let model = user::ActiveModel {
        name: Set(name.to_string()),
        email: Set(format!("{}@example.com", name.to_lowercase().replace(' ', "."))),
        phone: Set(None),
        address: Set(Some(address.to_string())),
        role: Set(role.to_string()),
        organization: Set(if role == "school" {
            Some(format!("{} School", name))
        } else {
            None
        }),
        rating: Set(rating),
        books_received: Set(books_received),
        registered_on: Set(chrono::Utc::now().to_rfc3339()),
        ..Default::default()
    };
    User::from(model.insert(state.db()).await.expect("Failed to create user"))
}

pub async fn clear_address(state: &AppState, user: &User) {
    user::ActiveModel {
        id: Set(user.id),
        address: Set(None),
        ..Default::default()
    }
    .update(state.db())
    .await
    .expect("Failed to clear address");
}

pub async fn create_listing(
    state: &AppState,
    owner: &User,
    is_donation: bool,
    title: &str,
    quantity: i32,
    grade_level: &str,
    language: &str,
) -> Book {
    state
        .book_repo
        .create(CreateBookInput {
            owner_id: owner.id,
            is_donation,
            title: title.to_string(),
            grade_level: Some(grade_level.to_string()),
            language: Some(language.to_string()),
            condition: None,
            photo_url: None,
            quantity,
        })
        .await
        .expect("Failed to create listing")
}

pub async fn reload(state: &AppState, book: &Book) -> Book {
    state
        .book_repo
        .find_by_id(book.id)
        .await
        .expect("query failed")
        .expect("book vanished")
}
