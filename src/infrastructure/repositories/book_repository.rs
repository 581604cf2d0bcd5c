//! SeaORM implementation of BookRepository

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::{BookFilter, BookRepository, CreateBookInput, DomainError};
use crate::models::Book;
use crate::models::book::{ActiveModel, Column, Entity as BookEntity};

/// SeaORM-based implementation of BookRepository
pub struct SeaOrmBookRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BookRepository for SeaOrmBookRepository {
    async fn find_all(&self, filter: BookFilter) -> Result<Vec<Book>, DomainError> {
        let mut query = BookEntity::find();

        if let Some(is_donation) = filter.is_donation {
            query = query.filter(Column::IsDonation.eq(is_donation));
        }

        if let Some(owner_id) = filter.owner_id {
            query = query.filter(Column::OwnerId.eq(owner_id));
        }

        if filter.active_only {
            query = query.filter(Expr::col(Column::FulfilledQty).lt(Expr::col(Column::Quantity)));
        }

        let books = query.order_by_asc(Column::Id).all(&self.db).await?;
        Ok(books.into_iter().map(Book::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Book>, DomainError> {
        let book = BookEntity::find_by_id(id).one(&self.db).await?;
        Ok(book.map(Book::from))
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Book>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let books = BookEntity::find()
            .filter(Column::Id.is_in(ids.to_vec()))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;

        Ok(books.into_iter().map(Book::from).collect())
    }

    async fn create(&self, input: CreateBookInput) -> Result<Book, DomainError> {
        let now = chrono::Utc::now();

        let new_book = ActiveModel {
            owner_id: Set(input.owner_id),
            is_donation: Set(input.is_donation),
            title: Set(input.title),
            grade_level: Set(input.grade_level),
            language: Set(input.language),
            condition: Set(input.condition),
            photo_url: Set(input.photo_url),
            quantity: Set(input.quantity),
            fulfilled_qty: Set(0),
            listed_on: Set(now.to_rfc3339()),
            ..Default::default()
        };

        let result = new_book.insert(&self.db).await?;
        Ok(Book::from(result))
    }
}
