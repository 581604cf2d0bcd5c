//! SeaORM implementation of UserRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::{CreateUserInput, DomainError, UserRepository};
use crate::models::User;
use crate::models::user::{ActiveModel, Column, Entity as UserEntity};

/// SeaORM-based implementation of UserRepository
pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_all(&self, role: Option<String>) -> Result<Vec<User>, DomainError> {
        let mut query = UserEntity::find();

        if let Some(role) = role
            && !role.is_empty()
        {
            query = query.filter(Column::Role.eq(role));
        }

        let users = query.order_by_asc(Column::Id).all(&self.db).await?;
        Ok(users.into_iter().map(User::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, DomainError> {
        let user = UserEntity::find_by_id(id).one(&self.db).await?;
        Ok(user.map(User::from))
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<User>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let users = UserEntity::find()
            .filter(Column::Id.is_in(ids.to_vec()))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;

        Ok(users.into_iter().map(User::from).collect())
    }

    async fn create(&self, input: CreateUserInput) -> Result<User, DomainError> {
        let now = chrono::Utc::now();

        let new_user = ActiveModel {
            name: Set(input.name),
            email: Set(input.email),
            phone: Set(input.phone),
            address: Set(input.address),
            role: Set(input.role),
            organization: Set(input.organization),
            rating: Set(input.rating.unwrap_or(0)),
            books_received: Set(0),
            registered_on: Set(now.to_rfc3339()),
            ..Default::default()
        };

        let result = new_user.insert(&self.db).await?;
        Ok(User::from(result))
    }
}
