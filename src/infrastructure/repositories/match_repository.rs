//! SeaORM implementation of MatchRepository

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::domain::matching::Allocation;
use crate::domain::{DomainError, MatchRepository, StatusChange};
use crate::models::book::{self, Entity as BookEntity};
use crate::models::book_match::{ActiveModel, Column, Entity as MatchEntity};
use crate::models::user::{self, Entity as UserEntity};
use crate::models::{Match, MatchStatus};

/// SeaORM-based implementation of MatchRepository
pub struct SeaOrmMatchRepository {
    db: DatabaseConnection,
}

impl SeaOrmMatchRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Adds `quantity` to a listing's fulfilled count, only if it still fits.
async fn reserve<C: ConnectionTrait>(
    conn: &C,
    book_id: i32,
    quantity: i32,
) -> Result<(), DomainError> {
    let result = BookEntity::update_many()
        .col_expr(
            book::Column::FulfilledQty,
            Expr::col(book::Column::FulfilledQty).add(quantity),
        )
        .filter(book::Column::Id.eq(book_id))
        .filter(
            Expr::col(book::Column::FulfilledQty)
                .lte(Expr::col(book::Column::Quantity).sub(quantity)),
        )
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return Err(DomainError::Conflict(format!(
            "Book {} no longer has {} copies available",
            book_id, quantity
        )));
    }

    Ok(())
}

#[async_trait]
impl MatchRepository for SeaOrmMatchRepository {
    async fn find_all(&self) -> Result<Vec<Match>, DomainError> {
        let matches = MatchEntity::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;
        Ok(matches.into_iter().map(Match::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Match>, DomainError> {
        let found = MatchEntity::find_by_id(id).one(&self.db).await?;
        Ok(found.map(Match::from))
    }

    async fn find_by_request_ids(&self, request_ids: &[i32]) -> Result<Vec<Match>, DomainError> {
        if request_ids.is_empty() {
            return Ok(Vec::new());
        }

        let matches = MatchEntity::find()
            .filter(Column::RequestId.is_in(request_ids.to_vec()))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;
        Ok(matches.into_iter().map(Match::from).collect())
    }

    async fn find_by_donation_ids(
        &self,
        donation_ids: &[i32],
    ) -> Result<Vec<Match>, DomainError> {
        if donation_ids.is_empty() {
            return Ok(Vec::new());
        }

        let matches = MatchEntity::find()
            .filter(Column::DonationId.is_in(donation_ids.to_vec()))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;
        Ok(matches.into_iter().map(Match::from).collect())
    }

    async fn record_allocations(
        &self,
        allocations: &[Allocation],
    ) -> Result<Vec<Match>, DomainError> {
        // Dropping the transaction on an early return rolls everything back
        let txn = self.db.begin().await?;
        let now = chrono::Utc::now().to_rfc3339();
        let mut created = Vec::with_capacity(allocations.len());

        for allocation in allocations {
            reserve(&txn, allocation.donation_id, allocation.quantity).await?;
            reserve(&txn, allocation.request_id, allocation.quantity).await?;

            let new_match = ActiveModel {
                donation_id: Set(allocation.donation_id),
                request_id: Set(allocation.request_id),
                matched_qty: Set(allocation.quantity),
                matched_on: Set(now.clone()),
                status: Set(MatchStatus::Pending.to_string()),
                ..Default::default()
            };

            let saved = new_match.insert(&txn).await?;
            created.push(Match::from(saved));
        }

        txn.commit().await?;
        Ok(created)
    }

    async fn update_status(
        &self,
        id: i32,
        status: MatchStatus,
    ) -> Result<StatusChange, DomainError> {
        let txn = self.db.begin().await?;

        let existing = MatchEntity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(DomainError::NotFound)?;

        let previous_status = existing.status.clone();
        let matched_qty = existing.matched_qty;
        let request_id = existing.request_id;

        let mut active: ActiveModel = existing.into();
        active.status = Set(status.to_string());
        let updated = active.update(&txn).await?;

        let mut credited_school_id = None;

        // Every entry into Delivered credits the school; leaving it never debits
        if status == MatchStatus::Delivered && previous_status != MatchStatus::Delivered.as_str() {
            let request = BookEntity::find_by_id(request_id)
                .one(&txn)
                .await?
                .ok_or_else(|| {
                    DomainError::Internal(format!(
                        "Request book {} of match {} is missing",
                        request_id, id
                    ))
                })?;

            UserEntity::update_many()
                .col_expr(
                    user::Column::BooksReceived,
                    Expr::col(user::Column::BooksReceived).add(matched_qty),
                )
                .filter(user::Column::Id.eq(request.owner_id))
                .exec(&txn)
                .await?;

            credited_school_id = Some(request.owner_id);
        }

        txn.commit().await?;

        Ok(StatusChange {
            record: Match::from(updated),
            previous_status,
            credited_school_id,
        })
    }
}
