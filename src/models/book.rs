use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A listing: either copies offered by a donor or copies sought by a school.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "books")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub owner_id: i32,
    pub is_donation: bool,
    pub title: String,
    pub grade_level: Option<String>,
    pub language: Option<String>,
    pub condition: Option<String>,
    pub photo_url: Option<String>,
    pub quantity: i32,
    pub fulfilled_qty: i32,
    pub listed_on: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::OwnerId",
        to = "super::user::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Owner,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// DTO for API responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Book {
    pub id: i32,
    pub owner_id: i32,
    pub is_donation: bool,
    pub title: String,
    pub grade_level: Option<String>,
    pub language: Option<String>,
    pub condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    pub quantity: i32,
    pub fulfilled_qty: i32,
    pub listed_on: String,
}

impl Book {
    /// Copies still to be given (donation) or received (request)
    pub fn available(&self) -> i32 {
        (self.quantity - self.fulfilled_qty).max(0)
    }

    pub fn is_active(&self) -> bool {
        self.fulfilled_qty < self.quantity
    }
}

impl From<Model> for Book {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            owner_id: model.owner_id,
            is_donation: model.is_donation,
            title: model.title,
            grade_level: model.grade_level,
            language: model.language,
            condition: model.condition,
            photo_url: model.photo_url,
            quantity: model.quantity,
            fulfilled_qty: model.fulfilled_qty,
            listed_on: model.listed_on,
        }
    }
}
