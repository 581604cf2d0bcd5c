use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: String, // 'donor', 'school'
    pub organization: Option<String>,
    pub rating: i32,
    pub books_received: i32,
    pub registered_on: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::book::Entity")]
    Books,
}

impl Related<super::book::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Books.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Who a user is on the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Donor,
    School,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Donor => "donor",
            UserRole::School => "school",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "donor" => Ok(UserRole::Donor),
            "school" => Ok(UserRole::School),
            other => Err(format!(
                "Invalid role '{}'. Must be one of: donor, school",
                other
            )),
        }
    }
}

// DTO for API responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: String,
    pub organization: Option<String>,
    pub rating: i32,
    pub books_received: i32,
    pub registered_on: String,
}

impl User {
    /// Name shown to the other side of a match: schools are known by their
    /// organization, donors by their own name.
    pub fn display_name(&self) -> String {
        match (self.role.as_str(), &self.organization) {
            ("school", Some(org)) if !org.trim().is_empty() => org.clone(),
            _ => self.name.clone(),
        }
    }
}

impl From<Model> for User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            phone: model.phone,
            address: model.address,
            role: model.role,
            organization: model.organization,
            rating: model.rating,
            books_received: model.books_received,
            registered_on: model.registered_on,
        }
    }
}
