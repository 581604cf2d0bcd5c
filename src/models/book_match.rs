use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "matches")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub donation_id: i32,
    pub request_id: i32,
    pub matched_qty: i32,
    pub matched_on: String,
    pub status: String, // see MatchStatus
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::book::Entity",
        from = "Column::DonationId",
        to = "super::book::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Donation,
    #[sea_orm(
        belongs_to = "super::book::Entity",
        from = "Column::RequestId",
        to = "super::book::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Request,
}

impl ActiveModelBehavior for ActiveModel {}

/// Lifecycle of a match once the matcher created it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum MatchStatus {
    Pending,
    InTransit,
    Delivered,
    Cancelled,
}

impl MatchStatus {
    pub const ALL: [MatchStatus; 4] = [
        MatchStatus::Pending,
        MatchStatus::InTransit,
        MatchStatus::Delivered,
        MatchStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Pending => "Pending",
            MatchStatus::InTransit => "InTransit",
            MatchStatus::Delivered => "Delivered",
            MatchStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MatchStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<&str> = MatchStatus::ALL.iter().map(|s| s.as_str()).collect();
                format!("Invalid status. Must be one of: {}", valid.join(", "))
            })
    }
}

// DTO for API responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Match {
    pub id: i32,
    pub donation_id: i32,
    pub request_id: i32,
    pub matched_qty: i32,
    pub matched_on: String,
    pub status: String,
}

impl From<Model> for Match {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            donation_id: model.donation_id,
            request_id: model.request_id,
            matched_qty: model.matched_qty,
            matched_on: model.matched_on,
            status: model.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parses_exact_names() {
        for status in MatchStatus::ALL {
            assert_eq!(status.as_str().parse::<MatchStatus>(), Ok(status));
        }
    }

    #[test]
    fn test_status_rejects_unknown_and_wrong_case() {
        assert!("Shipped".parse::<MatchStatus>().is_err());
        assert!("delivered".parse::<MatchStatus>().is_err());
        let err = "".parse::<MatchStatus>().unwrap_err();
        assert!(err.contains("Pending, InTransit, Delivered, Cancelled"));
    }
}
