//! Match Service - per-school and per-donor views, status transitions

use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use utoipa::ToSchema;

use super::ServiceError;
use crate::domain::{BookFilter, DomainError, StatusChange};
use crate::infrastructure::AppState;
use crate::models::{Book, Match, MatchStatus, User, UserRole};

/// A match as seen by the school that requested the book
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SchoolMatchView {
    pub match_id: i32,
    pub book_title: String,
    pub quantity: i32,
    pub donor_name: String,
    pub donor_id: i32,
    pub status: String,
    pub matched_on: String,
}

/// A match as seen by the donor who offered the book
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DonorMatchView {
    pub match_id: i32,
    pub book_title: String,
    pub quantity: i32,
    pub school_name: String,
    pub school_id: i32,
    pub status: String,
    pub matched_on: String,
}

/// `matched_on` is stored as RFC 3339; views show it without offset.
fn format_timestamp(raw: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

fn unique(ids: impl Iterator<Item = i32>) -> Vec<i32> {
    ids.collect::<BTreeSet<_>>().into_iter().collect()
}

async fn require_user(state: &AppState, id: i32, role: UserRole) -> Result<User, ServiceError> {
    let not_found = || match role {
        UserRole::School => ServiceError::NotFound("School not found".to_string()),
        UserRole::Donor => ServiceError::NotFound("Donor not found".to_string()),
    };

    let user = state.user_repo.find_by_id(id).await?.ok_or_else(not_found)?;
    if user.role != role.as_str() {
        return Err(not_found());
    }
    Ok(user)
}

async fn books_by_id(state: &AppState, ids: &[i32]) -> Result<HashMap<i32, Book>, ServiceError> {
    Ok(state
        .book_repo
        .find_by_ids(ids)
        .await?
        .into_iter()
        .map(|b| (b.id, b))
        .collect())
}

async fn users_by_id(state: &AppState, ids: &[i32]) -> Result<HashMap<i32, User>, ServiceError> {
    Ok(state
        .user_repo
        .find_by_ids(ids)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect())
}

/// Every match created for one of the school's requests, oldest first
pub async fn matches_for_school(
    state: &AppState,
    school_id: i32,
) -> Result<Vec<SchoolMatchView>, ServiceError> {
    require_user(state, school_id, UserRole::School).await?;

    let requests = state
        .book_repo
        .find_all(BookFilter {
            is_donation: Some(false),
            owner_id: Some(school_id),
            active_only: false,
        })
        .await?;
    let request_ids: Vec<i32> = requests.iter().map(|b| b.id).collect();
    let matches = state.match_repo.find_by_request_ids(&request_ids).await?;

    let donations = books_by_id(state, &unique(matches.iter().map(|m| m.donation_id))).await?;
    let donors = users_by_id(state, &unique(donations.values().map(|b| b.owner_id))).await?;

    let views = matches
        .into_iter()
        .map(|m| {
            let donation = donations.get(&m.donation_id);
            let donor = donation.and_then(|d| donors.get(&d.owner_id));
            SchoolMatchView {
                match_id: m.id,
                book_title: donation.map(|d| d.title.clone()).unwrap_or_default(),
                quantity: m.matched_qty,
                donor_name: donor.map(User::display_name).unwrap_or_default(),
                donor_id: donation.map(|d| d.owner_id).unwrap_or_default(),
                status: m.status,
                matched_on: format_timestamp(&m.matched_on),
            }
        })
        .collect();

    Ok(views)
}

/// Every match drawing on one of the donor's donations, oldest first
pub async fn matches_for_donor(
    state: &AppState,
    donor_id: i32,
) -> Result<Vec<DonorMatchView>, ServiceError> {
    require_user(state, donor_id, UserRole::Donor).await?;

    let donations = state
        .book_repo
        .find_all(BookFilter {
            is_donation: Some(true),
            owner_id: Some(donor_id),
            active_only: false,
        })
        .await?;
    let titles: HashMap<i32, String> = donations.iter().map(|b| (b.id, b.title.clone())).collect();
    let donation_ids: Vec<i32> = donations.iter().map(|b| b.id).collect();
    let matches = state.match_repo.find_by_donation_ids(&donation_ids).await?;

    let requests = books_by_id(state, &unique(matches.iter().map(|m| m.request_id))).await?;
    let schools = users_by_id(state, &unique(requests.values().map(|b| b.owner_id))).await?;

    let views = matches
        .into_iter()
        .map(|m| {
            let request = requests.get(&m.request_id);
            let school = request.and_then(|r| schools.get(&r.owner_id));
            DonorMatchView {
                match_id: m.id,
                book_title: titles.get(&m.donation_id).cloned().unwrap_or_default(),
                quantity: m.matched_qty,
                school_name: school.map(User::display_name).unwrap_or_default(),
                school_id: request.map(|r| r.owner_id).unwrap_or_default(),
                status: m.status,
                matched_on: format_timestamp(&m.matched_on),
            }
        })
        .collect();

    Ok(views)
}

pub async fn list_matches(state: &AppState) -> Result<Vec<Match>, ServiceError> {
    Ok(state.match_repo.find_all().await?)
}

/// Move a match to `status`. The status text is validated before the match
/// is looked up.
pub async fn set_match_status(
    state: &AppState,
    match_id: i32,
    status: &str,
) -> Result<StatusChange, ServiceError> {
    let status: MatchStatus = status.parse().map_err(ServiceError::Validation)?;

    let change = state
        .match_repo
        .update_status(match_id, status)
        .await
        .map_err(|e| match e {
            DomainError::NotFound => ServiceError::NotFound("Match not found".to_string()),
            other => other.into(),
        })?;

    tracing::info!(
        "Match {} status {} -> {}",
        match_id,
        change.previous_status,
        change.record.status
    );
    if let Some(school_id) = change.credited_school_id {
        tracing::info!(
            "School {} credited with {} delivered books",
            school_id,
            change.record.matched_qty
        );
    }

    Ok(change)
}
