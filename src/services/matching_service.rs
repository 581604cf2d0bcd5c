//! Matching Service - runs the matcher against the store and persists the result

use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use utoipa::ToSchema;

use super::ServiceError;
use crate::domain::matching::{ScoredCandidate, allocate, generate_candidates};
use crate::domain::{BookFilter, DistanceProvider};
use crate::infrastructure::AppState;
use crate::models::{Book, User};

/// One match created by a run, with the names needed to notify both sides
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreatedMatch {
    pub match_id: i32,
    pub donation_id: i32,
    pub request_id: i32,
    pub matched_qty: i32,
    pub book_title: String,
    pub donor_name: String,
    pub school_name: String,
    pub score: f64,
}

#[derive(Debug, Clone)]
pub enum MatchingOutcome {
    /// No active donation or no active request
    NothingToMatch,
    /// Active listings exist but no pair passes title/grade/language
    NoCompatibleMatches,
    Matched(Vec<CreatedMatch>),
}

impl MatchingOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            MatchingOutcome::NothingToMatch => "nothing_to_match",
            MatchingOutcome::NoCompatibleMatches => "no_compatible_matches",
            MatchingOutcome::Matched(_) => "matched",
        }
    }

    pub fn message(&self) -> String {
        match self {
            MatchingOutcome::NothingToMatch => {
                "No active donations or requests found for matching".to_string()
            }
            MatchingOutcome::NoCompatibleMatches => {
                "No compatible matches found between donations and requests".to_string()
            }
            MatchingOutcome::Matched(created) => format!("{} matches created", created.len()),
        }
    }

    pub fn created(&self) -> &[CreatedMatch] {
        match self {
            MatchingOutcome::Matched(created) => created,
            _ => &[],
        }
    }
}

/// Distance between donor and school, `None` if it cannot be resolved.
async fn resolve_distance(
    provider: &dyn DistanceProvider,
    donor_id: i32,
    donor: Option<&User>,
    school: &User,
) -> Option<f64> {
    let Some(donor) = donor else {
        tracing::warn!("Donor {} not found, proximity scored as 0", donor_id);
        return None;
    };
    let Some(from) = donor.address.as_deref() else {
        tracing::warn!("Donor {} has no address, proximity scored as 0", donor.id);
        return None;
    };
    let Some(to) = school.address.as_deref() else {
        tracing::warn!("School {} has no address, proximity scored as 0", school.id);
        return None;
    };

    match provider.distance_km(from, to).await {
        Ok(km) => Some(km),
        Err(e) => {
            tracing::warn!(
                "Distance lookup failed ({} -> {}): {}, proximity scored as 0",
                from,
                to,
                e
            );
            None
        }
    }
}

/// Run one matching pass over all active listings.
///
/// Runs are serialized on the state's matching lock; the allocations are
/// written in a single transaction that fails as a whole if any listing lost
/// capacity in the meantime.
pub async fn run_matching(state: &AppState) -> Result<MatchingOutcome, ServiceError> {
    let _guard = state.matching_lock().lock().await;

    let donations = state
        .book_repo
        .find_all(BookFilter::active_donations())
        .await?;
    let requests = state
        .book_repo
        .find_all(BookFilter::active_requests())
        .await?;

    tracing::info!(
        "Matching run: {} active donations, {} active requests",
        donations.len(),
        requests.len()
    );

    if donations.is_empty() || requests.is_empty() {
        return Ok(MatchingOutcome::NothingToMatch);
    }

    let candidates = generate_candidates(&donations, &requests);
    if candidates.is_empty() {
        tracing::info!("No compatible donation/request pairs");
        return Ok(MatchingOutcome::NoCompatibleMatches);
    }

    let owner_ids: Vec<i32> = donations
        .iter()
        .chain(requests.iter())
        .map(|b| b.owner_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let users: HashMap<i32, User> = state
        .user_repo
        .find_by_ids(&owner_ids)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();

    let mut scored = Vec::with_capacity(candidates.len());
    for candidate in &candidates {
        let Some(school) = users.get(&candidate.request.owner_id) else {
            tracing::warn!(
                "Request {} references missing user {}, skipped",
                candidate.request.id,
                candidate.request.owner_id
            );
            continue;
        };
        let donor_id = candidate.donation.owner_id;
        let distance =
            resolve_distance(state.distance.as_ref(), donor_id, users.get(&donor_id), school)
                .await;
        scored.push(ScoredCandidate::new(
            candidate.donation.id,
            candidate.request.id,
            distance,
            school.rating,
            school.books_received,
        ));
    }

    let allocations = allocate(scored, &donations, &requests);
    tracing::debug!(
        "{} candidates scored, {} allocations",
        candidates.len(),
        allocations.len()
    );

    let saved = state
        .match_repo
        .record_allocations(&allocations)
        .await
        .map_err(|e| {
            tracing::error!(
                "Persisting {} allocations failed, batch rolled back: {}",
                allocations.len(),
                e
            );
            ServiceError::from(e)
        })?;

    let books: HashMap<i32, &Book> = donations
        .iter()
        .chain(requests.iter())
        .map(|b| (b.id, b))
        .collect();
    let name_of = |book_id: i32| {
        books
            .get(&book_id)
            .and_then(|b| users.get(&b.owner_id))
            .map(User::display_name)
            .unwrap_or_else(|| "Unknown".to_string())
    };

    let created: Vec<CreatedMatch> = saved
        .into_iter()
        .zip(allocations.iter())
        .map(|(record, allocation)| CreatedMatch {
            match_id: record.id,
            donation_id: record.donation_id,
            request_id: record.request_id,
            matched_qty: record.matched_qty,
            book_title: books
                .get(&record.donation_id)
                .map(|b| b.title.clone())
                .unwrap_or_else(|| "Unknown".to_string()),
            donor_name: name_of(record.donation_id),
            school_name: name_of(record.request_id),
            score: allocation.score,
        })
        .collect();

    tracing::info!("Matching run created {} matches", created.len());

    Ok(MatchingOutcome::Matched(created))
}
