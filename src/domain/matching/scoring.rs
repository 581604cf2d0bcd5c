//! Candidate scoring.
//!
//! The weights and the logarithmic priority curve are part of the matching
//! contract; changing them changes which school gets books first.

pub const PROXIMITY_WEIGHT: f64 = 0.7;
pub const PRIORITY_WEIGHT: f64 = 0.3;

/// Points lost per kilometer between donor and school
pub const PROXIMITY_PENALTY_PER_KM: f64 = 3.0;

/// 100 points at 0 km, 0 points from ~33 km on
pub fn proximity_score(distance_km: f64) -> f64 {
    (100.0 - PROXIMITY_PENALTY_PER_KM * distance_km).max(0.0)
}

/// 0-100: up to 50 for rating (0-5), up to 50 for having received few books.
pub fn school_priority(rating: i32, books_received: i32) -> f64 {
    let rating_score = (f64::from(rating) * 10.0).min(50.0);
    let received = f64::from(books_received.max(0));
    let books_factor = 50.0 * (1.0 - (received + 1.0).ln() / 10.0).max(0.0);

    rating_score + books_factor
}

pub fn match_score(proximity_score: f64, school_priority: f64) -> f64 {
    proximity_score * PROXIMITY_WEIGHT + school_priority * PRIORITY_WEIGHT
}

/// A compatible pair with its score breakdown
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub donation_id: i32,
    pub request_id: i32,
    /// `None` when the distance could not be resolved; proximity is then 0
    pub distance_km: Option<f64>,
    pub proximity_score: f64,
    pub school_priority: f64,
    pub score: f64,
}

impl ScoredCandidate {
    pub fn new(
        donation_id: i32,
        request_id: i32,
        distance_km: Option<f64>,
        school_rating: i32,
        school_books_received: i32,
    ) -> Self {
        let proximity = distance_km.map(proximity_score).unwrap_or(0.0);
        let priority = school_priority(school_rating, school_books_received);

        Self {
            donation_id,
            request_id,
            distance_km,
            proximity_score: proximity,
            school_priority: priority,
            score: match_score(proximity, priority),
        }
    }
}
