use std::collections::HashMap;

use super::ScoredCandidate;
use crate::models::Book;

/// Copies assigned from one donation to one request
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    pub donation_id: i32,
    pub request_id: i32,
    pub quantity: i32,
    pub score: f64,
}

/// Single-pass greedy allocation, best score first.
///
/// Remaining capacity starts at `quantity - fulfilled_qty` of each listing.
/// A listing whose capacity reaches zero is skipped for the rest of the
/// pass. Equal scores keep the order the candidates were given in.
pub fn allocate(
    mut candidates: Vec<ScoredCandidate>,
    donations: &[Book],
    requests: &[Book],
) -> Vec<Allocation> {
    // stable: ties stay in generation order
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut donation_remaining: HashMap<i32, i32> =
        donations.iter().map(|d| (d.id, d.available())).collect();
    let mut request_remaining: HashMap<i32, i32> =
        requests.iter().map(|r| (r.id, r.available())).collect();

    let mut allocations = Vec::new();

    for candidate in candidates {
        let (Some(offered), Some(wanted)) = (
            donation_remaining.get_mut(&candidate.donation_id),
            request_remaining.get_mut(&candidate.request_id),
        ) else {
            continue;
        };

        let quantity = (*offered).min(*wanted);
        if quantity <= 0 {
            continue;
        }

        *offered -= quantity;
        *wanted -= quantity;

        allocations.push(Allocation {
            donation_id: candidate.donation_id,
            request_id: candidate.request_id,
            quantity,
            score: candidate.score,
        });
    }

    allocations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(id: i32, is_donation: bool, quantity: i32, fulfilled_qty: i32) -> Book {
        Book {
            id,
            owner_id: 1,
            is_donation,
            title: "Wings of Fire".to_string(),
            grade_level: None,
            language: None,
            condition: None,
            photo_url: None,
            quantity,
            fulfilled_qty,
            listed_on: String::new(),
        }
    }

    fn scored(donation_id: i32, request_id: i32, score: f64) -> ScoredCandidate {
        ScoredCandidate {
            donation_id,
            request_id,
            distance_km: None,
            proximity_score: 0.0,
            school_priority: 0.0,
            score,
        }
    }

    #[test]
    fn test_highest_score_served_first() {
        let donations = vec![listing(1, true, 10, 0), listing(2, true, 10, 0)];
        let requests = vec![listing(3, false, 10, 0)];

        let allocations = allocate(
            vec![scored(1, 3, 35.5), scored(2, 3, 95.8)],
            &donations,
            &requests,
        );

        assert_eq!(allocations.len(), 1);
        assert_eq!(allocations[0].donation_id, 2);
        assert_eq!(allocations[0].quantity, 10);
    }

    #[test]
    fn test_partial_fill_then_next_donation() {
        let donations = vec![listing(1, true, 3, 0), listing(2, true, 10, 0)];
        let requests = vec![listing(3, false, 8, 0)];

        let allocations = allocate(
            vec![scored(1, 3, 90.0), scored(2, 3, 80.0)],
            &donations,
            &requests,
        );

        let got: Vec<(i32, i32, i32)> = allocations
            .iter()
            .map(|a| (a.donation_id, a.request_id, a.quantity))
            .collect();
        assert_eq!(got, vec![(1, 3, 3), (2, 3, 5)]);
    }

    #[test]
    fn test_respects_already_fulfilled() {
        let donations = vec![listing(1, true, 10, 7)];
        let requests = vec![listing(2, false, 8, 2)];

        let allocations = allocate(vec![scored(1, 2, 50.0)], &donations, &requests);

        assert_eq!(allocations[0].quantity, 3);
    }

    #[test]
    fn test_ties_keep_generation_order() {
        let donations = vec![listing(1, true, 5, 0)];
        let requests = vec![listing(2, false, 5, 0), listing(3, false, 5, 0)];

        let allocations = allocate(
            vec![scored(1, 2, 60.0), scored(1, 3, 60.0)],
            &donations,
            &requests,
        );

        assert_eq!(allocations.len(), 1);
        assert_eq!(allocations[0].request_id, 2);
    }

    #[test]
    fn test_greedy_is_not_globally_optimal() {
        // (4,2) + (1,3) would serve both requests; greedy takes (1,2) first
        // and request 3 is left without a compatible donation.
        let donations = vec![listing(1, true, 5, 0), listing(4, true, 5, 0)];
        let requests = vec![listing(2, false, 5, 0), listing(3, false, 5, 0)];

        let allocations = allocate(
            vec![scored(1, 2, 99.0), scored(4, 2, 98.0), scored(1, 3, 97.0)],
            &donations,
            &requests,
        );

        assert_eq!(allocations.len(), 1);
        assert_eq!((allocations[0].donation_id, allocations[0].request_id), (1, 2));
    }

    #[test]
    fn test_allocations_never_exceed_capacity() {
        let donations = vec![
            listing(1, true, 4, 0),
            listing(2, true, 7, 1),
            listing(3, true, 2, 0),
        ];
        let requests = vec![
            listing(10, false, 5, 0),
            listing(11, false, 3, 0),
            listing(12, false, 9, 4),
        ];

        let mut candidates = Vec::new();
        let mut score = 100.0;
        for d in &donations {
            for r in &requests {
                candidates.push(scored(d.id, r.id, score));
                score -= 7.0;
            }
        }

        let allocations = allocate(candidates, &donations, &requests);

        for book in donations.iter() {
            let total: i32 = allocations
                .iter()
                .filter(|a| a.donation_id == book.id)
                .map(|a| a.quantity)
                .sum();
            assert!(total <= book.available(), "donation {} over-allocated", book.id);
        }
        for book in requests.iter() {
            let total: i32 = allocations
                .iter()
                .filter(|a| a.request_id == book.id)
                .map(|a| a.quantity)
                .sum();
            assert!(total <= book.available(), "request {} over-allocated", book.id);
        }
        assert!(allocations.iter().all(|a| a.quantity > 0));
    }

    #[test]
    fn test_unknown_listing_ids_are_skipped() {
        let donations = vec![listing(1, true, 5, 0)];
        let requests = vec![listing(2, false, 5, 0)];

        let allocations = allocate(vec![scored(99, 2, 80.0)], &donations, &requests);
        assert!(allocations.is_empty());
    }
}
