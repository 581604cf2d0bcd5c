//! Donation/request matching core.
//!
//! A matching run is three pure steps over in-memory listings:
//!
//! 1. **Candidate generation** ([`candidates`]): every donation × request pair
//!    that passes the title / grade level / language gates.
//! 2. **Scoring** ([`scoring`]): 70% donor proximity, 30% school priority.
//! 3. **Greedy allocation** ([`allocation`]): best score first, each pair gets
//!    `min(remaining donation, remaining request)` copies, single pass.
//!
//! Distance lookup and persistence are not part of this module; the
//! matching service feeds distances in and writes allocations out.
//!
//! ## Example
//!
//! ```
//! use books4all::domain::matching::{allocate, generate_candidates, ScoredCandidate};
//! use books4all::models::Book;
//!
//! let listing = |id: i32, is_donation: bool, quantity: i32| Book {
//!     id,
//!     owner_id: id * 10,
//!     is_donation,
//!     title: "Wings of Fire".to_string(),
//!     grade_level: None,
//!     language: Some("English".to_string()),
//!     condition: None,
//!     photo_url: None,
//!     quantity,
//!     fulfilled_qty: 0,
//!     listed_on: String::new(),
//! };
//!
//! let donations = vec![listing(1, true, 10)];
//! let requests = vec![listing(2, false, 4)];
//!
//! let scored: Vec<ScoredCandidate> = generate_candidates(&donations, &requests)
//!     .into_iter()
//!     .map(|c| ScoredCandidate::new(c.donation.id, c.request.id, Some(0.0), 5, 0))
//!     .collect();
//!
//! let allocations = allocate(scored, &donations, &requests);
//! assert_eq!(allocations.len(), 1);
//! assert_eq!(allocations[0].quantity, 4);
//! ```

pub mod allocation;
pub mod candidates;
pub mod scoring;

pub use allocation::{Allocation, allocate};
pub use candidates::{ANY, Candidate, generate_candidates, is_compatible};
pub use scoring::{ScoredCandidate, match_score, proximity_score, school_priority};
