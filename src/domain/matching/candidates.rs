use crate::models::Book;

/// Wildcard a request may use for title, grade level or language
pub const ANY: &str = "any";

/// A donation/request pair that passed the compatibility gates
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub donation: &'a Book,
    pub request: &'a Book,
}

/// Title is compared case-insensitively; grade level and language must be
/// equal unless the request asks for [`ANY`].
pub fn is_compatible(donation: &Book, request: &Book) -> bool {
    let wanted_title = request.title.to_lowercase();
    if donation.title.to_lowercase() != wanted_title && wanted_title != ANY {
        return false;
    }

    attribute_matches(&donation.grade_level, &request.grade_level)
        && attribute_matches(&donation.language, &request.language)
}

fn attribute_matches(offered: &Option<String>, wanted: &Option<String>) -> bool {
    offered == wanted || wanted.as_deref() == Some(ANY)
}

/// Donations outer, requests inner: the returned order is the tie-break
/// order for equal scores.
pub fn generate_candidates<'a>(donations: &'a [Book], requests: &'a [Book]) -> Vec<Candidate<'a>> {
    let mut candidates = Vec::new();

    for donation in donations.iter().filter(|d| d.available() > 0) {
        for request in requests.iter().filter(|r| r.available() > 0) {
            if is_compatible(donation, request) {
                candidates.push(Candidate { donation, request });
            }
        }
    }

    candidates
}
