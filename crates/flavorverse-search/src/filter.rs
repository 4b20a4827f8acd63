//! Field-level result filtering.
//!
//! Only cigars carry filterable fields; every other content kind passes.
//! Active dimensions are ANDed and an empty list never restricts.

use flavorverse_core::types::{Availability, CigarRecord, FilterState};

use crate::ranking::ScoredResult;

/// Flavor words recognised in free-text flavor descriptions.
pub const FLAVOR_VOCABULARY: [&str; 15] = [
    "chocolate", "vanilla", "coffee", "cedar", "leather", "spice", "pepper", "cream", "honey", "tobacco", "earth",
    "wood", "nuts", "caramel", "cocoa",
];

/// Vocabulary words contained in `flavor_text`, in vocabulary order.
pub fn extract_flavor_tags(flavor_text: Option<&str>) -> Vec<&'static str> {
    let Some(text) = flavor_text else {
        return Vec::new();
    };
    let text = text.to_lowercase();
    FLAVOR_VOCABULARY.into_iter().filter(|f| text.contains(f)).collect()
}

fn accepts(allowed: &[String], value: Option<&String>) -> bool {
    allowed.is_empty() || value.is_some_and(|v| allowed.contains(v))
}

pub fn cigar_matches(cigar: &CigarRecord, filters: &FilterState) -> bool {
    if !accepts(&filters.wrapper_types, cigar.wrapper.as_ref())
        || !accepts(&filters.strength_levels, cigar.strength.as_ref())
        || !accepts(&filters.origin, cigar.origin.as_ref())
        || !accepts(&filters.size, cigar.size.as_ref())
    {
        return false;
    }

    if !filters.flavor_tags.is_empty() {
        let flavors = extract_flavor_tags(cigar.flavor.as_deref());
        let any = filters.flavor_tags.iter().any(|tag| flavors.contains(&tag.to_lowercase().as_str()));
        if !any {
            return false;
        }
    }

    // Unknown prices and ratings never exclude a cigar.
    if cigar.price.is_some_and(|p| !filters.price_range.contains(p)) {
        return false;
    }
    if cigar.rating.is_some_and(|r| !filters.ratings.contains(r)) {
        return false;
    }

    let discontinued = cigar.discontinued.unwrap_or(false);
    match filters.availability {
        Availability::All => true,
        Availability::Available => !discontinued,
        Availability::Discontinued => discontinued,
    }
}

pub fn matches(result: &ScoredResult, filters: &FilterState) -> bool {
    result.entry.item.as_cigar().map_or(true, |cigar| cigar_matches(cigar, filters))
}

/// Keep the results that pass `filters`, preserving order.
pub fn apply_filters(results: Vec<ScoredResult>, filters: &FilterState) -> Vec<ScoredResult> {
    results.into_iter().filter(|r| matches(r, filters)).collect()
}
