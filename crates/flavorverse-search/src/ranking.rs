//! Relevance scoring.
//!
//! A raw score accumulates three signals per entry:
//!
//! | Signal        | Points                                   |
//! |---------------|------------------------------------------|
//! | Exact phrase  | 100 when the search text contains the query tokens joined by spaces |
//! | Token overlap | 50 per equal token pair, 25 when one token contains the other |
//! | Fuzzy         | `similarity * 20` per token pair with similarity above 0.7 |
//!
//! Overlap and fuzzy are both counted for the same token pair, so an exact
//! token match earns 50 + 20. Relevance is the raw score times the weight of
//! the entry's content kind.

use serde::Serialize;

use flavorverse_core::types::ContentKind;

use crate::index::IndexEntry;
use crate::similarity::jaro_winkler;

pub const EXACT_PHRASE_BONUS: f64 = 100.0;
pub const EXACT_TOKEN_BONUS: f64 = 50.0;
pub const PARTIAL_TOKEN_BONUS: f64 = 25.0;
pub const FUZZY_THRESHOLD: f64 = 0.7;
pub const FUZZY_WEIGHT: f64 = 20.0;

/// Weight for content tags outside [`ContentKind`].
pub const DEFAULT_TYPE_WEIGHT: f64 = 0.5;

pub fn type_weight(kind: ContentKind) -> f64 {
    match kind {
        ContentKind::Cigar => 1.0,
        ContentKind::Manufacturer => 0.8,
        ContentKind::Pairing => 0.7,
    }
}

/// Weight for a raw content tag such as `"cigar"`.
pub fn type_weight_for_tag(tag: &str) -> f64 {
    ContentKind::from_tag(tag).map_or(DEFAULT_TYPE_WEIGHT, type_weight)
}

/// Raw, unbounded, non-negative score of `entry` against `query_tokens`.
///
/// An empty token list scores 0 against every entry, so queries made only of
/// short words (`"a b"`) match nothing.
pub fn score(query_tokens: &[String], entry: &IndexEntry) -> f64 {
    let mut score = 0.0;

    // An empty phrase is contained in everything; only real phrases count.
    if !query_tokens.is_empty() && entry.search_text.contains(&query_tokens.join(" ")) {
        score += EXACT_PHRASE_BONUS;
    }

    for query_token in query_tokens {
        for token in &entry.tokens {
            if token.contains(query_token.as_str()) || query_token.contains(token.as_str()) {
                score += if token == query_token { EXACT_TOKEN_BONUS } else { PARTIAL_TOKEN_BONUS };
            }
            let similarity = jaro_winkler(query_token, token);
            if similarity > FUZZY_THRESHOLD {
                score += similarity * FUZZY_WEIGHT;
            }
        }
    }
    score
}

pub fn relevance(score: f64, kind: ContentKind) -> f64 {
    score * type_weight(kind)
}

/// An index entry that matched a query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredResult {
    #[serde(flatten)]
    pub entry: IndexEntry,
    pub score: f64,
    pub relevance: f64,
}

/// Score every entry, keep the ones above zero and order them by relevance,
/// highest first. Equal relevance keeps index order.
pub fn rank<'a, I>(query_tokens: &[String], entries: I) -> Vec<ScoredResult>
where
    I: IntoIterator<Item = &'a IndexEntry>,
{
    let mut results: Vec<ScoredResult> = entries
        .into_iter()
        .filter_map(|entry| {
            let score = score(query_tokens, entry);
            (score > 0.0).then(|| ScoredResult {
                entry: entry.clone(),
                score,
                relevance: relevance(score, entry.kind),
            })
        })
        .collect();
    results.sort_by(|a, b| b.relevance.total_cmp(&a.relevance));
    results
}
