mod common;

use proptest::prelude::*;
use proptest::sample::subsequence;

use flavorverse_core::types::{Bounds, CigarRecord, ContentItem, FilterState};
use flavorverse_search::ranking::score;
use flavorverse_search::{jaro_winkler, tokenize, IndexEntry, SearchOptions};

use common::{ready_engine, sample_sources};

proptest! {
    #[test]
    fn tokenize_is_idempotent(text in ".*") {
        let once = tokenize(&text);
        let twice = tokenize(&once.join(" "));
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn tokens_are_lowercase_and_long_enough(text in ".*") {
        for token in tokenize(&text) {
            prop_assert!(token.chars().count() >= 3);
            prop_assert_eq!(token.clone(), token.to_lowercase());
        }
    }

    #[test]
    fn jaro_winkler_is_bounded_and_symmetric(a in "[a-z]{0,10}", b in "[a-z]{0,10}") {
        let ab = jaro_winkler(&a, &b);
        prop_assert!((0.0..=1.0).contains(&ab));
        prop_assert!((ab - jaro_winkler(&b, &a)).abs() < 1e-12);
        prop_assert_eq!(jaro_winkler(&a, &a), 1.0);
    }

    #[test]
    fn scores_are_never_negative(query in "[a-z ]{0,20}", name in "[a-z ]{0,20}") {
        let entry = IndexEntry::new(ContentItem::Cigar(CigarRecord { name: Some(name), ..Default::default() }), 0);
        prop_assert!(score(&tokenize(&query), &entry) >= 0.0);
    }

    #[test]
    fn phrase_match_never_scores_lower(prefix in "[a-z]{3,8}", suffix in "[a-z]{3,8}") {
        let query = tokenize(&format!("{prefix} {suffix}"));
        let phrase = IndexEntry::new(ContentItem::Cigar(CigarRecord { name: Some(format!("{prefix} {suffix}")), ..Default::default() }), 0);
        let reversed = IndexEntry::new(ContentItem::Cigar(CigarRecord { name: Some(format!("{suffix} {prefix}")), ..Default::default() }), 1);
        prop_assert!(score(&query, &phrase) >= score(&query, &reversed));
    }

    #[test]
    fn filters_never_add_results(
        wrappers in subsequence(vec!["Maduro", "Connecticut", "Habano"], 0..=3),
        flavors in subsequence(vec!["cedar", "cocoa", "pepper", "honey"], 0..=4),
        max_price in 0.0f64..100.0,
        query in prop::sample::select(vec!["cohiba", "maduro", "cedar", "padron", "rum"]),
    ) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut engine = runtime.block_on(ready_engine(&sample_sources()));
        let filters = FilterState {
            wrapper_types: wrappers.into_iter().map(String::from).collect(),
            flavor_tags: flavors.into_iter().map(String::from).collect(),
            price_range: Bounds::new(0.0, max_price),
            ..Default::default()
        };

        let options = SearchOptions::default();
        let unfiltered = engine.search_with_filters(query, &options, &FilterState::default());
        let filtered = engine.search_with_filters(query, &options, &filters);
        prop_assert!(filtered.total <= unfiltered.total);
        for result in &filtered.results {
            prop_assert!(unfiltered.results.contains(result));
        }
    }
}
