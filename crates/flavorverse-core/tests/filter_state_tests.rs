use serde_json::json;

use flavorverse_core::error::Error;
use flavorverse_core::types::{Availability, Bounds, FilterState, FilterUpdate};

#[test]
fn defaults_are_permissive() {
    let state = FilterState::default();
    assert!(state.wrapper_types.is_empty());
    assert_eq!(state.price_range, Bounds::new(0.0, 1000.0));
    assert_eq!(state.ratings, Bounds::new(0.0, 5.0));
    assert_eq!(state.availability, Availability::All);
}

#[test]
fn set_accepts_camel_and_snake_case_names() {
    let mut state = FilterState::default();
    state.set("wrapperTypes", json!(["Maduro"])).unwrap();
    state.set("strength_levels", json!(["Full"])).unwrap();
    state.set("priceRange", json!({"min": 5, "max": 20})).unwrap();
    state.set("availability", json!("available")).unwrap();

    assert_eq!(state.wrapper_types, vec!["Maduro".to_string()]);
    assert_eq!(state.strength_levels, vec!["Full".to_string()]);
    assert_eq!(state.price_range, Bounds::new(5.0, 20.0));
    assert_eq!(state.availability, Availability::Available);
}

#[test]
fn set_rejects_unknown_names_and_bad_values() {
    let mut state = FilterState::default();
    assert!(matches!(state.set("humidity", json!([])), Err(Error::UnknownFilter(_))));
    assert!(matches!(state.set("wrapperTypes", json!("Maduro")), Err(Error::InvalidFilterValue { .. })));
    assert_eq!(state, FilterState::default(), "failed updates leave the state alone");
}

#[test]
fn merge_overlays_partial_objects() {
    let mut state = FilterState::default();
    state.set("flavorTags", json!(["cedar"])).unwrap();
    state
        .merge(&json!({"wrapperTypes": ["Oscuro"], "somethingElse": true}))
        .unwrap();

    assert_eq!(state.wrapper_types, vec!["Oscuro".to_string()]);
    assert_eq!(state.flavor_tags, vec!["cedar".to_string()], "untouched keys survive a merge");
}

#[test]
fn merge_is_all_or_nothing() {
    let mut state = FilterState::default();
    let err = state.merge(&json!({"wrapperTypes": ["Oscuro"], "ratings": "high"}));
    assert!(err.is_err());
    assert!(state.wrapper_types.is_empty());
    assert!(state.merge(&json!(["not", "an", "object"])).is_err());
}

#[test]
fn serialized_state_round_trips_through_merge() {
    let mut original = FilterState::default();
    original.apply(FilterUpdate::Origin(vec!["Cuba".to_string()]));
    original.apply(FilterUpdate::Ratings(Bounds::new(3.5, 5.0)));
    let persisted = serde_json::to_value(&original).unwrap();
    assert!(persisted.get("wrapperTypes").is_some(), "persisted in camelCase");

    let mut restored = FilterState::default();
    restored.merge(&persisted).unwrap();
    assert_eq!(restored, original);
}

#[test]
fn update_names_match_parse_names() {
    for name in FilterUpdate::NAMES {
        let value = match name {
            "priceRange" | "ratings" => json!({"min": 0, "max": 1}),
            "availability" => json!("all"),
            _ => json!([]),
        };
        let update = FilterUpdate::parse(name, value).unwrap();
        assert_eq!(update.name(), name);
    }
}
