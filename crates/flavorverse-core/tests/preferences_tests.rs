use serde_json::json;
use tempfile::TempDir;

use flavorverse_core::analytics::{SessionAnalytics, SESSION_SEARCH_CAPACITY};
use flavorverse_core::preferences::{JsonFilePreferenceStore, MemoryPreferenceStore, FILTER_PREFERENCES_KEY};
use flavorverse_core::traits::{AnalyticsSink, PreferenceStore};
use flavorverse_core::types::SearchHistoryEntry;

#[test]
fn memory_store_broadcasts_changes() {
    let store = MemoryPreferenceStore::new();
    let mut rx = store.subscribe();
    store.set_preference(FILTER_PREFERENCES_KEY, json!({"wrapperTypes": ["Natural"]})).unwrap();

    let change = rx.try_recv().expect("change delivered");
    assert_eq!(change.key, FILTER_PREFERENCES_KEY);
    assert_eq!(change.value["wrapperTypes"][0], "Natural");
    assert!(store.get_preferences().unwrap().contains_key(FILTER_PREFERENCES_KEY));
}

#[test]
fn file_store_persists_across_reopen() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("nested").join("prefs.json");

    let store = JsonFilePreferenceStore::open(&path).unwrap();
    assert!(store.get_preferences().unwrap().is_empty());
    store.set_preference("theme", json!("dark")).unwrap();
    drop(store);

    let reopened = JsonFilePreferenceStore::open(&path).unwrap();
    assert_eq!(reopened.get_preferences().unwrap()["theme"], "dark");
    assert_eq!(reopened.path(), path.as_path());
}

#[test]
fn file_store_rejects_non_object_files() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("prefs.json");
    std::fs::write(&path, "[1, 2, 3]").unwrap();
    assert!(JsonFilePreferenceStore::open(&path).is_err());
}

#[test]
fn session_analytics_caps_searches_and_counts_features() {
    let analytics = SessionAnalytics::new();
    for i in 0..(SESSION_SEARCH_CAPACITY + 10) {
        let entry = SearchHistoryEntry {
            query: format!("q{i}"),
            result_count: i,
            timestamp: "2026-01-01T00:00:00.000Z".to_string(),
        };
        analytics.track_search(&entry).unwrap();
        analytics.track_feature_usage("search").unwrap();
    }
    let searches = analytics.searches();
    assert_eq!(searches.len(), SESSION_SEARCH_CAPACITY);
    assert_eq!(searches[0].query, format!("q{}", SESSION_SEARCH_CAPACITY + 9), "newest first");
    assert_eq!(analytics.feature_usage("search"), (SESSION_SEARCH_CAPACITY + 10) as u64);
    assert_eq!(analytics.feature_usage("journal"), 0);
}
