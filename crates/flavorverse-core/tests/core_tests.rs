use serde_json::json;
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

use flavorverse_core::content::{sources_from_feeds, JsonContentProvider, CIGAR_FEED, PAIRINGS_FEED, SPECS_FEED};
use flavorverse_core::error::Error;
use flavorverse_core::traits::ContentProvider;
use flavorverse_core::types::{ContentItem, ContentKind, YearOrText};

fn write_feeds(dir: &std::path::Path) {
    fs::write(
        dir.join(CIGAR_FEED),
        json!([
            {"name": "Cohiba Behike", "wrapper": "Maduro", "flavor": "chocolate and cedar", "price": 45.0},
            {"name": "Arturo Fuente", "wrapper": "Connecticut", "strength": "Medium"}
        ])
        .to_string(),
    )
    .unwrap();
    fs::write(
        dir.join(SPECS_FEED),
        json!({"manufacturers": [{"name": "Padron", "country": "Nicaragua", "established": 1964}]}).to_string(),
    )
    .unwrap();
    fs::write(
        dir.join(PAIRINGS_FEED),
        json!({"pairingEngineV3": {"ceuLessons": [
            {"focus": "Rum", "title": "Caribbean evenings", "keyPairings": [{"spirit": "Aged rum"}]}
        ]}})
        .to_string(),
    )
    .unwrap();
}

#[tokio::test]
async fn load_reads_all_three_feeds() {
    let tmp = TempDir::new().unwrap();
    write_feeds(tmp.path());

    let sources = JsonContentProvider::new(tmp.path()).load().await.expect("load");

    assert_eq!(sources.cigars.len(), 2);
    assert_eq!(sources.manufacturers.len(), 1);
    assert_eq!(sources.pairings.len(), 1);
    assert_eq!(sources.cigars[0].wrapper.as_deref(), Some("Maduro"));
    assert_eq!(sources.cigars[0].price, Some(45.0));
    assert_eq!(sources.pairings[0].key_pairings[0].spirit.as_deref(), Some("Aged rum"));
    assert!(matches!(sources.manufacturers[0].established, Some(YearOrText::Number(_))));
}

#[tokio::test]
async fn missing_feeds_degrade_to_empty_lists() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(CIGAR_FEED), json!([{"name": "Solo"}]).to_string()).unwrap();
    fs::write(tmp.path().join(SPECS_FEED), "{ not json").unwrap();

    let sources = JsonContentProvider::new(tmp.path())
        .with_timeout(Duration::from_secs(2))
        .load()
        .await
        .expect("load never fails on bad feeds");

    assert_eq!(sources.cigars.len(), 1);
    assert!(sources.manufacturers.is_empty(), "malformed feed contributes nothing");
    assert!(sources.pairings.is_empty(), "missing feed contributes nothing");
}

#[test]
fn malformed_records_are_skipped() {
    let cigars = json!([
        {"name": "Good"},
        {"name": "Bad price", "price": "twelve"},
        "not an object",
        {"name": "Also good", "wrapper": "Habano"}
    ]);
    let sources = sources_from_feeds(Some(cigars), Some(json!({"other": []})), Some(json!([])));
    let names: Vec<_> = sources.cigars.iter().filter_map(|c| c.name.as_deref()).collect();
    assert_eq!(names, vec!["Good", "Also good"]);
    assert!(sources.manufacturers.is_empty());
    assert!(sources.pairings.is_empty());
}

#[test]
fn searchable_fields_skip_missing_and_empty_values() {
    let sources = sources_from_feeds(
        Some(json!([{"name": "Padron 1964", "wrapper": "", "flavor": "cocoa"}])),
        Some(json!({"manufacturers": [{"name": "Davidoff", "established": "circa 1911"}]})),
        None,
    );
    let cigar = ContentItem::Cigar(sources.cigars[0].clone());
    assert_eq!(cigar.searchable_fields(), vec!["Padron 1964".to_string(), "cocoa".to_string()]);
    assert_eq!(cigar.kind(), ContentKind::Cigar);

    let maker = ContentItem::Manufacturer(sources.manufacturers[0].clone());
    assert_eq!(maker.searchable_fields(), vec!["Davidoff".to_string(), "circa 1911".to_string()]);
}

#[test]
fn content_load_error_names_the_feed() {
    let err = Error::ContentLoad { feed: SPECS_FEED.to_string(), reason: "boom".to_string() };
    assert!(err.to_string().contains("cigar-specs.json"));
}
