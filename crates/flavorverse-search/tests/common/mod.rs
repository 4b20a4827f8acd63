#![allow(dead_code)]

use flavorverse_core::config::EngineSettings;
use flavorverse_core::types::{CigarRecord, ContentSources, KeyPairing, ManufacturerRecord, PairingLesson};
use flavorverse_search::SearchEngine;

pub fn cigar(name: &str, wrapper: &str, flavor: &str) -> CigarRecord {
    CigarRecord {
        name: Some(name.to_string()),
        wrapper: Some(wrapper.to_string()),
        flavor: Some(flavor.to_string()),
        ..Default::default()
    }
}

pub fn sample_sources() -> ContentSources {
    ContentSources {
        cigars: vec![
            CigarRecord { price: Some(45.0), ..cigar("Cohiba Behike", "Maduro", "chocolate and cedar") },
            CigarRecord {
                strength: Some("Mild".to_string()),
                price: Some(9.5),
                ..cigar("Arturo Fuente Hemingway", "Connecticut", "cream, cedar and nuts")
            },
            CigarRecord {
                origin: Some("Nicaragua".to_string()),
                rating: Some(4.6),
                ..cigar("Padron 1964 Anniversary", "Maduro", "cocoa, coffee and earth")
            },
            CigarRecord { discontinued: Some(true), ..cigar("Oliva Serie V", "Habano", "pepper and leather") },
        ],
        manufacturers: vec![ManufacturerRecord {
            name: Some("Padron".to_string()),
            country: Some("Nicaragua".to_string()),
            specialty: Some("box-pressed maduro".to_string()),
            ..Default::default()
        }],
        pairings: vec![PairingLesson {
            focus: Some("Rum".to_string()),
            title: Some("Caribbean evenings".to_string()),
            description: Some("Aged rum against a maduro wrapper".to_string()),
            key_pairings: vec![KeyPairing { spirit: Some("Demerara rum".to_string()) }],
        }],
    }
}

pub async fn ready_engine(sources: &ContentSources) -> SearchEngine {
    let mut engine = SearchEngine::new(EngineSettings::default());
    engine.initialize(sources).await.expect("initialize");
    engine
}
