//! Loading the JSON content feeds.
//!
//! Three feeds live side by side in a content directory:
//!
//! - `flavorverse_nodes.json`: an array of cigars
//! - `cigar-specs.json`: `{ "manufacturers": [...] }`
//! - `pairings.json`: `{ "pairingEngineV3": { "ceuLessons": [...] } }`
//!
//! A feed that is missing, unreadable, slow or malformed contributes an empty
//! list; a malformed record inside a feed is skipped. Neither aborts a load.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::EngineSettings;
use crate::error::{Error, Result};
use crate::traits::ContentProvider;
use crate::types::ContentSources;

pub const CIGAR_FEED: &str = "flavorverse_nodes.json";
pub const SPECS_FEED: &str = "cigar-specs.json";
pub const PAIRINGS_FEED: &str = "pairings.json";

const MANUFACTURERS_POINTER: &str = "/manufacturers";
const LESSONS_POINTER: &str = "/pairingEngineV3/ceuLessons";

pub struct JsonContentProvider {
    content_dir: PathBuf,
    timeout: Duration,
}

impl JsonContentProvider {
    pub fn new(content_dir: impl Into<PathBuf>) -> Self {
        Self { content_dir: content_dir.into(), timeout: EngineSettings::default().load_timeout() }
    }

    pub fn from_settings(settings: &EngineSettings, base: &Path) -> Self {
        Self::new(settings.content_dir_in(base)).with_timeout(settings.load_timeout())
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    async fn read_feed(&self, feed: &str) -> Result<Value> {
        let path = self.content_dir.join(feed);
        let load_err = |reason: String| Error::ContentLoad { feed: feed.to_string(), reason };
        let bytes = tokio::time::timeout(self.timeout, tokio::fs::read(&path))
            .await
            .map_err(|_| load_err(format!("timed out after {:?}", self.timeout)))?
            .map_err(|e| load_err(format!("{}: {}", path.display(), e)))?;
        serde_json::from_slice(&bytes).map_err(|e| load_err(e.to_string()))
    }

    async fn read_feed_or_none(&self, feed: &str) -> Option<Value> {
        match self.read_feed(feed).await {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(error = %e, "content feed unavailable, indexing it as empty");
                None
            }
        }
    }
}

impl ContentProvider for JsonContentProvider {
    async fn load(&self) -> Result<ContentSources> {
        debug!(dir = %self.content_dir.display(), "loading content feeds");
        let (cigars, specs, pairings) = tokio::join!(
            self.read_feed_or_none(CIGAR_FEED),
            self.read_feed_or_none(SPECS_FEED),
            self.read_feed_or_none(PAIRINGS_FEED),
        );
        let sources = sources_from_feeds(cigars, specs, pairings);
        info!(
            cigars = sources.cigars.len(),
            manufacturers = sources.manufacturers.len(),
            pairings = sources.pairings.len(),
            "content feeds loaded"
        );
        Ok(sources)
    }
}

/// Assemble sources from already parsed feed documents.
pub fn sources_from_feeds(cigars: Option<Value>, specs: Option<Value>, pairings: Option<Value>) -> ContentSources {
    ContentSources {
        cigars: cigars.map(|v| parse_records(CIGAR_FEED, v)).unwrap_or_default(),
        manufacturers: specs
            .and_then(|mut v| v.pointer_mut(MANUFACTURERS_POINTER).map(Value::take))
            .map(|v| parse_records(SPECS_FEED, v))
            .unwrap_or_default(),
        pairings: pairings
            .and_then(|mut v| v.pointer_mut(LESSONS_POINTER).map(Value::take))
            .map(|v| parse_records(PAIRINGS_FEED, v))
            .unwrap_or_default(),
    }
}

/// Decode an array of records, skipping the ones that do not fit `T`.
pub fn parse_records<T: DeserializeOwned>(feed: &str, value: Value) -> Vec<T> {
    let Value::Array(items) = value else {
        warn!(feed, "expected a JSON array of records");
        return Vec::new();
    };
    items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(feed, index = i, error = %e, "skipping malformed record");
                None
            }
        })
        .collect()
}
