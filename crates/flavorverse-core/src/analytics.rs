//! In-memory session analytics.

use std::collections::{BTreeMap, VecDeque};
use std::sync::Mutex;

use crate::error::{Error, Result};
use crate::traits::AnalyticsSink;
use crate::types::SearchHistoryEntry;

/// Searches kept per session.
pub const SESSION_SEARCH_CAPACITY: usize = 50;

#[derive(Debug, Default)]
struct Session {
    searches: VecDeque<SearchHistoryEntry>,
    feature_usage: BTreeMap<String, u64>,
}

/// Session-scoped analytics: the most recent searches (newest first) and a
/// usage counter per feature.
#[derive(Debug, Default)]
pub struct SessionAnalytics {
    session: Mutex<Session>,
}

impl SessionAnalytics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn searches(&self) -> Vec<SearchHistoryEntry> {
        self.session
            .lock()
            .map(|s| s.searches.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn feature_usage(&self, feature: &str) -> u64 {
        self.session
            .lock()
            .ok()
            .and_then(|s| s.feature_usage.get(feature).copied())
            .unwrap_or(0)
    }
}

fn poisoned() -> Error {
    Error::Operation("analytics session lock poisoned".to_string())
}

impl AnalyticsSink for SessionAnalytics {
    fn track_search(&self, entry: &SearchHistoryEntry) -> Result<()> {
        let mut session = self.session.lock().map_err(|_| poisoned())?;
        session.searches.push_front(entry.clone());
        session.searches.truncate(SESSION_SEARCH_CAPACITY);
        Ok(())
    }

    fn track_feature_usage(&self, feature: &str) -> Result<()> {
        let mut session = self.session.lock().map_err(|_| poisoned())?;
        *session.feature_usage.entry(feature.to_string()).or_insert(0) += 1;
        Ok(())
    }
}
