use std::future::Future;

use serde_json::{Map, Value};
use tokio::sync::broadcast;

use crate::error::Result;
use crate::types::{ContentSources, SearchHistoryEntry};

/// Supplies the content feeds an index is built from.
pub trait ContentProvider: Send + Sync {
    fn load(&self) -> impl Future<Output = Result<ContentSources>> + Send;
}

/// In-memory content is its own provider.
impl ContentProvider for ContentSources {
    async fn load(&self) -> Result<ContentSources> {
        Ok(self.clone())
    }
}

/// A preference was written to a [`PreferenceStore`].
#[derive(Debug, Clone, PartialEq)]
pub struct PreferenceChange {
    pub key: String,
    pub value: Value,
}

/// Key/value user preferences with change notification.
pub trait PreferenceStore: Send + Sync {
    fn get_preferences(&self) -> Result<Map<String, Value>>;
    fn set_preference(&self, key: &str, value: Value) -> Result<()>;
    /// Receive every subsequent successful `set_preference`.
    fn subscribe(&self) -> broadcast::Receiver<PreferenceChange>;
}

/// Best-effort usage tracking. Callers ignore failures.
pub trait AnalyticsSink: Send + Sync {
    fn track_search(&self, entry: &SearchHistoryEntry) -> Result<()>;
    fn track_feature_usage(&self, feature: &str) -> Result<()>;
}
