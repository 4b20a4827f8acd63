//! The query orchestrator.
//!
//! `SearchEngine::new` returns an unready engine; `initialize` loads content,
//! builds the index and restores filter preferences. Until it resolves every
//! search answers with an empty response.
//!
//! Filter state is live, not snapshotted: `set_filter` between two searches
//! changes the second one. Callers that want a fixed filter pass it to
//! `search_with_filters`.

use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{debug, error, info, warn};

use flavorverse_core::config::EngineSettings;
use flavorverse_core::error::Result;
use flavorverse_core::preferences::FILTER_PREFERENCES_KEY;
use flavorverse_core::traits::{AnalyticsSink, ContentProvider, PreferenceChange, PreferenceStore};
use flavorverse_core::types::{ContentSources, FilterState, FilterUpdate, SearchHistoryEntry, Suggestion};

use crate::filter::apply_filters;
use crate::history::{now_iso, SearchHistory, SearchStats};
use crate::index::SearchIndex;
use crate::ranking::{rank, ScoredResult};
use crate::suggest::generate_suggestions;
use crate::tokenizer::tokenize;

pub const SEARCH_FEATURE: &str = "search";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineState {
    Uninitialized,
    Loading,
    Ready,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Keep at most this many results. Zero means no limit.
    pub limit: Option<usize>,
}

impl SearchOptions {
    pub fn with_limit(limit: usize) -> Self {
        Self { limit: Some(limit) }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub results: Vec<ScoredResult>,
    pub suggestions: Vec<Suggestion>,
    pub total: usize,
    /// Milliseconds, rounded to two decimals.
    pub execution_time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchExport {
    pub search_history: Vec<SearchHistoryEntry>,
    pub filter_state: FilterState,
    pub stats: SearchStats,
    pub exported_at: String,
}

pub struct SearchEngine {
    settings: EngineSettings,
    state: EngineState,
    index: SearchIndex,
    filters: FilterState,
    history: SearchHistory,
    preferences: Option<Arc<dyn PreferenceStore>>,
    preference_rx: Option<broadcast::Receiver<PreferenceChange>>,
    analytics: Option<Arc<dyn AnalyticsSink>>,
}

impl SearchEngine {
    pub fn new(settings: EngineSettings) -> Self {
        let history = SearchHistory::with_capacity(settings.history_capacity);
        Self {
            settings,
            state: EngineState::Uninitialized,
            index: SearchIndex::default(),
            filters: FilterState::default(),
            history,
            preferences: None,
            preference_rx: None,
            analytics: None,
        }
    }

    /// Persist filters to `store` and follow its `filterPreferences` changes.
    pub fn with_preferences(mut self, store: Arc<dyn PreferenceStore>) -> Self {
        self.preference_rx = Some(store.subscribe());
        self.preferences = Some(store);
        self
    }

    pub fn with_analytics(mut self, sink: Arc<dyn AnalyticsSink>) -> Self {
        self.analytics = Some(sink);
        self
    }

    /// Load content, build the index and restore saved filters.
    ///
    /// On failure the engine goes back to `Uninitialized` and keeps answering
    /// searches with empty responses.
    pub async fn initialize<P: ContentProvider>(&mut self, provider: &P) -> Result<()> {
        self.state = EngineState::Loading;
        match provider.load().await {
            Ok(sources) => {
                self.rebuild_index(&sources);
                self.restore_filter_preferences();
                self.state = EngineState::Ready;
                info!(entries = self.index.len(), "search engine ready");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "failed to initialize search engine");
                self.state = EngineState::Uninitialized;
                Err(e)
            }
        }
    }

    /// Replace the index with one built from `sources`. The old index stays
    /// in place until the new one is complete.
    pub fn rebuild_index(&mut self, sources: &ContentSources) {
        let index = SearchIndex::build(sources);
        self.index = index;
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == EngineState::Ready
    }

    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    pub fn filter_state(&self) -> &FilterState {
        &self.filters
    }

    pub fn history(&self) -> &SearchHistory {
        &self.history
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Search with the engine's current filters.
    pub fn search(&mut self, query: &str, options: &SearchOptions) -> SearchResponse {
        if !self.accepts(query) {
            return SearchResponse::default();
        }
        self.sync_filter_preferences();
        let filters = self.filters.clone();
        self.run(query, options, &filters)
    }

    /// Search with an explicit filter, ignoring the engine's own.
    pub fn search_with_filters(&mut self, query: &str, options: &SearchOptions, filters: &FilterState) -> SearchResponse {
        if !self.accepts(query) {
            return SearchResponse::default();
        }
        self.run(query, options, filters)
    }

    fn accepts(&self, query: &str) -> bool {
        self.is_ready() && !query.trim().is_empty()
    }

    fn run(&mut self, query: &str, options: &SearchOptions, filters: &FilterState) -> SearchResponse {
        let started = Instant::now();
        let tokens = tokenize(query);

        let mut results = apply_filters(rank(&tokens, self.index.entries()), filters);
        if let Some(limit) = options.limit.or(self.settings.default_limit).filter(|&l| l > 0) {
            results.truncate(limit);
        }

        let entry = self.history.record(query, results.len());
        self.track(&entry);
        let execution_time = (started.elapsed().as_secs_f64() * 1000.0 * 100.0).round() / 100.0;

        let suggestions = generate_suggestions(
            query,
            &self.history,
            self.settings.max_suggestions,
            self.settings.history_suggestions,
        );
        debug!(query, tokens = tokens.len(), total = results.len(), execution_time, "search finished");
        SearchResponse { total: results.len(), results, suggestions, execution_time }
    }

    fn track(&self, entry: &SearchHistoryEntry) {
        let Some(analytics) = &self.analytics else {
            return;
        };
        if let Err(e) = analytics.track_search(entry) {
            warn!(error = %e, "analytics track_search failed");
        }
        if let Err(e) = analytics.track_feature_usage(SEARCH_FEATURE) {
            warn!(error = %e, "analytics track_feature_usage failed");
        }
    }

    /// Set one filter by name (`wrapperTypes` or `wrapper_types`) and persist.
    pub fn set_filter(&mut self, name: &str, value: Value) -> Result<()> {
        let update = FilterUpdate::parse(name, value)?;
        self.apply_filter(update)
    }

    /// Apply one typed filter change and persist the whole filter state.
    ///
    /// Pending changes from other writers are merged first so the write does
    /// not clobber them.
    pub fn apply_filter(&mut self, update: FilterUpdate) -> Result<()> {
        self.sync_filter_preferences();
        debug!(filter = update.name(), "filter updated");
        self.filters.apply(update);
        self.save_filter_preferences()
    }

    pub fn reset_filters(&mut self) -> Result<()> {
        self.sync_filter_preferences();
        self.filters = FilterState::default();
        self.save_filter_preferences()
    }

    fn save_filter_preferences(&self) -> Result<()> {
        if let Some(store) = &self.preferences {
            store.set_preference(FILTER_PREFERENCES_KEY, serde_json::to_value(&self.filters)?)?;
        }
        Ok(())
    }

    fn restore_filter_preferences(&mut self) {
        let Some(store) = &self.preferences else {
            return;
        };
        let saved = match store.get_preferences() {
            Ok(mut prefs) => prefs.remove(FILTER_PREFERENCES_KEY),
            Err(e) => {
                warn!(error = %e, "could not read filter preferences");
                None
            }
        };
        if let Some(saved) = saved {
            match self.filters.merge(&saved) {
                Ok(()) => debug!("filter preferences restored"),
                Err(e) => warn!(error = %e, "ignoring stored filter preferences"),
            }
        }
    }

    /// Apply `filterPreferences` changes announced since the last sync.
    ///
    /// A lagged receiver has lost changes, so the stored value is read again.
    fn sync_filter_preferences(&mut self) {
        let Some(rx) = self.preference_rx.as_mut() else {
            return;
        };
        let mut lagged = false;
        loop {
            match rx.try_recv() {
                Ok(change) if change.key == FILTER_PREFERENCES_KEY => {
                    if let Err(e) = self.filters.merge(&change.value) {
                        warn!(error = %e, "ignoring filter preference change");
                    }
                }
                Ok(_) => {}
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "missed preference changes, re-reading the store");
                    lagged = true;
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
        if lagged {
            self.restore_filter_preferences();
        }
    }

    pub fn get_search_stats(&self) -> SearchStats {
        self.history.stats()
    }

    pub fn export_search_data(&mut self) -> SearchExport {
        self.sync_filter_preferences();
        SearchExport {
            search_history: self.history.to_vec(),
            filter_state: self.filters.clone(),
            stats: self.get_search_stats(),
            exported_at: now_iso(),
        }
    }
}
