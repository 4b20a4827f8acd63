use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::collections::{HashMap, VecDeque};

use flavorverse_core::types::SearchHistoryEntry;

pub const RECENT_SEARCHES: usize = 10;
pub const TOP_QUERIES: usize = 5;

/// ISO-8601 UTC timestamp with millisecond precision, e.g. `2026-10-18T09:30:00.123Z`.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryCount {
    pub query: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchStats {
    pub total_searches: usize,
    pub recent_searches: Vec<SearchHistoryEntry>,
    pub top_queries: Vec<QueryCount>,
    pub average_result_count: f64,
}

/// Bounded query log, newest first.
#[derive(Debug, Clone)]
pub struct SearchHistory {
    entries: VecDeque<SearchHistoryEntry>,
    capacity: usize,
}

impl SearchHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self { entries: VecDeque::with_capacity(capacity), capacity: capacity.max(1) }
    }

    /// Record a query, dropping the oldest entry once full.
    pub fn record(&mut self, query: &str, result_count: usize) -> SearchHistoryEntry {
        let entry = SearchHistoryEntry { query: query.to_string(), result_count, timestamp: now_iso() };
        self.entries.push_front(entry.clone());
        self.entries.truncate(self.capacity);
        entry
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &SearchHistoryEntry> {
        self.entries.iter()
    }

    pub fn to_vec(&self) -> Vec<SearchHistoryEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Most frequent queries. Ties go to the query seen most recently.
    pub fn top_queries(&self, n: usize) -> Vec<QueryCount> {
        let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
        for (position, entry) in self.entries.iter().enumerate() {
            counts.entry(entry.query.as_str()).or_insert((0, position)).0 += 1;
        }
        let mut ranked: Vec<(&str, usize, usize)> = counts.into_iter().map(|(q, (c, p))| (q, c, p)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
        ranked
            .into_iter()
            .take(n)
            .map(|(query, count, _)| QueryCount { query: query.to_string(), count })
            .collect()
    }

    pub fn stats(&self) -> SearchStats {
        let total: usize = self.entries.iter().map(|e| e.result_count).sum();
        let average_result_count = if self.entries.is_empty() { 0.0 } else { total as f64 / self.entries.len() as f64 };
        SearchStats {
            total_searches: self.entries.len(),
            recent_searches: self.entries.iter().take(RECENT_SEARCHES).cloned().collect(),
            top_queries: self.top_queries(TOP_QUERIES),
            average_result_count,
        }
    }
}
