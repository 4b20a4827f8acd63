use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use flavorverse_core::types::{ContentItem, ContentKind, ContentSources};

use crate::tokenizer::tokenize;

/// One searchable record with its precomputed text and tokens.
///
/// `tokens` is always `tokenize(&search_text)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexEntry {
    #[serde(rename = "type")]
    pub kind: ContentKind,
    pub item: Arc<ContentItem>,
    /// Position of the record in its source list.
    pub source_index: usize,
    pub search_text: String,
    pub tokens: Vec<String>,
}

impl IndexEntry {
    pub fn new(item: ContentItem, source_index: usize) -> Self {
        let search_text = item.searchable_fields().join(" ").to_lowercase();
        let tokens = tokenize(&search_text);
        Self { kind: item.kind(), item: Arc::new(item), source_index, search_text, tokens }
    }

    /// `"{type}_{sourceIndex}"`, unique within an index.
    pub fn key(&self) -> String {
        entry_key(self.kind, self.source_index)
    }
}

pub fn entry_key(kind: ContentKind, source_index: usize) -> String {
    format!("{}_{}", kind, source_index)
}

/// Immutable token index over every content record.
///
/// Entries keep build order: cigars, then manufacturers, then pairing
/// lessons, each in source order. Reloading content means building a new
/// index, never patching one.
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    entries: Vec<IndexEntry>,
    by_key: HashMap<String, usize>,
}

impl SearchIndex {
    pub fn build(sources: &ContentSources) -> Self {
        let items = sources
            .cigars
            .iter()
            .cloned()
            .map(ContentItem::Cigar)
            .enumerate()
            .chain(sources.manufacturers.iter().cloned().map(ContentItem::Manufacturer).enumerate())
            .chain(sources.pairings.iter().cloned().map(ContentItem::Pairing).enumerate());

        let mut index = Self::default();
        for (source_index, item) in items {
            let entry = IndexEntry::new(item, source_index);
            index.by_key.insert(entry.key(), index.entries.len());
            index.entries.push(entry);
        }
        info!(
            entries = index.len(),
            cigars = index.count_of(ContentKind::Cigar),
            manufacturers = index.count_of(ContentKind::Manufacturer),
            pairings = index.count_of(ContentKind::Pairing),
            "search index built"
        );
        index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn get(&self, key: &str) -> Option<&IndexEntry> {
        self.by_key.get(key).map(|&i| &self.entries[i])
    }

    pub fn count_of(&self, kind: ContentKind) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }
}

pub fn build_index(sources: &ContentSources) -> SearchIndex {
    SearchIndex::build(sources)
}
