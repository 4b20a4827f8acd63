//! flavorverse-search
//!
//! In-memory search over cigars, manufacturers and pairing lessons:
//! tokenization, Jaro-Winkler fuzzy matching, relevance ranking, filtering,
//! search history and suggestions. `SearchEngine` ties them together.

pub mod filter;
pub mod history;
pub mod index;
pub mod ranking;
pub mod search;
pub mod similarity;
pub mod suggest;
pub mod tokenizer;

pub use index::{build_index, IndexEntry, SearchIndex};
pub use ranking::ScoredResult;
pub use search::{EngineState, SearchEngine, SearchExport, SearchOptions, SearchResponse};
pub use similarity::{best_match, jaro_winkler};
pub use tokenizer::tokenize;
