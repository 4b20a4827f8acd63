use flavorverse_core::types::{Suggestion, SuggestionKind};

use crate::history::SearchHistory;

pub const WRAPPER_SUGGESTIONS: [&str; 5] = ["Maduro", "Connecticut", "Habano", "Natural", "Oscuro"];
pub const FLAVOR_SUGGESTIONS: [&str; 6] = ["chocolate", "spice", "vanilla", "coffee", "cedar", "cream"];

/// Query completions: earlier queries containing this one, then wrapper
/// names, then flavor words, capped at `max_total`.
///
/// At most `max_history` come from history. An earlier query equal to this
/// one is left out, and a query searched several times is suggested once.
pub fn generate_suggestions(
    query: &str,
    history: &SearchHistory,
    max_total: usize,
    max_history: usize,
) -> Vec<Suggestion> {
    let query_lower = query.to_lowercase();
    let mut suggestions: Vec<Suggestion> = Vec::new();

    for entry in history.iter() {
        if suggestions.len() >= max_history {
            break;
        }
        let previous = entry.query.as_str();
        if previous == query
            || !previous.to_lowercase().contains(&query_lower)
            || suggestions.iter().any(|s| s.text == previous)
        {
            continue;
        }
        suggestions.push(Suggestion { kind: SuggestionKind::History, text: previous.to_string() });
    }

    let fixed = WRAPPER_SUGGESTIONS
        .iter()
        .map(|w| (SuggestionKind::Wrapper, *w))
        .chain(FLAVOR_SUGGESTIONS.iter().map(|f| (SuggestionKind::Flavor, *f)));
    for (kind, text) in fixed {
        if text.to_lowercase().contains(&query_lower) {
            suggestions.push(Suggestion { kind, text: text.to_string() });
        }
    }

    suggestions.truncate(max_total);
    suggestions
}
