//! Query and document tokenization.

/// Tokens this short or shorter are dropped ("a", "of", "to", ...).
pub const MIN_TOKEN_LEN: usize = 3;

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Lowercase `text`, turn every run of punctuation into a single boundary,
/// split on whitespace and keep tokens of at least [`MIN_TOKEN_LEN`] chars.
///
/// Punctuation separates words rather than vanishing, so "cedar,leather"
/// yields two tokens instead of "cedarleather".
pub fn tokenize(text: &str) -> Vec<String> {
    let mut normalized = String::with_capacity(text.len());
    let mut in_punct = false;
    for c in text.to_lowercase().chars() {
        if is_word_char(c) || c.is_whitespace() {
            normalized.push(c);
            in_punct = false;
        } else if !in_punct {
            normalized.push(' ');
            in_punct = true;
        }
    }
    normalized
        .split_whitespace()
        .filter(|t| t.chars().count() >= MIN_TOKEN_LEN)
        .map(str::to_string)
        .collect()
}
