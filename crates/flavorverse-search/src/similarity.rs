//! String similarity for typo-tolerant token matching.

use crate::tokenizer::MIN_TOKEN_LEN;

/// Leading characters considered for the Winkler prefix boost.
pub const WINKLER_PREFIX_LIMIT: usize = 4;

/// Weight of each shared prefix character.
pub const WINKLER_SCALE: f64 = 0.1;

/// Jaro-Winkler similarity in `[0, 1]`, computed over chars.
///
/// Equal strings score 1 (two empty strings included); a single empty side or
/// no matching characters scores 0.
pub fn jaro_winkler(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let Some(jaro) = jaro(&a, &b) else {
        return 0.0;
    };
    let prefix = a
        .iter()
        .zip(&b)
        .take(WINKLER_PREFIX_LIMIT)
        .take_while(|(x, y)| x == y)
        .count();
    jaro + WINKLER_SCALE * prefix as f64 * (1.0 - jaro)
}

/// Plain Jaro similarity, `None` when nothing matches.
fn jaro(a: &[char], b: &[char]) -> Option<f64> {
    let window = (a.len().max(b.len()) / 2).saturating_sub(1);
    let mut a_matched = vec![false; a.len()];
    let mut b_matched = vec![false; b.len()];
    let mut matches = 0usize;

    for (i, ca) in a.iter().enumerate() {
        let start = i.saturating_sub(window);
        let end = (i + window + 1).min(b.len());
        for j in start..end {
            if b_matched[j] || *ca != b[j] {
                continue;
            }
            a_matched[i] = true;
            b_matched[j] = true;
            matches += 1;
            break;
        }
    }
    if matches == 0 {
        return None;
    }

    let a_seq = a.iter().zip(&a_matched).filter(|(_, m)| **m).map(|(c, _)| c);
    let b_seq = b.iter().zip(&b_matched).filter(|(_, m)| **m).map(|(c, _)| c);
    let transpositions = a_seq.zip(b_seq).filter(|(x, y)| x != y).count();

    let m = matches as f64;
    let t = transpositions as f64;
    Some((m / a.len() as f64 + m / b.len() as f64 + (m - t / 2.0) / m) / 3.0)
}

/// Resolve free text to one of `targets`.
///
/// Tried in order: case-insensitive equality, then the first target that
/// contains the query, then the first target containing enough of the
/// query's words (at least two, or all of them for one-word queries).
pub fn best_match<'a, S: AsRef<str>>(query: &str, targets: &'a [S]) -> Option<&'a str> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return None;
    }
    let lowered: Vec<(String, &'a str)> = targets
        .iter()
        .map(|t| (t.as_ref().to_lowercase(), t.as_ref()))
        .collect();

    if let Some((_, t)) = lowered.iter().find(|(l, _)| *l == query) {
        return Some(*t);
    }
    if let Some((_, t)) = lowered.iter().find(|(l, _)| l.contains(query.as_str())) {
        return Some(*t);
    }

    let words: Vec<&str> = query.split_whitespace().collect();
    let needed = words.len().min(2);
    lowered
        .iter()
        .find(|(l, _)| {
            words
                .iter()
                .filter(|w| w.chars().count() >= MIN_TOKEN_LEN && l.contains(*w))
                .count()
                >= needed
        })
        .map(|(_, t)| *t)
}
