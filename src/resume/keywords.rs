//! Keyword frequency extraction.

use std::collections::HashMap;

use regex::Regex;

/// Common words excluded from keyword ranking.
const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "can", "had", "her", "was", "one",
    "our", "out", "day", "get", "has", "him", "his", "how", "man", "new", "now", "old", "see",
    "two", "way", "who", "boy", "did", "its", "let", "put", "say", "she", "too", "use",
];

/// Number of keywords returned.
const KEYWORD_LIMIT: usize = 20;

/// Rank lowercased word tokens (length ≥ 3, stop words excluded) by
/// frequency, descending. Ties break by first occurrence in the text, so
/// the output is deterministic. At most 20 keywords are returned.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let word = Regex::new(r"\b\w{3,}\b").unwrap();
    let lowered = text.to_lowercase();

    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();

    for m in word.find_iter(&lowered) {
        let token = m.as_str();
        if STOP_WORDS.contains(&token) {
            continue;
        }
        let count = counts.entry(token).or_insert(0);
        if *count == 0 {
            order.push(token);
        }
        *count += 1;
    }

    // Stable sort keeps first-seen order within equal counts.
    order.sort_by(|a, b| counts[b].cmp(&counts[a]));
    order
        .into_iter()
        .take(KEYWORD_LIMIT)
        .map(str::to_string)
        .collect()
}
