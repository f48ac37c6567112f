//! Label normalization and search input expansion

use once_cell::sync::Lazy;
use regex::Regex;

static NON_ALPHANUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// Gender/age qualifiers and noise words that never decide a category
const STOP_WORDS: &[&str] = &[
    "men", "mens", "man", "male", "women", "womens", "woman", "female", "ladies", "lady", "girl",
    "girls", "boy", "boys", "kid", "kids", "youth", "teen", "teens", "child", "children", "unisex",
    "uni", "all",
];

/// Normalize free text into a lowercase, alphanumeric-and-space token
///
/// `&` becomes the word `and`, every run of other characters becomes a
/// single space, and the result is trimmed. Total over any input.
pub fn normalize_token(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }

    let lowered = value.to_lowercase().replace('&', " and ");

    NON_ALPHANUMERIC
        .replace_all(&lowered, " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Singular form of a plural-looking token, if it has one
///
/// Only strips a single trailing `s`, and only from tokens longer than three
/// characters, so `bus` and `gas` are left alone.
pub fn naive_singular(token: &str) -> Option<&str> {
    if token.len() > 3 && token.ends_with('s') {
        Some(&token[..token.len() - 1])
    } else {
        None
    }
}

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

/// Drop one-letter fragments and stop words from a normalized string
pub fn strip_category_modifiers(normalized: &str) -> String {
    normalized
        .split(' ')
        .filter(|part| part.len() > 1 && !is_stop_word(part))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether a normalized label is a form placeholder rather than a category
pub fn is_invalid_category_value(normalized: &str) -> bool {
    normalized == "select"
        || normalized == "none"
        || normalized.starts_with("select ")
        || normalized.contains("selecta")
        || normalized.starts_with("choose")
}

/// Expand a normalized label into the strings tried against category tokens
///
/// Order: the stripped form, the original normalized form, then every word of
/// the stripped form with at least three characters. Duplicates and empty
/// strings are skipped.
pub fn build_search_inputs(normalized: &str) -> Vec<String> {
    let stripped = strip_category_modifiers(normalized);
    let mut inputs: Vec<String> = Vec::new();

    let mut push = |candidate: &str| {
        if !candidate.is_empty() && !inputs.iter().any(|i| i == candidate) {
            inputs.push(candidate.to_string());
        }
    };

    push(&stripped);
    push(normalized);

    for word in stripped.split(' ').filter(|w| w.len() >= 3) {
        push(word);
    }

    inputs
}
