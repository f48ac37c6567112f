//! Partial-match scoring between search inputs and category tokens

use serde::Serialize;

use super::entity::CategoryEntry;

/// Upper bound on what a single containing token can contribute
const MAX_CONTAINING_TOKEN_SCORE: usize = 8;

/// Minimum input length for a token contained in the input to count
const MIN_CONTAINED_INPUT_LEN: usize = 3;

/// Score a token set against search inputs
///
/// Returns `f64::INFINITY` as soon as any input equals any token. Otherwise
/// accumulates, per (token, input) pair:
/// - `min(len(token), 8)` when the input is a substring of the token
/// - `len(input)` when the token is a substring of an input of length >= 3
pub fn score_tokens(tokens: &[String], inputs: &[String]) -> f64 {
    let mut score = 0.0;

    for token in tokens {
        for input in inputs {
            if input == token {
                return f64::INFINITY;
            }

            if token.contains(input.as_str()) {
                score += token.len().min(MAX_CONTAINING_TOKEN_SCORE) as f64;
            } else if input.len() >= MIN_CONTAINED_INPUT_LEN && input.contains(token.as_str()) {
                score += input.len() as f64;
            }
        }
    }

    score
}

/// How a category was picked
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "score", rename_all = "snake_case")]
pub enum MatchKind {
    /// Some search input is literally one of the category's tokens
    Exact,
    /// Highest partial-match score across the catalog
    Scored(f64),
}

impl std::fmt::Display for MatchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::Scored(score) => write!(f, "score {}", score),
        }
    }
}

/// Pick the best-scoring entry
///
/// Only strictly greater scores replace the current best, so among equal
/// scores the earliest entry wins. Entries scoring zero never match.
pub fn best_scored_entry<'a>(
    entries: &'a [CategoryEntry],
    inputs: &[String],
) -> Option<(&'a CategoryEntry, MatchKind)> {
    let mut best: Option<(&CategoryEntry, f64)> = None;

    for entry in entries {
        let score = score_tokens(entry.tokens(), inputs);

        // Unreachable after an exact-token pass over the same inputs; kept so
        // this function is correct on its own.
        if score.is_infinite() {
            return Some((entry, MatchKind::Exact));
        }

        if score > best.map_or(0.0, |(_, s)| s) {
            best = Some((entry, score));
        }
    }

    best.map(|(entry, score)| (entry, MatchKind::Scored(score)))
}
