use std::collections::HashSet;

use crate::matching::sequence::similarity_ratio;

/// Weight of character-sequence similarity in the fuzzy signal.
pub const SEQUENCE_WEIGHT: f64 = 0.6;

/// Weight of whitespace-token overlap in the fuzzy signal.
pub const TOKEN_WEIGHT: f64 = 0.4;

/// Relevance of a candidate fingerprint to a query, in `[0, 1]`.
///
/// Case-insensitive, both sides trimmed. A literal substring match scores 1.0
/// and therefore never ranks below a fuzzy-only match; otherwise the score is
/// `0.6 · sequence similarity + 0.4 · token overlap`.
pub fn score(query: &str, candidate: &str) -> f64 {
    let q = query.trim().to_lowercase();
    let c = candidate.trim().to_lowercase();
    if q.is_empty() || c.is_empty() {
        return 0.0;
    }

    let containment = if c.contains(&q) { 1.0 } else { 0.0 };
    let fuzzy = SEQUENCE_WEIGHT * similarity_ratio(&q, &c) + TOKEN_WEIGHT * token_overlap(&q, &c);

    f64::max(containment, fuzzy).clamp(0.0, 1.0)
}

/// Share of the query's distinct whitespace tokens that also occur in the
/// candidate. Zero when the query has no tokens.
pub fn token_overlap(query: &str, candidate: &str) -> f64 {
    let q_tokens: HashSet<&str> = query.split_whitespace().collect();
    if q_tokens.is_empty() {
        return 0.0;
    }
    let c_tokens: HashSet<&str> = candidate.split_whitespace().collect();
    q_tokens.intersection(&c_tokens).count() as f64 / q_tokens.len() as f64
}
