//! Relevance heuristic used by the relevance sort.
//!
//! The weights are the board's historical values and are kept as-is so that
//! ranked output stays stable across storage engines and releases.

use crate::models::Question;
use crate::search::matcher::query_tokens;

/// Title contains the whole query
pub const TITLE_CONTAINS_BONUS: u32 = 10;
/// Title is exactly the query (on top of [`TITLE_CONTAINS_BONUS`])
pub const TITLE_EXACT_BONUS: u32 = 20;
/// Per non-overlapping occurrence of the whole query in the body
pub const BODY_OCCURRENCE_WEIGHT: u32 = 2;
/// Per query token found in the title
pub const TOKEN_IN_TITLE_BONUS: u32 = 5;
/// Per query token found in the body
pub const TOKEN_IN_BODY_BONUS: u32 = 1;

/// Score `question` against `query`. Higher is more relevant.
///
/// The query must be non-empty after trimming; an empty query scores 0.
pub fn score(question: &Question, query: &str) -> u32 {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return 0;
    }

    let title = question.title.to_lowercase();
    let body = question.content.to_lowercase();
    let mut score = 0u32;

    if title.contains(&query) {
        score += TITLE_CONTAINS_BONUS;
    }
    if title == query {
        score += TITLE_EXACT_BONUS;
    }

    let occurrences = u32::try_from(body.matches(query.as_str()).count()).unwrap_or(u32::MAX);
    score = score.saturating_add(occurrences.saturating_mul(BODY_OCCURRENCE_WEIGHT));

    for token in query_tokens(&query) {
        if title.contains(token) {
            score = score.saturating_add(TOKEN_IN_TITLE_BONUS);
        }
        if body.contains(token) {
            score = score.saturating_add(TOKEN_IN_BODY_BONUS);
        }
    }

    score
}
