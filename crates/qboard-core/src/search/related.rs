//! "Related questions" discovery.
//!
//! A deliberately coarse proxy: questions in the same module come first,
//! questions sharing a title keyword come second. No scoring is involved.

use std::cmp::Reverse;

use crate::models::Question;
use crate::search::matcher::matches_any;

/// Title words must be strictly longer than this to count as keywords.
///
/// Distinct from the search token threshold; changing either one changes
/// which questions are shown.
pub const MIN_RELATED_KEYWORD_LEN: usize = 3;

/// Number of related questions shown next to a question
pub const DEFAULT_RELATED_LIMIT: usize = 5;

/// Lower-cased words of `title` (split on single spaces) longer than
/// [`MIN_RELATED_KEYWORD_LEN`].
pub fn related_keywords(title: &str) -> Vec<String> {
    title
        .to_lowercase()
        .split(' ')
        .filter(|word| word.chars().count() > MIN_RELATED_KEYWORD_LEN)
        .map(str::to_string)
        .collect()
}

/// Up to `limit` questions related to `subject`, excluding `subject` itself.
pub fn find_related(all: &[Question], subject: &Question, limit: usize) -> Vec<Question> {
    let keywords = related_keywords(&subject.title);
    let others = all.iter().filter(|question| question.id != subject.id);

    let mut related: Vec<&Question> = if keywords.is_empty() {
        others
            .filter(|question| question.module_id == subject.module_id)
            .collect()
    } else {
        others
            .filter(|question| {
                question.module_id == subject.module_id
                    || keywords
                        .iter()
                        .any(|keyword| matches_any(&question.title, &question.content, keyword))
            })
            .collect()
    };

    // Same-module tier (false) sorts before the keyword-only tier (true)
    related.sort_by_key(|question| {
        (
            question.module_id != subject.module_id,
            Reverse(question.created_at),
        )
    });
    related.truncate(limit);

    tracing::debug!(
        subject = %subject.id,
        keywords = keywords.len(),
        found = related.len(),
        "Related questions resolved"
    );
    related.into_iter().cloned().collect()
}
