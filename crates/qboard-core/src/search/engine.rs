//! Multi-criteria question search.
//!
//! A search is two independent stages over a snapshot: [`filter`] keeps the
//! questions matching every criterion, [`sort_results`] orders them. Both are
//! pure, so the same snapshot and criteria always give the same ordering.

use std::cmp::Reverse;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::Question;
use crate::search::matcher::matches_any;
use crate::search::scorer::score;

/// Requested result ordering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Most recently created first
    #[default]
    Newest,
    /// Oldest first
    Oldest,
    /// Highest relevance score first; newest first when there is no query
    Relevance,
    /// Title A-Z, ignoring case
    #[serde(rename = "title")]
    TitleAsc,
}

impl SortMode {
    /// Parse a request sort key. Unrecognized keys fall back to [`SortMode::Newest`].
    pub fn parse(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "oldest" => Self::Oldest,
            "relevance" => Self::Relevance,
            "title" | "title-asc" | "title_asc" => Self::TitleAsc,
            "newest" => Self::Newest,
            other => {
                if !other.is_empty() {
                    tracing::debug!("Unknown sort key {other:?}, using newest");
                }
                Self::Newest
            }
        }
    }

    /// The canonical request key
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::Relevance => "relevance",
            Self::TitleAsc => "title",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for SortMode {
    fn from(key: &str) -> Self {
        Self::parse(key)
    }
}

/// Filters and ordering for one search request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    /// Free-text query; empty matches every question
    pub query: String,
    /// Module filter, 0 for all modules
    pub module_id: i64,
    /// Author filter, 0 for all authors
    pub author_id: i64,
    pub sort: SortMode,
}

impl SearchCriteria {
    /// Criteria with the given query and no filters, newest first
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_module(mut self, module_id: i64) -> Self {
        self.module_id = module_id;
        self
    }

    #[must_use]
    pub const fn with_author(mut self, author_id: i64) -> Self {
        self.author_id = author_id;
        self
    }

    #[must_use]
    pub const fn with_sort(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self
    }

    /// The query with surrounding whitespace removed
    pub fn trimmed_query(&self) -> &str {
        self.query.trim()
    }

    /// Whether any criterion narrows the search.
    ///
    /// Request handlers only search when this holds; otherwise they show the
    /// empty search form.
    pub fn is_active(&self) -> bool {
        !self.trimmed_query().is_empty() || self.module_id > 0 || self.author_id > 0
    }

    /// Whether `question` satisfies every criterion
    pub fn matches(&self, question: &Question) -> bool {
        let query = self.trimmed_query();
        (query.is_empty() || matches_any(&question.title, &question.content, query))
            && (self.module_id <= 0 || question.module_id == self.module_id)
            && (self.author_id <= 0 || question.author_id == self.author_id)
    }
}

/// Filter then sort `questions` according to `criteria`.
///
/// Returns every matching question; pagination is a separate step.
pub fn search(questions: &[Question], criteria: &SearchCriteria) -> Vec<Question> {
    let mut results = filter(questions, criteria);
    sort_results(&mut results, criteria.sort, criteria.trimmed_query());
    tracing::debug!(
        query = criteria.trimmed_query(),
        module_id = criteria.module_id,
        author_id = criteria.author_id,
        sort = %criteria.sort,
        matched = results.len(),
        total = questions.len(),
        "Search completed"
    );
    results
}

/// Keep the questions matching `criteria`, preserving snapshot order
pub fn filter(questions: &[Question], criteria: &SearchCriteria) -> Vec<Question> {
    questions
        .iter()
        .filter(|question| criteria.matches(question))
        .cloned()
        .collect()
}

/// Order `results` in place. Every ordering is stable for ties.
pub fn sort_results(results: &mut [Question], sort: SortMode, query: &str) {
    let query = query.trim();
    match sort {
        SortMode::Oldest => results.sort_by_key(|question| question.created_at),
        SortMode::TitleAsc => results.sort_by_cached_key(|question| question.title.to_lowercase()),
        SortMode::Relevance if !query.is_empty() => results.sort_by_cached_key(|question| {
            (Reverse(score(question, query)), Reverse(question.created_at))
        }),
        SortMode::Relevance | SortMode::Newest => {
            results.sort_by_key(|question| Reverse(question.created_at));
        }
    }
}

/// Plain substring search: title or body contains `query`, newest first.
///
/// This is the quick-search mode; it ignores module/author filters and never
/// scores.
pub fn simple_search(questions: &[Question], query: &str) -> Vec<Question> {
    search(questions, &SearchCriteria::new(query))
}
