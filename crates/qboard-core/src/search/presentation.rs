//! Render-ready views of search and related-question results.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{Question, QuestionId};
use crate::search::engine::{search, SearchCriteria};
use crate::search::matcher::highlight;
use crate::search::pagination::{paginate, Page};
use crate::util::truncate_with_ellipsis;

/// Excerpts keep this many characters of the plain-text body
pub const EXCERPT_MAX_CHARS: usize = 200;

/// Related-question titles are cut to this many characters in sidebars
pub const RELATED_TITLE_MAX_CHARS: usize = 60;

/// Plain-text excerpt of `body`: tags stripped, cut to
/// [`EXCERPT_MAX_CHARS`] characters with a trailing `...` when cut.
pub fn excerpt(body: &str) -> String {
    truncate_with_ellipsis(&strip_tags(body), EXCERPT_MAX_CHARS)
}

fn strip_tags(text: &str) -> String {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| Regex::new(r"<[^>]*>").expect("Invalid regex"))
        .replace_all(text, "")
        .into_owned()
}

/// One search result; the `_html` fields are already HTML-safe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: QuestionId,
    /// Raw title
    pub title: String,
    /// Escaped title with query terms highlighted
    pub title_html: String,
    /// Escaped, truncated body with query terms highlighted
    pub excerpt_html: String,
    pub module_code: String,
    pub author_id: i64,
    pub author_name: String,
    pub created_at: i64,
}

impl SearchHit {
    pub fn from_question(question: &Question, query: &str) -> Self {
        Self {
            id: question.id,
            title: question.title.clone(),
            title_html: highlight(&question.title, query),
            excerpt_html: highlight(&excerpt(&question.content), query),
            module_code: question.module_code.clone(),
            author_id: question.author_id,
            author_name: question.author_name.clone(),
            created_at: question.created_at,
        }
    }
}

/// A page of search hits plus the criteria that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPage {
    pub criteria: SearchCriteria,
    /// False when the criteria were inactive and no search ran
    pub searched: bool,
    pub page: Page<SearchHit>,
}

/// Search, paginate and highlight in one step.
///
/// Inactive criteria (no query, no filters) run no search and produce an
/// empty page, matching the search form's initial state.
pub fn search_page(
    questions: &[Question],
    criteria: &SearchCriteria,
    page: i64,
    page_size: usize,
) -> Result<SearchPage> {
    let searched = criteria.is_active();
    let results = if searched {
        search(questions, criteria)
    } else {
        Vec::new()
    };

    let query = criteria.trimmed_query();
    let page = paginate(results, page, page_size)?
        .map(|question| SearchHit::from_question(&question, query));

    Ok(SearchPage {
        criteria: criteria.clone(),
        searched,
        page,
    })
}

/// Related question summary; scores are never exposed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedQuestion {
    pub id: QuestionId,
    pub title: String,
    pub author_name: String,
    pub created_at: i64,
}

impl RelatedQuestion {
    /// Title cut for sidebar display
    pub fn short_title(&self) -> String {
        truncate_with_ellipsis(&self.title, RELATED_TITLE_MAX_CHARS)
    }
}

impl From<&Question> for RelatedQuestion {
    fn from(question: &Question) -> Self {
        Self {
            id: question.id,
            title: question.title.clone(),
            author_name: question.author_name.clone(),
            created_at: question.created_at,
        }
    }
}
