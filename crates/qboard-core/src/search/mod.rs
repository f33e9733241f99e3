//! Question search for qboard
//!
//! Every function here works on an in-memory snapshot of questions handed in
//! by the caller; nothing reaches into storage. The pipeline is
//! filter -> score -> sort -> paginate, each stage usable on its own.

pub mod engine;
pub mod insights;
pub mod matcher;
pub mod pagination;
pub mod presentation;
pub mod related;
pub mod scorer;

pub use engine::{search, simple_search, SearchCriteria, SortMode};
pub use insights::{
    popular_modules, recent, statistics, suggest_titles, BoardStatistics, ModuleActivity,
};
pub use matcher::{contains, escape_html, highlight, matches_any};
pub use pagination::{paginate, Page, DEFAULT_PAGE_SIZE};
pub use presentation::{excerpt, search_page, RelatedQuestion, SearchHit, SearchPage};
pub use related::{find_related, DEFAULT_RELATED_LIMIT};
pub use scorer::score;
