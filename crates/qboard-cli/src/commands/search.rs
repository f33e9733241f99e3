use std::path::Path;

use qboard_core::db::{QuestionStore, SqliteQuestionStore};
use qboard_core::search::{
    search_page, simple_search, SearchCriteria, SearchPage, SortMode, DEFAULT_PAGE_SIZE,
};
use qboard_core::util::{format_relative_time, unix_millis_now};
use qboard_core::Question;

use crate::commands::common::{
    format_question_lines, load_questions, normalize_search_query, open_database,
    question_to_list_item, resolve_module_filter, resolve_user_filter, QuestionListItem,
};
use crate::error::CliError;

pub struct SearchArgs<'a> {
    pub query: Option<&'a str>,
    pub module: Option<&'a str>,
    pub user: Option<&'a str>,
    pub sort: &'a str,
    pub page: i64,
}

pub fn search_questions(args: &SearchArgs<'_>, db_path: &Path) -> Result<SearchPage, CliError> {
    let db = open_database(db_path)?;
    let store = SqliteQuestionStore::new(db.connection());

    let mut criteria = SearchCriteria::new(args.query.unwrap_or_default().trim())
        .with_sort(SortMode::parse(args.sort));
    if let Some(module) = args.module {
        criteria = criteria.with_module(resolve_module_filter(&store.list_modules()?, module)?);
    }
    if let Some(user) = args.user {
        criteria = criteria.with_author(resolve_user_filter(&store.list_users()?, user)?);
    }

    let questions = store.snapshot()?;
    Ok(search_page(&questions, &criteria, args.page, DEFAULT_PAGE_SIZE)?)
}

pub fn format_search_page(result: &SearchPage, now_ms: i64) -> Vec<String> {
    if !result.searched {
        return vec!["Enter a query, --module or --user to search.".to_string()];
    }

    let page = &result.page;
    let mut lines = vec![format!(
        "Page {} of {} ({} results)",
        page.current_page, page.total_pages, page.total_count
    )];

    if page.items.is_empty() {
        lines.push("No questions found.".to_string());
    }

    for hit in &page.items {
        lines.push(format!(
            "#{:<5}  {:<10}  {}  ({}, {})",
            hit.id,
            hit.module_code,
            hit.title,
            hit.author_name,
            format_relative_time(hit.created_at, now_ms)
        ));
    }

    lines
}

pub fn run_search(args: &SearchArgs<'_>, as_json: bool, db_path: &Path) -> Result<(), CliError> {
    let result = search_questions(args, db_path)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        let now_ms = unix_millis_now();
        for line in format_search_page(&result, now_ms) {
            println!("{line}");
        }
    }

    Ok(())
}

/// Substring search over title and body, newest first, with no filters
pub fn simple_questions(query: &str, db_path: &Path) -> Result<Vec<Question>, CliError> {
    let query = normalize_search_query(query)?;
    Ok(simple_search(&load_questions(db_path)?, &query))
}

pub fn run_simple_search(query: &str, as_json: bool, db_path: &Path) -> Result<(), CliError> {
    let questions = simple_questions(query, db_path)?;

    if as_json {
        let json_items = questions
            .iter()
            .map(question_to_list_item)
            .collect::<Vec<QuestionListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else if questions.is_empty() {
        println!("No questions found.");
    } else {
        for line in format_question_lines(&questions) {
            println!("{line}");
        }
    }

    Ok(())
}
