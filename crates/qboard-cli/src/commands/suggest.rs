use std::path::Path;

use qboard_core::search::suggest_titles;

use crate::commands::common::{load_questions, normalize_search_query};
use crate::error::CliError;

pub fn run_suggest(query: &str, limit: usize, db_path: &Path) -> Result<(), CliError> {
    let query = normalize_search_query(query)?;
    for title in suggest_titles(&load_questions(db_path)?, &query, limit) {
        println!("{title}");
    }
    Ok(())
}
