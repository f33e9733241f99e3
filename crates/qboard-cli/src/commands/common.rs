use std::env;
use std::path::{Path, PathBuf};

use qboard_core::db::{Database, QuestionStore, SqliteQuestionStore};
use qboard_core::util::{format_relative_time, unix_millis_now};
use qboard_core::{Module, Question, QuestionId, User};
use serde::Serialize;

use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct QuestionListItem {
    pub id: QuestionId,
    pub title: String,
    pub module_code: String,
    pub author_name: String,
    pub created_at: i64,
    pub relative_time: String,
}

pub fn resolve_db_path(cli_db_path: Option<PathBuf>) -> Result<PathBuf, CliError> {
    match cli_db_path.or_else(|| env::var_os("QBOARD_DB_PATH").map(PathBuf::from)) {
        Some(path) => Ok(path),
        None => default_db_path(),
    }
}

pub fn default_db_path() -> Result<PathBuf, CliError> {
    dirs::data_dir()
        .map(|dir| dir.join("qboard").join("qboard.db"))
        .ok_or_else(|| CliError::Config("Failed to resolve CLI data directory".to_string()))
}

pub fn open_database(path: &Path) -> Result<Database, CliError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    tracing::debug!("Using database at {}", path.display());
    Ok(Database::open(path)?)
}

pub fn load_questions(db_path: &Path) -> Result<Vec<Question>, CliError> {
    let db = open_database(db_path)?;
    let store = SqliteQuestionStore::new(db.connection());
    Ok(store.snapshot()?)
}

pub fn parse_question_id(id: &str) -> Result<QuestionId, CliError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        return Err(CliError::EmptyQuestionId);
    }
    trimmed
        .parse()
        .map_err(|_| CliError::InvalidQuestionId(trimmed.to_string()))
}

pub fn find_question(questions: &[Question], id: QuestionId) -> Result<&Question, CliError> {
    questions
        .iter()
        .find(|question| question.id == id)
        .ok_or_else(|| CliError::QuestionNotFound(id.to_string()))
}

pub fn normalize_search_query(query: &str) -> Result<String, CliError> {
    let normalized = query.trim();
    if normalized.is_empty() {
        return Err(CliError::EmptySearchQuery);
    }
    Ok(normalized.to_string())
}

/// Resolve a module filter given as an ID or a case-insensitive code
pub fn resolve_module_filter(modules: &[Module], value: &str) -> Result<i64, CliError> {
    let value = value.trim();
    modules
        .iter()
        .find(|module| {
            value.parse::<i64>().is_ok_and(|id| id == module.id)
                || module.code.eq_ignore_ascii_case(value)
        })
        .map(|module| module.id)
        .ok_or_else(|| CliError::UnknownModule(value.to_string()))
}

/// Resolve an author filter given as an ID or a username
pub fn resolve_user_filter(users: &[User], value: &str) -> Result<i64, CliError> {
    let value = value.trim();
    users
        .iter()
        .find(|user| value.parse::<i64>().is_ok_and(|id| id == user.id) || user.username == value)
        .map(|user| user.id)
        .ok_or_else(|| CliError::UnknownUser(value.to_string()))
}

pub fn question_to_list_item(question: &Question) -> QuestionListItem {
    let now_ms = unix_millis_now();
    QuestionListItem {
        id: question.id,
        title: question.title.clone(),
        module_code: question.module_code.clone(),
        author_name: question.author_name.clone(),
        created_at: question.created_at,
        relative_time: format_relative_time(question.created_at, now_ms),
    }
}

pub fn format_question_line(question: &Question, now_ms: i64) -> String {
    let id = format!("#{}", question.id);
    let title = question.title_preview(50);
    let relative_time = format_relative_time(question.created_at, now_ms);
    format!(
        "{id:<6}  {:<10}  {title:<50}  {}, {relative_time}",
        question.module_code, question.author_name
    )
}

pub fn format_question_lines(questions: &[Question]) -> Vec<String> {
    let now_ms = unix_millis_now();
    questions
        .iter()
        .map(|question| format_question_line(question, now_ms))
        .collect()
}
