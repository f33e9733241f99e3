//! Board-level views over a snapshot: title suggestions, recent questions,
//! activity statistics.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Question;
use crate::search::engine::{sort_results, SortMode};
use crate::search::matcher::contains;

/// Question count for one module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleActivity {
    pub module_id: i64,
    pub module_code: String,
    pub module_name: String,
    pub question_count: usize,
}

/// Headline numbers for the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardStatistics {
    pub total_questions: usize,
    /// Created in the current UTC calendar month
    pub questions_this_month: usize,
    /// Created on the current UTC day
    pub questions_today: usize,
    pub most_active_module: Option<ModuleActivity>,
}

/// Distinct titles containing `query`, newest first, at most `limit`.
pub fn suggest_titles(questions: &[Question], query: &str, limit: usize) -> Vec<String> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }

    let mut matching: Vec<Question> = questions
        .iter()
        .filter(|question| contains(&question.title, query))
        .cloned()
        .collect();
    sort_results(&mut matching, SortMode::Newest, "");

    let mut seen = HashSet::new();
    matching
        .into_iter()
        .map(|question| question.title)
        .filter(|title| seen.insert(title.clone()))
        .take(limit)
        .collect()
}

/// The `limit` most recently created questions
pub fn recent(questions: &[Question], limit: usize) -> Vec<Question> {
    let mut latest = questions.to_vec();
    sort_results(&mut latest, SortMode::Newest, "");
    latest.truncate(limit);
    latest
}

/// Modules with at least one question, busiest first (ties by lower module id)
pub fn popular_modules(questions: &[Question], limit: usize) -> Vec<ModuleActivity> {
    let mut by_module: BTreeMap<i64, ModuleActivity> = BTreeMap::new();
    for question in questions {
        by_module
            .entry(question.module_id)
            .or_insert_with(|| ModuleActivity {
                module_id: question.module_id,
                module_code: question.module_code.clone(),
                module_name: question.module_name.clone(),
                question_count: 0,
            })
            .question_count += 1;
    }

    let mut activity: Vec<ModuleActivity> = by_module.into_values().collect();
    activity.sort_by(|a, b| {
        b.question_count
            .cmp(&a.question_count)
            .then_with(|| a.module_id.cmp(&b.module_id))
    });
    activity.truncate(limit);
    activity
}

/// Compute board statistics relative to `now_ms` (Unix ms)
pub fn statistics(questions: &[Question], now_ms: i64) -> BoardStatistics {
    let now = DateTime::from_timestamp_millis(now_ms).unwrap_or_else(Utc::now);
    let today = now.date_naive();

    let mut questions_this_month = 0;
    let mut questions_today = 0;
    for created in questions
        .iter()
        .filter_map(|question| DateTime::from_timestamp_millis(question.created_at))
    {
        let created = created.date_naive();
        if created.year() == today.year() && created.month() == today.month() {
            questions_this_month += 1;
        }
        if created == today {
            questions_today += 1;
        }
    }

    BoardStatistics {
        total_questions: questions.len(),
        questions_this_month,
        questions_today,
        most_active_module: popular_modules(questions, 1).into_iter().next(),
    }
}
