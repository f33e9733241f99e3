use std::path::Path;

use qboard_core::search::{find_related, RelatedQuestion};
use qboard_core::util::{format_relative_time, unix_millis_now};

use crate::commands::common::{find_question, load_questions, parse_question_id};
use crate::error::CliError;

pub fn related_questions(
    id: &str,
    limit: usize,
    db_path: &Path,
) -> Result<Vec<RelatedQuestion>, CliError> {
    let id = parse_question_id(id)?;
    let questions = load_questions(db_path)?;
    let subject = find_question(&questions, id)?;

    Ok(find_related(&questions, subject, limit)
        .iter()
        .map(RelatedQuestion::from)
        .collect())
}

pub fn run_related(id: &str, limit: usize, as_json: bool, db_path: &Path) -> Result<(), CliError> {
    let related = related_questions(id, limit, db_path)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&related)?);
    } else if related.is_empty() {
        println!("No related questions.");
    } else {
        let now_ms = unix_millis_now();
        for question in &related {
            println!(
                "#{:<5}  {:<60}  {}, {}",
                question.id,
                question.short_title(),
                question.author_name,
                format_relative_time(question.created_at, now_ms)
            );
        }
    }

    Ok(())
}
