use std::path::Path;

use qboard_core::util::format_timestamp;
use qboard_core::Question;

use crate::commands::common::{find_question, load_questions, parse_question_id};
use crate::error::CliError;

pub fn format_question_detail(question: &Question) -> String {
    let mut detail = format!(
        "#{} {}\nModule: {} - {}\nAsked by {} on {}\n",
        question.id,
        question.title,
        question.module_code,
        question.module_name,
        question.author_name,
        format_timestamp(question.created_at)
    );
    if question.is_edited() {
        detail.push_str(&format!("Edited {}\n", format_timestamp(question.updated_at)));
    }
    if let Some(image_path) = &question.image_path {
        detail.push_str(&format!("Image: {image_path}\n"));
    }
    detail.push('\n');
    detail.push_str(&question.content);
    detail
}

pub fn run_show(id: &str, db_path: &Path) -> Result<(), CliError> {
    let id = parse_question_id(id)?;
    let questions = load_questions(db_path)?;
    let question = find_question(&questions, id)?;
    println!("{}", format_question_detail(question));
    Ok(())
}
