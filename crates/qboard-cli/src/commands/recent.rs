use std::path::Path;

use qboard_core::search::recent;

use crate::commands::common::{
    format_question_lines, load_questions, question_to_list_item, QuestionListItem,
};
use crate::error::CliError;

pub fn run_recent(limit: usize, as_json: bool, db_path: &Path) -> Result<(), CliError> {
    let questions = recent(&load_questions(db_path)?, limit);

    if as_json {
        let json_items = questions
            .iter()
            .map(question_to_list_item)
            .collect::<Vec<QuestionListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else {
        for line in format_question_lines(&questions) {
            println!("{line}");
        }
    }

    Ok(())
}
