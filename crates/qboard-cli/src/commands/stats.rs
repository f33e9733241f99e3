use std::path::Path;

use qboard_core::search::{popular_modules, statistics, BoardStatistics, ModuleActivity};

use qboard_core::util::unix_millis_now;

use crate::commands::common::load_questions;
use crate::error::CliError;

const POPULAR_MODULE_COUNT: usize = 5;

pub fn format_statistics(stats: &BoardStatistics, popular: &[ModuleActivity]) -> Vec<String> {
    let mut lines = vec![
        format!("Total questions:  {}", stats.total_questions),
        format!("This month:       {}", stats.questions_this_month),
        format!("Today:            {}", stats.questions_today),
    ];

    if let Some(module) = &stats.most_active_module {
        lines.push(format!(
            "Most active:      {} ({} questions)",
            module.module_code, module.question_count
        ));
    }

    if !popular.is_empty() {
        lines.push(String::new());
        lines.push("Popular modules:".to_string());
        for module in popular {
            lines.push(format!(
                "  {:<10}  {:<40}  {}",
                module.module_code, module.module_name, module.question_count
            ));
        }
    }

    lines
}

pub fn run_stats(as_json: bool, db_path: &Path) -> Result<(), CliError> {
    let questions = load_questions(db_path)?;
    let stats = statistics(&questions, unix_millis_now());

    if as_json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        let popular = popular_modules(&questions, POPULAR_MODULE_COUNT);
        for line in format_statistics(&stats, &popular) {
            println!("{line}");
        }
    }

    Ok(())
}
