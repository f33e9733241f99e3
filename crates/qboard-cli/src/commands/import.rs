use std::path::Path;

use qboard_core::db::{import_seed, SeedData, SeedSummary};

use crate::commands::common::open_database;
use crate::error::CliError;

pub fn import_file(seed_path: &Path, db_path: &Path) -> Result<SeedSummary, CliError> {
    let contents = std::fs::read_to_string(seed_path)?;
    let data = SeedData::from_json(&contents)?;
    let db = open_database(db_path)?;
    Ok(import_seed(db.connection(), &data)?)
}

pub fn run_import(seed_path: &Path, db_path: &Path) -> Result<(), CliError> {
    let summary = import_file(seed_path, db_path)?;
    println!(
        "Imported {} modules, {} users and {} questions",
        summary.modules, summary.users, summary.questions
    );
    Ok(())
}
