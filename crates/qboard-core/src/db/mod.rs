//! Database layer for qboard
//!
//! Owns the sqlite schema and loads the question snapshots the search core
//! works on.

mod connection;
mod migrations;
mod repository;
mod seed;

pub use connection::Database;
pub use repository::{NewQuestion, QuestionStore, SqliteQuestionStore};
pub use seed::{import_seed, SeedData, SeedModule, SeedQuestion, SeedSummary, SeedUser};
