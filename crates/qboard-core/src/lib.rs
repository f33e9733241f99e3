//! qboard-core - Core library for qboard
//!
//! This crate contains the shared models, the sqlite question store, and the
//! search core (filtering, relevance ranking, highlighting, related questions
//! and pagination) used by the qboard interfaces (CLI, HTTP API).

pub mod db;
pub mod error;
pub mod models;
pub mod search;
pub mod util;

pub use error::{Error, Result};
pub use models::{Module, Question, QuestionId, User};
