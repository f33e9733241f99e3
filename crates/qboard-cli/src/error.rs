use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] qboard_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Question ID cannot be empty")]
    EmptyQuestionId,
    #[error("Invalid question ID: {0}")]
    InvalidQuestionId(String),
    #[error("Question not found: {0}")]
    QuestionNotFound(String),
    #[error("Search query cannot be empty")]
    EmptySearchQuery,
    #[error("Unknown module: {0}")]
    UnknownModule(String),
    #[error("Unknown user: {0}")]
    UnknownUser(String),
    #[error("Configuration error: {0}")]
    Config(String),
}
