use std::collections::HashMap;
use std::env;
use std::ops::RangeInclusive;
use std::path::PathBuf;

use qboard_core::search::{DEFAULT_PAGE_SIZE, DEFAULT_RELATED_LIMIT};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub db_path: PathBuf,
    /// Search results per page
    pub page_size: usize,
    /// Default number of related questions
    pub related_limit: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let values: HashMap<String, String> = env::vars().collect();
        Self::from_lookup(|name| values.get(name).cloned())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = value_or_default(&lookup, "QBOARD_API_BIND_ADDR", "127.0.0.1:8080");
        let db_path = PathBuf::from(required_trimmed(&lookup, "QBOARD_DB_PATH")?);
        let page_size = parse_in_range(&lookup, "QBOARD_PAGE_SIZE", DEFAULT_PAGE_SIZE, 1..=100)?;
        let related_limit = parse_in_range(
            &lookup,
            "QBOARD_RELATED_LIMIT",
            DEFAULT_RELATED_LIMIT,
            1..=50,
        )?;

        Ok(Self {
            bind_addr,
            db_path,
            page_size,
            related_limit,
        })
    }
}

fn parse_in_range(
    lookup: impl Fn(&str) -> Option<String>,
    name: &str,
    default: usize,
    range: RangeInclusive<usize>,
) -> Result<usize, ConfigError> {
    let Some(raw) = optional_trimmed(lookup, name) else {
        return Ok(default);
    };
    let invalid = || {
        ConfigError::Invalid(format!(
            "{name} must be an integer in [{}, {}]",
            range.start(),
            range.end()
        ))
    };

    let value = raw.parse::<usize>().map_err(|_| invalid())?;
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(invalid())
    }
}

fn value_or_default(lookup: impl Fn(&str) -> Option<String>, name: &str, default: &str) -> String {
    optional_trimmed(lookup, name).unwrap_or_else(|| default.to_string())
}

fn required_trimmed(
    lookup: impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<String, ConfigError> {
    optional_trimmed(lookup, name).ok_or(ConfigError::MissingVar(name))
}

fn optional_trimmed(lookup: impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name).and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
