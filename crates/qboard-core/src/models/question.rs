//! Question model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use crate::util::truncate_with_ellipsis;

/// Identifier of a question, assigned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(i64);

impl QuestionId {
    /// Wrap a raw row id
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw row id
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for QuestionId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// A question as seen by the search core.
///
/// Author and module labels are denormalized from their own tables so the
/// search core never needs to look anything up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier
    pub id: QuestionId,
    pub title: String,
    /// Plain text body
    pub content: String,
    pub author_id: i64,
    /// Display name of the author
    pub author_name: String,
    pub module_id: i64,
    /// Module code, e.g. `COMP1841`
    pub module_code: String,
    pub module_name: String,
    /// Opaque reference to an uploaded image
    #[serde(default)]
    pub image_path: Option<String>,
    /// Creation timestamp (Unix ms)
    pub created_at: i64,
    /// Last update timestamp (Unix ms)
    pub updated_at: i64,
}

impl Question {
    /// Create a question with the given id, title and body, timestamped now.
    ///
    /// Author and module references start empty; use the `with_*` methods to
    /// fill them in.
    #[must_use]
    pub fn new(id: i64, title: impl Into<String>, content: impl Into<String>) -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        Self {
            id: QuestionId::new(id),
            title: title.into(),
            content: content.into(),
            author_id: 0,
            author_name: String::new(),
            module_id: 0,
            module_code: String::new(),
            module_name: String::new(),
            image_path: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the author reference and display name
    #[must_use]
    pub fn with_author(mut self, id: i64, name: impl Into<String>) -> Self {
        self.author_id = id;
        self.author_name = name.into();
        self
    }

    /// Set the module reference and labels
    #[must_use]
    pub fn with_module(
        mut self,
        id: i64,
        code: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        self.module_id = id;
        self.module_code = code.into();
        self.module_name = name.into();
        self
    }

    /// Set both timestamps to `created_at`
    #[must_use]
    pub const fn with_created_at(mut self, created_at: i64) -> Self {
        self.created_at = created_at;
        self.updated_at = created_at;
        self
    }

    /// Whether the question was edited after it was posted
    #[must_use]
    pub const fn is_edited(&self) -> bool {
        self.updated_at != self.created_at
    }

    /// Title truncated to `max_len` characters, with `...` when cut
    #[must_use]
    pub fn title_preview(&self, max_len: usize) -> String {
        truncate_with_ellipsis(&self.title, max_len)
    }
}
