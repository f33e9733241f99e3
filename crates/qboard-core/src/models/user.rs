//! Board user model

use serde::{Deserialize, Serialize};

/// A student who asks questions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
}
