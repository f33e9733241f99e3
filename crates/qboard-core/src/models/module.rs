//! Course module model

use serde::{Deserialize, Serialize};

/// A course/subject grouping that questions are tagged with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub id: i64,
    /// Short code, e.g. `COMP1841`
    pub code: String,
    pub name: String,
}
