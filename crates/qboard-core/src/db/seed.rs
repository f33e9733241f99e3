//! Bulk import of boards from a JSON seed file

use std::collections::HashMap;

use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use super::repository::{NewQuestion, SqliteQuestionStore};
use crate::error::{Error, Result};
use crate::util::normalize_text_option;

/// A module entry in a seed file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedModule {
    pub code: String,
    pub name: String,
}

/// A user entry in a seed file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedUser {
    pub username: String,
    pub email: String,
}

/// A question entry; author and module are referenced by username and code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedQuestion {
    pub title: String,
    pub content: String,
    pub author: String,
    pub module: String,
    #[serde(default)]
    pub image_path: Option<String>,
    /// Creation time (Unix ms)
    #[serde(default)]
    pub created_at: Option<i64>,
}

/// Contents of a seed file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub modules: Vec<SeedModule>,
    #[serde(default)]
    pub users: Vec<SeedUser>,
    #[serde(default)]
    pub questions: Vec<SeedQuestion>,
}

impl SeedData {
    /// Parse a seed file from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Number of rows created by an import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub modules: usize,
    pub users: usize,
    pub questions: usize,
}

/// Import a seed file in a single transaction.
///
/// Questions may reference modules and users already in the database as
/// well as those in the file. Nothing is written if any entry fails.
pub fn import_seed(conn: &Connection, data: &SeedData) -> Result<SeedSummary> {
    let tx = conn.unchecked_transaction()?;
    let store = SqliteQuestionStore::new(&tx);

    let mut module_ids: HashMap<String, i64> = store
        .list_modules()?
        .into_iter()
        .map(|module| (module.code, module.id))
        .collect();
    let mut user_ids: HashMap<String, i64> = store
        .list_users()?
        .into_iter()
        .map(|user| (user.username, user.id))
        .collect();

    let mut summary = SeedSummary::default();

    for module in &data.modules {
        let created = store.create_module(&module.code, &module.name)?;
        module_ids.insert(created.code, created.id);
        summary.modules += 1;
    }

    for user in &data.users {
        let created = store.create_user(&user.username, &user.email)?;
        user_ids.insert(created.username, created.id);
        summary.users += 1;
    }

    for question in &data.questions {
        let author_id = *user_ids.get(question.author.trim()).ok_or_else(|| {
            Error::InvalidInput(format!(
                "Question '{}' references unknown user '{}'",
                question.title, question.author
            ))
        })?;
        let module_id = *module_ids.get(question.module.trim()).ok_or_else(|| {
            Error::InvalidInput(format!(
                "Question '{}' references unknown module '{}'",
                question.title, question.module
            ))
        })?;

        store.create_question(&NewQuestion {
            title: question.title.clone(),
            content: question.content.clone(),
            author_id,
            module_id,
            image_path: normalize_text_option(question.image_path.clone()),
            created_at: question.created_at,
        })?;
        summary.questions += 1;
    }

    tx.commit()?;
    tracing::info!(
        modules = summary.modules,
        users = summary.users,
        questions = summary.questions,
        "Imported seed data"
    );
    Ok(summary)
}
