//! Question store implementation

use crate::error::{Error, Result};
use crate::models::{Module, Question, QuestionId, User};
use crate::util::unix_millis_now;
use rusqlite::{params, Connection, OptionalExtension};

const QUESTION_COLUMNS: &str = "q.id, q.title, q.content, q.user_id, u.username, q.module_id,
        m.code, m.name, q.image_path, q.created_at, q.updated_at
     FROM questions q
     JOIN users u ON q.user_id = u.id
     JOIN modules m ON q.module_id = m.id";

/// Source of question snapshots for the search core
pub trait QuestionStore {
    /// Every question with author and module labels, newest first
    fn snapshot(&self) -> Result<Vec<Question>>;

    /// Get a question by ID
    fn get(&self, id: QuestionId) -> Result<Option<Question>>;
}

impl QuestionStore for Vec<Question> {
    fn snapshot(&self) -> Result<Vec<Question>> {
        Ok(self.clone())
    }

    fn get(&self, id: QuestionId) -> Result<Option<Question>> {
        Ok(self.iter().find(|question| question.id == id).cloned())
    }
}

/// A question about to be posted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub title: String,
    pub content: String,
    pub author_id: i64,
    pub module_id: i64,
    pub image_path: Option<String>,
    /// Creation time (Unix ms); now when `None`
    pub created_at: Option<i64>,
}

impl NewQuestion {
    /// Check the posting rules: title 5-200 characters, body 10-5000.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();
        check_length(&mut errors, "Title", &self.title, 5, 200);
        check_length(&mut errors, "Content", &self.content, 10, 5000);
        if self.author_id <= 0 {
            errors.push("Valid user selection is required".to_string());
        }
        if self.module_id <= 0 {
            errors.push("Valid module selection is required".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidInput(errors.join("; ")))
        }
    }
}

fn check_length(errors: &mut Vec<String>, field: &str, value: &str, min: usize, max: usize) {
    let value = value.trim();
    let len = value.chars().count();
    if value.is_empty() {
        errors.push(format!("{field} is required"));
    } else if len < min || len > max {
        errors.push(format!("{field} must be between {min} and {max} characters"));
    }
}

/// `SQLite` implementation of `QuestionStore`
pub struct SqliteQuestionStore<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteQuestionStore<'a> {
    /// Create a new store with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Register a user
    pub fn create_user(&self, username: &str, email: &str) -> Result<User> {
        let username = username.trim();
        let email = email.trim();
        if username.chars().count() < 3
            || username.chars().count() > 50
            || !username
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
        {
            return Err(Error::InvalidInput(format!(
                "Invalid username '{username}': 3-50 letters, numbers or underscores"
            )));
        }
        if !email.contains('@') {
            return Err(Error::InvalidInput(format!("Invalid email '{email}'")));
        }

        self.conn.execute(
            "INSERT INTO users (username, email, created_at) VALUES (?, ?, ?)",
            params![username, email, unix_millis_now()],
        )?;

        Ok(User {
            id: self.conn.last_insert_rowid(),
            username: username.to_string(),
            email: email.to_string(),
        })
    }

    /// Register a course module
    pub fn create_module(&self, code: &str, name: &str) -> Result<Module> {
        let code = code.trim();
        let name = name.trim();
        if !(2..=20).contains(&code.len())
            || !code
                .chars()
                .all(|ch| ch.is_ascii_uppercase() || ch.is_ascii_digit())
        {
            return Err(Error::InvalidInput(format!(
                "Invalid module code '{code}': 2-20 uppercase letters or digits"
            )));
        }
        if !(5..=100).contains(&name.chars().count()) {
            return Err(Error::InvalidInput(format!(
                "Module name '{name}' must be between 5 and 100 characters"
            )));
        }

        self.conn.execute(
            "INSERT INTO modules (code, name) VALUES (?, ?)",
            params![code, name],
        )?;

        Ok(Module {
            id: self.conn.last_insert_rowid(),
            code: code.to_string(),
            name: name.to_string(),
        })
    }

    /// Post a question and return it with its labels resolved
    pub fn create_question(&self, question: &NewQuestion) -> Result<Question> {
        question.validate()?;
        let created_at = question.created_at.unwrap_or_else(unix_millis_now);

        self.conn.execute(
            "INSERT INTO questions (title, content, user_id, module_id, image_path, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            params![
                question.title.trim(),
                question.content.trim(),
                question.author_id,
                question.module_id,
                question.image_path,
                created_at,
                created_at
            ],
        )?;

        let id = QuestionId::new(self.conn.last_insert_rowid());
        self.get(id)?.ok_or_else(|| Error::NotFound(id.to_string()))
    }

    /// All modules ordered by code
    pub fn list_modules(&self) -> Result<Vec<Module>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, code, name FROM modules ORDER BY code ASC")?;
        let modules = stmt
            .query_map([], |row| {
                Ok(Module {
                    id: row.get(0)?,
                    code: row.get(1)?,
                    name: row.get(2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(modules)
    }

    /// All users ordered by username
    pub fn list_users(&self) -> Result<Vec<User>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, username, email FROM users ORDER BY username ASC")?;
        let users = stmt
            .query_map([], |row| {
                Ok(User {
                    id: row.get(0)?,
                    username: row.get(1)?,
                    email: row.get(2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(users)
    }

    /// Parse a question from a database row
    fn parse_question(row: &rusqlite::Row<'_>) -> rusqlite::Result<Question> {
        Ok(Question {
            id: QuestionId::new(row.get(0)?),
            title: row.get(1)?,
            content: row.get(2)?,
            author_id: row.get(3)?,
            author_name: row.get(4)?,
            module_id: row.get(5)?,
            module_code: row.get(6)?,
            module_name: row.get(7)?,
            image_path: row.get(8)?,
            created_at: row.get(9)?,
            updated_at: row.get(10)?,
        })
    }
}

impl QuestionStore for SqliteQuestionStore<'_> {
    fn snapshot(&self) -> Result<Vec<Question>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {QUESTION_COLUMNS} ORDER BY q.created_at DESC, q.id DESC"
        ))?;

        let questions = stmt
            .query_map([], Self::parse_question)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        tracing::debug!("Loaded snapshot of {} questions", questions.len());
        Ok(questions)
    }

    fn get(&self, id: QuestionId) -> Result<Option<Question>> {
        let question = self
            .conn
            .query_row(
                &format!("SELECT {QUESTION_COLUMNS} WHERE q.id = ?"),
                params![id.get()],
                Self::parse_question,
            )
            .optional()?;
        Ok(question)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    fn setup() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn new_question(title: &str, author_id: i64, module_id: i64, at: i64) -> NewQuestion {
        NewQuestion {
            title: title.to_string(),
            content: "A body that is long enough".to_string(),
            author_id,
            module_id,
            image_path: None,
            created_at: Some(at),
        }
    }

    #[test]
    fn test_create_and_get() {
        let db = setup();
        let store = SqliteQuestionStore::new(db.connection());

        let user = store.create_user("alice", "alice@example.com").unwrap();
        let module = store.create_module("COMP1841", "Web Programming").unwrap();
        let question = store
            .create_question(&new_question("How to connect PDO", user.id, module.id, 1_000))
            .unwrap();

        assert_eq!(question.author_name, "alice");
        assert_eq!(question.module_code, "COMP1841");
        assert_eq!(question.module_name, "Web Programming");
        assert_eq!(question.created_at, 1_000);
        assert!(!question.is_edited());

        let fetched = store.get(question.id).unwrap().unwrap();
        assert_eq!(fetched, question);
        assert!(store.get(QuestionId::new(999)).unwrap().is_none());
    }

    #[test]
    fn test_snapshot_is_newest_first() {
        let db = setup();
        let store = SqliteQuestionStore::new(db.connection());
        let user = store.create_user("bob", "bob@example.com").unwrap();
        let module = store.create_module("COMP1842", "Databases 101").unwrap();

        store
            .create_question(&new_question("Older question", user.id, module.id, 1_000))
            .unwrap();
        store
            .create_question(&new_question("Newer question", user.id, module.id, 2_000))
            .unwrap();

        let titles: Vec<String> = store
            .snapshot()
            .unwrap()
            .into_iter()
            .map(|question| question.title)
            .collect();
        assert_eq!(titles, vec!["Newer question", "Older question"]);
    }

    #[test]
    fn test_unknown_module_is_rejected() {
        let db = setup();
        let store = SqliteQuestionStore::new(db.connection());
        let user = store.create_user("carol", "carol@example.com").unwrap();

        let result = store.create_question(&new_question("Dangling module", user.id, 42, 1));
        assert!(matches!(result, Err(Error::Sqlite(_))));
    }

    #[test]
    fn test_validation() {
        let mut question = new_question("Hi", 1, 1, 0);
        question.content = "short".to_string();
        let Err(Error::InvalidInput(message)) = question.validate() else {
            panic!("expected invalid input");
        };
        assert!(message.contains("Title must be between 5 and 200"));
        assert!(message.contains("Content must be between 10 and 5000"));

        let db = setup();
        let store = SqliteQuestionStore::new(db.connection());
        assert!(store.create_module("comp", "Lowercase code").is_err());
        assert!(store.create_user("a b", "x@example.com").is_err());
        assert!(store.create_user("dave", "not-an-email").is_err());
    }

    #[test]
    fn test_duplicate_module_code_fails() {
        let db = setup();
        let store = SqliteQuestionStore::new(db.connection());
        store.create_module("COMP1841", "Web Programming").unwrap();
        assert!(store.create_module("COMP1841", "Another name").is_err());
    }

    #[test]
    fn test_list_modules_and_users_sorted() {
        let db = setup();
        let store = SqliteQuestionStore::new(db.connection());
        store.create_module("COMP1842", "Databases 101").unwrap();
        store.create_module("COMP1841", "Web Programming").unwrap();
        store.create_user("zoe", "zoe@example.com").unwrap();
        store.create_user("adam", "adam@example.com").unwrap();

        let codes: Vec<String> = store
            .list_modules()
            .unwrap()
            .into_iter()
            .map(|module| module.code)
            .collect();
        assert_eq!(codes, vec!["COMP1841", "COMP1842"]);

        let names: Vec<String> = store
            .list_users()
            .unwrap()
            .into_iter()
            .map(|user| user.username)
            .collect();
        assert_eq!(names, vec!["adam", "zoe"]);
    }

    #[test]
    fn test_vec_store() {
        let questions = vec![Question::new(1, "t", "c"), Question::new(2, "u", "d")];
        assert_eq!(questions.snapshot().unwrap().len(), 2);
        assert_eq!(
            questions.get(QuestionId::new(2)).unwrap().unwrap().title,
            "u"
        );
    }
}
