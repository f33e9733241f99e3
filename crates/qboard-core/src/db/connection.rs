//! Database connection management

use crate::error::Result;
use rusqlite::Connection;
use std::path::Path;

use super::migrations;

/// Database wrapper for a sqlite connection
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open a database at the given path, creating it if it doesn't exist
    ///
    /// Runs migrations automatically.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;
        tracing::debug!("Opened database at {}", path.as_ref().display());
        Self::from_connection(conn)
    }

    /// Open an in-memory database (useful for testing)
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        let database = Self { conn };
        database.configure()?;
        database.migrate()?;
        Ok(database)
    }

    /// Configure sqlite pragmas
    fn configure(&self) -> Result<()> {
        // WAL is unavailable for in-memory databases
        self.conn.pragma_update(None, "journal_mode", "WAL").ok();
        self.conn.pragma_update(None, "synchronous", "NORMAL")?;
        self.conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(())
    }

    /// Run database migrations
    fn migrate(&self) -> Result<()> {
        migrations::run(&self.conn)
    }

    /// Current schema version
    pub fn schema_version(&self) -> Result<i32> {
        migrations::get_version(&self.conn)
    }

    /// Get a reference to the underlying connection
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_in_memory() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.schema_version().unwrap(), migrations::CURRENT_VERSION);
    }

    #[test]
    fn test_pragmas_applied() {
        let tmp = tempdir().unwrap();
        let db = Database::open(tmp.path().join("qboard.db")).unwrap();
        let conn = db.connection();

        let synchronous: i64 = conn
            .pragma_query_value(None, "synchronous", |row| row.get(0))
            .unwrap();
        let foreign_keys: i64 = conn
            .pragma_query_value(None, "foreign_keys", |row| row.get(0))
            .unwrap();
        // NORMAL
        assert_eq!(synchronous, 1);
        assert_eq!(foreign_keys, 1);
    }

    #[test]
    fn test_open_file_is_idempotent() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("qboard.db");

        let first = Database::open(&path).unwrap();
        drop(first);
        let reopened = Database::open(&path).unwrap();
        assert_eq!(
            reopened.schema_version().unwrap(),
            migrations::CURRENT_VERSION
        );
    }
}
