//! Database migrations.
//!
//! Each migration upgrades the schema by one version and runs when the
//! database is opened. The version lives in `PRAGMA user_version`.

use rusqlite::Connection;

use crate::error::EssayError;

/// Current schema version.
const CURRENT_VERSION: i32 = 1;

/// Get the current schema version; 0 for a new database.
pub fn get_version(conn: &Connection) -> Result<i32, EssayError> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| EssayError::Database(format!("Failed to get schema version: {e}")))
}

fn set_version(conn: &Connection, version: i32) -> Result<(), EssayError> {
    conn.execute_batch(&format!("PRAGMA user_version = {version};"))
        .map_err(|e| EssayError::Database(format!("Failed to set schema version: {e}")))
}

/// Run all pending migrations.
pub fn run(conn: &Connection) -> Result<(), EssayError> {
    let current = get_version(conn)?;

    if current >= CURRENT_VERSION {
        return Ok(());
    }

    for version in (current + 1)..=CURRENT_VERSION {
        tracing::info!(version, "migrating database schema");
        run_migration(conn, version)?;
        set_version(conn, version)?;
    }

    Ok(())
}

fn run_migration(conn: &Connection, version: i32) -> Result<(), EssayError> {
    match version {
        1 => migrate_v1(conn),
        _ => Err(EssayError::Database(format!(
            "Unknown migration version: {version}"
        ))),
    }
}

/// Migration v1: the `writing_sessions` table.
///
/// The task type is stored inline so a session keeps its rules even if the
/// catalog in the config changes later.
fn migrate_v1(conn: &Connection) -> Result<(), EssayError> {
    conn.execute_batch(
        r"
        CREATE TABLE IF NOT EXISTS writing_sessions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            created_at TEXT NOT NULL,
            task_name TEXT NOT NULL,
            min_words_count INTEGER NOT NULL,
            expected_minutes INTEGER NOT NULL,
            question TEXT NOT NULL DEFAULT '',
            answer TEXT NOT NULL DEFAULT '',
            started_at TEXT,
            completed_at TEXT,
            CHECK (completed_at IS NULL OR started_at IS NOT NULL)
        );

        CREATE INDEX IF NOT EXISTS idx_writing_sessions_created
        ON writing_sessions(created_at);
        ",
    )
    .map_err(|e| EssayError::Database(format!("Migration v1 failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migration_v1() {
        let conn = Connection::open_in_memory().unwrap();

        run(&conn).unwrap();
        assert_eq!(get_version(&conn).unwrap(), CURRENT_VERSION);

        conn.execute(
            "INSERT INTO writing_sessions (created_at, task_name, min_words_count, expected_minutes)
             VALUES ('2024-02-10T09:00:00.000000Z', 'IELTS General Task 1', 150, 20)",
            [],
        )
        .unwrap();
    }

    #[test]
    fn test_completed_requires_started() {
        let conn = Connection::open_in_memory().unwrap();
        run(&conn).unwrap();

        let result = conn.execute(
            "INSERT INTO writing_sessions
             (created_at, task_name, min_words_count, expected_minutes, completed_at)
             VALUES ('2024-02-10T09:00:00.000000Z', 'x', 1, 1, '2024-02-10T09:05:00.000000Z')",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_migration_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        run(&conn).unwrap();
        run(&conn).unwrap();

        assert_eq!(get_version(&conn).unwrap(), CURRENT_VERSION);
    }

    #[test]
    fn test_get_version_new_database() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(get_version(&conn).unwrap(), 0);
    }
}
