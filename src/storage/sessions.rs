//! Writing session storage.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, OptionalExtension, Row};

use super::Database;
use crate::error::EssayError;
use crate::session::{Lifecycle, Session, TaskType};

/// Record store for sessions.
pub trait SessionStore {
    /// Insert a new session and assign its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the session already has an id or the write fails.
    fn insert(&self, session: &mut Session) -> Result<(), EssayError>;

    /// Overwrite a stored session in place.
    ///
    /// # Errors
    ///
    /// Returns `EssayError::NotFound` if no row has the session's id.
    fn update(&self, session: &Session) -> Result<(), EssayError>;

    /// Fetch a session by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails or the row is corrupt.
    fn get(&self, id: i64) -> Result<Option<Session>, EssayError>;

    /// All sessions, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails or a row is corrupt.
    fn list(&self) -> Result<Vec<Session>, EssayError>;

    /// Delete a session; returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    fn delete(&self, id: i64) -> Result<bool, EssayError>;

    /// Insert or update, depending on whether the session has an id.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`SessionStore::insert`] or
    /// [`SessionStore::update`].
    fn save(&self, session: &mut Session) -> Result<(), EssayError> {
        if session.id.is_some() {
            self.update(session)
        } else {
            self.insert(session)
        }
    }

    /// Fetch a session by id, failing if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `EssayError::NotFound` for an unknown id.
    fn require(&self, id: i64) -> Result<Session, EssayError> {
        self.get(id)?
            .ok_or_else(|| EssayError::NotFound(format!("session {id}")))
    }
}

/// [`SessionStore`] backed by the `writing_sessions` table.
#[derive(Debug)]
pub struct SqliteSessionStore {
    db: Database,
}

const SELECT_COLUMNS: &str = r"SELECT id, created_at, task_name, min_words_count,
    expected_minutes, question, answer, started_at, completed_at
    FROM writing_sessions";

impl SqliteSessionStore {
    /// Create storage over an open database.
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// Create storage over a fresh in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be created.
    pub fn in_memory() -> Result<Self, EssayError> {
        Ok(Self::new(Database::open_in_memory()?))
    }
}

impl SessionStore for SqliteSessionStore {
    fn insert(&self, session: &mut Session) -> Result<(), EssayError> {
        if session.id.is_some() {
            return Err(EssayError::InvalidData(
                "session already has an id".to_string(),
            ));
        }

        let conn = self.db.connection();
        let task = session.task_type();

        conn.execute(
            r"INSERT INTO writing_sessions
              (created_at, task_name, min_words_count, expected_minutes,
               question, answer, started_at, completed_at)
              VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                encode_time(session.created_at()),
                task.name,
                task.min_words_count,
                task.expected_time_in_minutes,
                session.question(),
                session.answer(),
                session.started_at().map(encode_time),
                session.completed_at().map(encode_time),
            ],
        )
        .map_err(|e| EssayError::Database(format!("Failed to insert session: {e}")))?;

        session.id = Some(conn.last_insert_rowid());
        tracing::info!(id = ?session.id, task = %session.task_type().name, "session created");
        Ok(())
    }

    fn update(&self, session: &Session) -> Result<(), EssayError> {
        let Some(id) = session.id else {
            return Err(EssayError::InvalidData(
                "cannot update a session that was never saved".to_string(),
            ));
        };

        let task = session.task_type();
        let rows = self
            .db
            .connection()
            .execute(
                r"UPDATE writing_sessions SET
                  task_name = ?1,
                  min_words_count = ?2,
                  expected_minutes = ?3,
                  question = ?4,
                  answer = ?5,
                  started_at = ?6,
                  completed_at = ?7
                  WHERE id = ?8",
                params![
                    task.name,
                    task.min_words_count,
                    task.expected_time_in_minutes,
                    session.question(),
                    session.answer(),
                    session.started_at().map(encode_time),
                    session.completed_at().map(encode_time),
                    id,
                ],
            )
            .map_err(|e| EssayError::Database(format!("Failed to update session: {e}")))?;

        if rows == 0 {
            return Err(EssayError::NotFound(format!("session {id}")));
        }

        tracing::debug!(id, phase = %session.phase(), "session updated");
        Ok(())
    }

    fn get(&self, id: i64) -> Result<Option<Session>, EssayError> {
        let conn = self.db.connection();

        let row = conn
            .query_row(&format!("{SELECT_COLUMNS} WHERE id = ?1"), [id], read_row)
            .optional()
            .map_err(|e| EssayError::Database(format!("Failed to query session: {e}")))?;

        row.map(SessionRow::into_session).transpose()
    }

    fn list(&self) -> Result<Vec<Session>, EssayError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare(&format!(
                "{SELECT_COLUMNS} ORDER BY created_at DESC, id DESC"
            ))
            .map_err(|e| EssayError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([], read_row)
            .map_err(|e| EssayError::Database(format!("Failed to query sessions: {e}")))?;

        let mut sessions = Vec::new();
        for row in rows {
            let row = row.map_err(|e| EssayError::Database(e.to_string()))?;
            sessions.push(row.into_session()?);
        }

        Ok(sessions)
    }

    fn delete(&self, id: i64) -> Result<bool, EssayError> {
        let rows = self
            .db
            .connection()
            .execute("DELETE FROM writing_sessions WHERE id = ?1", [id])
            .map_err(|e| EssayError::Database(format!("Failed to delete session: {e}")))?;

        if rows > 0 {
            tracing::info!(id, "session deleted");
        }
        Ok(rows > 0)
    }
}

/// Raw column values, validated by [`SessionRow::into_session`].
struct SessionRow {
    id: i64,
    created_at: String,
    task_name: String,
    min_words_count: u32,
    expected_minutes: u32,
    question: String,
    answer: String,
    started_at: Option<String>,
    completed_at: Option<String>,
}

fn read_row(row: &Row<'_>) -> Result<SessionRow, rusqlite::Error> {
    Ok(SessionRow {
        id: row.get(0)?,
        created_at: row.get(1)?,
        task_name: row.get(2)?,
        min_words_count: row.get(3)?,
        expected_minutes: row.get(4)?,
        question: row.get(5)?,
        answer: row.get(6)?,
        started_at: row.get(7)?,
        completed_at: row.get(8)?,
    })
}

impl SessionRow {
    fn into_session(self) -> Result<Session, EssayError> {
        let started_at = self.started_at.as_deref().map(decode_time).transpose()?;
        let completed_at = self.completed_at.as_deref().map(decode_time).transpose()?;
        let lifecycle = Lifecycle::from_timestamps(started_at, completed_at)
            .map_err(|e| EssayError::InvalidData(format!("session {}: {e}", self.id)))?;

        Ok(Session::from_parts(
            Some(self.id),
            decode_time(&self.created_at)?,
            TaskType::new(self.task_name, self.min_words_count, self.expected_minutes),
            self.question,
            self.answer,
            lifecycle,
        ))
    }
}

/// Fixed-width RFC 3339 so text order matches time order.
fn encode_time(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn decode_time(s: &str) -> Result<DateTime<Utc>, EssayError> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| EssayError::InvalidData(format!("bad timestamp \"{s}\": {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Phase;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 10, 9, 0, 0).unwrap()
    }

    fn task_1() -> TaskType {
        TaskType::new("IELTS General Task 1", 150, 20)
    }

    fn create_test_storage() -> SqliteSessionStore {
        SqliteSessionStore::in_memory().unwrap()
    }

    #[test]
    fn test_insert_and_get_not_started() {
        let storage = create_test_storage();

        let mut session = Session::new(task_1(), t0());
        session.set_question("Describe the graph.").unwrap();
        storage.insert(&mut session).unwrap();
        assert!(session.id.is_some());

        let loaded = storage.get(session.id.unwrap()).unwrap().unwrap();
        assert_eq!(loaded, session);
        assert_eq!(loaded.phase(), Phase::NotStarted);
    }

    #[test]
    fn test_round_trip_every_phase() {
        let storage = create_test_storage();

        let mut session = Session::new(task_1(), t0());
        storage.save(&mut session).unwrap();
        let id = session.id.unwrap();

        session.start(t0() + Duration::seconds(10)).unwrap();
        session.set_answer("First draft of my essay.").unwrap();
        storage.save(&mut session).unwrap();
        assert_eq!(storage.require(id).unwrap(), session);

        session
            .finish(t0() + Duration::seconds(10) + Duration::milliseconds(312_250))
            .unwrap();
        storage.save(&mut session).unwrap();

        let loaded = storage.require(id).unwrap();
        assert_eq!(loaded, session);
        assert_eq!(loaded.elapsed_seconds(), Some(312));
        assert_eq!(loaded.summary_label(), "(5 words in 05:12)");
    }

    #[test]
    fn test_list_newest_first() {
        let storage = create_test_storage();

        for minutes in [5, 0, 10] {
            let mut session = Session::new(task_1(), t0() + Duration::minutes(minutes));
            storage.insert(&mut session).unwrap();
        }

        let listed = storage.list().unwrap();
        let created: Vec<_> = listed.iter().map(Session::created_at).collect();
        assert_eq!(
            created,
            vec![
                t0() + Duration::minutes(10),
                t0() + Duration::minutes(5),
                t0(),
            ]
        );
    }

    #[test]
    fn test_delete() {
        let storage = create_test_storage();

        let mut session = Session::new(task_1(), t0());
        storage.insert(&mut session).unwrap();

        let id = session.id.unwrap();
        assert!(storage.delete(id).unwrap());
        assert!(storage.get(id).unwrap().is_none());
        assert!(!storage.delete(id).unwrap());
    }

    #[test]
    fn test_update_unknown_id() {
        let storage = create_test_storage();

        let mut session = Session::new(task_1(), t0());
        session.id = Some(42);
        let err = storage.update(&session).unwrap_err();
        assert!(matches!(err, EssayError::NotFound(_)));

        let err = storage.require(42).unwrap_err();
        assert!(matches!(err, EssayError::NotFound(_)));
    }

    #[test]
    fn test_insert_twice_rejected() {
        let storage = create_test_storage();

        let mut session = Session::new(task_1(), t0());
        storage.insert(&mut session).unwrap();
        assert!(matches!(
            storage.insert(&mut session),
            Err(EssayError::InvalidData(_))
        ));
    }

    #[test]
    fn test_corrupt_timestamps_rejected() {
        let storage = create_test_storage();
        storage
            .db
            .connection()
            .execute(
                "INSERT INTO writing_sessions
                 (created_at, task_name, min_words_count, expected_minutes, started_at, completed_at)
                 VALUES ('2024-02-10T09:00:00.000000Z', 'x', 1, 1,
                         '2024-02-10T09:05:00.000000Z', '2024-02-10T09:01:00.000000Z')",
                [],
            )
            .unwrap();

        let err = storage.list().unwrap_err();
        assert!(matches!(err, EssayError::InvalidData(_)));
    }

    #[test]
    fn test_elapsed_survives_reload_with_sub_micro_instants() {
        let storage = create_test_storage();

        let mut session = Session::new(task_1(), t0());
        session.start(t0() + Duration::nanoseconds(999_999_500)).unwrap();
        session
            .finish(t0() + Duration::nanoseconds(2_999_999_000))
            .unwrap();
        storage.insert(&mut session).unwrap();

        let loaded = storage.require(session.id.unwrap()).unwrap();
        assert_eq!(loaded.elapsed_seconds(), session.elapsed_seconds());
        assert_eq!(loaded.summary_label(), session.summary_label());
        assert_eq!(loaded, session);
    }

    #[test]
    fn test_encode_time_is_fixed_width() {
        assert_eq!(encode_time(t0()), "2024-02-10T09:00:00.000000Z");
        assert_eq!(decode_time(&encode_time(t0())).unwrap(), t0());
    }
}
