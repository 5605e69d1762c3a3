//! JSON output formatting.

use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::error::EssayError;
use crate::session::{Session, TaskCatalog};

/// Build the JSON value for one session, including derived measurements.
#[must_use]
pub fn session_to_value(session: &Session, now: DateTime<Utc>) -> Value {
    json!({
        "id": session.id,
        "created_at": session.created_at(),
        "task_type": session.task_type(),
        "question": session.question(),
        "answer": session.answer(),
        "phase": session.phase(),
        "started_at": session.started_at(),
        "completed_at": session.completed_at(),
        "words_count": session.words_count(),
        "meets_word_target": session.meets_word_target(),
        "timer": session.reading(now),
        "summary": session.summary_label(),
    })
}

/// Format sessions as JSON.
///
/// # Errors
///
/// Returns `EssayError::Parse` if JSON serialization fails.
pub fn format_sessions_json(sessions: &[Session], now: DateTime<Utc>) -> Result<String, EssayError> {
    let items: Vec<Value> = sessions
        .iter()
        .map(|session| session_to_value(session, now))
        .collect();
    let output = json!({
        "count": sessions.len(),
        "items": items,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format a single session as JSON.
///
/// # Errors
///
/// Returns `EssayError::Parse` if JSON serialization fails.
pub fn format_session_json(session: &Session, now: DateTime<Utc>) -> Result<String, EssayError> {
    Ok(serde_json::to_string_pretty(&session_to_value(session, now))?)
}

/// Format the task type catalog as JSON.
///
/// # Errors
///
/// Returns `EssayError::Parse` if JSON serialization fails.
pub fn format_task_types_json(catalog: &TaskCatalog) -> Result<String, EssayError> {
    let output = json!({
        "count": catalog.len(),
        "default": catalog.default_task(),
        "items": catalog,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}
