//! Output formatting for essay-timer.
//!
//! Sessions are rendered either as human-readable text or as JSON. Timer
//! values depend on the moment of rendering, so every formatter takes `now`.

mod json;
mod pretty;

use chrono::{DateTime, Utc};

use crate::cli::args::OutputFormat;
use crate::core::OverrunStyle;
use crate::error::EssayError;
use crate::session::{Session, TaskCatalog};

pub use json::*;
pub use pretty::*;

/// Format a list of sessions.
///
/// # Errors
///
/// Returns `EssayError::Parse` if JSON serialization fails.
pub fn format_sessions(
    sessions: &[Session],
    now: DateTime<Utc>,
    style: OverrunStyle,
    format: OutputFormat,
) -> Result<String, EssayError> {
    match format {
        OutputFormat::Pretty => Ok(format_sessions_pretty(sessions, now, style)),
        OutputFormat::Json => format_sessions_json(sessions, now),
    }
}

/// Format a single session.
///
/// # Errors
///
/// Returns `EssayError::Parse` if JSON serialization fails.
pub fn format_session(
    session: &Session,
    now: DateTime<Utc>,
    style: OverrunStyle,
    format: OutputFormat,
) -> Result<String, EssayError> {
    match format {
        OutputFormat::Pretty => Ok(format_session_pretty(session, now, style)),
        OutputFormat::Json => format_session_json(session, now),
    }
}

/// Format the task type catalog.
///
/// # Errors
///
/// Returns `EssayError::Parse` if JSON serialization fails.
pub fn format_task_types(catalog: &TaskCatalog, format: OutputFormat) -> Result<String, EssayError> {
    match format {
        OutputFormat::Pretty => Ok(format_task_types_pretty(catalog)),
        OutputFormat::Json => format_task_types_json(catalog),
    }
}
