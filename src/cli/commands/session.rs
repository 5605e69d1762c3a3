//! Session commands.

use std::io::Read;

use colored::Colorize;

use super::Context;
use crate::cli::args::{ConfirmArgs, NewArgs, OutputFormat, TextArgs};
use crate::core::{format_duration, Clock};
use crate::error::EssayError;
use crate::output::{format_session, format_sessions, format_task_types};
use crate::session::{Session, TaskType};
use crate::storage::SessionStore;

/// Create a session.
///
/// # Errors
///
/// Returns an error for an unknown task type or a failed write.
pub fn new_session<S: SessionStore, C: Clock>(
    ctx: &Context<S, C>,
    args: &NewArgs,
) -> Result<String, EssayError> {
    let mut session = ctx.engine.create_session();

    let mut task_type = match &args.task {
        Some(key) => ctx.engine.task_type(key)?.clone(),
        None => session.task_type().clone(),
    };
    if args.time.is_some() || args.words.is_some() {
        task_type = TaskType::new(
            format!("{} (custom)", task_type.name),
            args.words.unwrap_or(task_type.min_words_count),
            args.time.unwrap_or(task_type.expected_time_in_minutes),
        );
    }
    session.set_task_type(task_type)?;

    if let Some(question) = &args.question {
        session.set_question(question.as_str())?;
    }

    ctx.store.insert(&mut session)?;

    match ctx.format {
        OutputFormat::Json => render(ctx, &session),
        OutputFormat::Pretty => {
            let id = session.id.unwrap_or_default();
            let mut output = Vec::new();
            output.push(format!("Session #{id} created").green().to_string());
            output.push(format!("   Task: {}", session.task_type()));
            output.push(String::new());
            if session.question().is_empty() {
                output.push(
                    format!("   Set the question with 'essay question {id} \"...\"'")
                        .dimmed()
                        .to_string(),
                );
            }
            output.push(
                format!("   Start the countdown with 'essay start {id} --yes'")
                    .dimmed()
                    .to_string(),
            );
            Ok(output.join("\n"))
        }
    }
}

/// List all sessions, newest first.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn list<S: SessionStore, C: Clock>(ctx: &Context<S, C>) -> Result<String, EssayError> {
    let sessions = ctx.store.list()?;
    format_sessions(&sessions, ctx.engine.now(), ctx.overrun, ctx.format)
}

/// Show one session.
///
/// # Errors
///
/// Returns `EssayError::NotFound` for an unknown id.
pub fn show<S: SessionStore, C: Clock>(ctx: &Context<S, C>, id: i64) -> Result<String, EssayError> {
    let session = ctx.store.require(id)?;
    render(ctx, &session)
}

/// List the task type catalog.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn types<S: SessionStore, C: Clock>(ctx: &Context<S, C>) -> Result<String, EssayError> {
    format_task_types(ctx.engine.catalog(), ctx.format)
}

/// Replace the question.
///
/// # Errors
///
/// Returns `EssayError::InvalidState` once the session has started.
pub fn set_question<S: SessionStore, C: Clock>(
    ctx: &Context<S, C>,
    args: &TextArgs,
) -> Result<String, EssayError> {
    let mut session = ctx.store.require(args.id)?;
    let text = read_text(args)?;
    session.set_question(text)?;
    ctx.store.update(&session)?;
    updated(ctx, &session, "Question saved")
}

/// Change the task type.
///
/// # Errors
///
/// Returns `EssayError::NotFound` for an unknown task type and
/// `EssayError::InvalidState` once the session has started.
pub fn set_task<S: SessionStore, C: Clock>(
    ctx: &Context<S, C>,
    id: i64,
    key: &str,
) -> Result<String, EssayError> {
    let mut session = ctx.store.require(id)?;
    ctx.engine.select_task_type(&mut session, key)?;
    ctx.store.update(&session)?;
    updated(ctx, &session, &format!("Task type set to {}", session.task_type()))
}

/// Start the countdown.
///
/// # Errors
///
/// Returns `EssayError::Unconfirmed` without `--yes` and
/// `EssayError::InvalidState` if the session was already started.
pub fn start<S: SessionStore, C: Clock>(
    ctx: &Context<S, C>,
    args: &ConfirmArgs,
) -> Result<String, EssayError> {
    let mut session = ctx.store.require(args.id)?;

    if !args.yes && session.can_start() {
        return Err(EssayError::Unconfirmed(format!(
            "Starting session #{} locks the question and task type and starts a {} countdown.\nUse --yes to confirm.",
            args.id,
            format_duration(session.task_type().expected_seconds())
        )));
    }

    ctx.engine.start(&mut session)?;
    ctx.store.update(&session)?;
    tracing::info!(id = args.id, "countdown started");

    match ctx.format {
        OutputFormat::Json => render(ctx, &session),
        OutputFormat::Pretty => {
            let task = session.task_type();
            let mut output = Vec::new();
            output.push(format!("Session #{} started!", args.id).green().to_string());
            output.push(format!("   Task: {task}"));
            if let Some(reading) = ctx.engine.reading(&session) {
                output.push(format!("   {}", reading.label(ctx.overrun)));
            }
            output.push(String::new());
            output.push(
                format!(
                    "   Write at least {} words, then 'essay finish {} --yes'",
                    task.min_words_count, args.id
                )
                .dimmed()
                .to_string(),
            );
            Ok(output.join("\n"))
        }
    }
}

/// Replace the answer.
///
/// # Errors
///
/// Returns `EssayError::InvalidState` unless the session is in progress.
pub fn set_answer<S: SessionStore, C: Clock>(
    ctx: &Context<S, C>,
    args: &TextArgs,
) -> Result<String, EssayError> {
    let mut session = ctx.store.require(args.id)?;
    let text = read_text(args)?;
    session.set_answer(text)?;
    ctx.store.update(&session)?;

    let mut message = format!("Answer saved. {}", session.words_progress_label());
    if let Some(reading) = ctx.engine.reading(&session) {
        message.push_str(&format!(", {}", reading.label(ctx.overrun)));
    }
    updated(ctx, &session, &message)
}

/// Finish the session.
///
/// # Errors
///
/// Returns `EssayError::Unconfirmed` without `--yes` and
/// `EssayError::InvalidState` unless the session is in progress.
pub fn finish<S: SessionStore, C: Clock>(
    ctx: &Context<S, C>,
    args: &ConfirmArgs,
) -> Result<String, EssayError> {
    let mut session = ctx.store.require(args.id)?;

    if !args.yes && session.can_finish() {
        return Err(EssayError::Unconfirmed(format!(
            "Finishing session #{} locks the answer for good.\nUse --yes to confirm.",
            args.id
        )));
    }

    ctx.engine.finish(&mut session)?;
    ctx.store.update(&session)?;
    tracing::info!(id = args.id, words = session.words_count(), "session finished");

    match ctx.format {
        OutputFormat::Json => render(ctx, &session),
        OutputFormat::Pretty => {
            let mut output = Vec::new();
            output.push(format!("Session #{} completed!", args.id).green().to_string());
            output.push(format!("   {}", session.summary_label()));
            let words = session.words_progress_label();
            if session.meets_word_target() {
                output.push(format!("   {}", words.green()));
            } else {
                output.push(format!("   {} (below target)", words.yellow()));
            }
            Ok(output.join("\n"))
        }
    }
}

/// Delete a session.
///
/// # Errors
///
/// Returns `EssayError::Unconfirmed` without `--yes` and
/// `EssayError::NotFound` for an unknown id.
pub fn delete<S: SessionStore, C: Clock>(
    ctx: &Context<S, C>,
    args: &ConfirmArgs,
) -> Result<String, EssayError> {
    let session = ctx.store.require(args.id)?;

    if !args.yes {
        return Err(EssayError::Unconfirmed(format!(
            "This will permanently delete session #{} ({}).\nUse --yes to confirm.",
            args.id,
            session.task_type().name
        )));
    }

    ctx.store.delete(args.id)?;

    match ctx.format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(
            &serde_json::json!({ "deleted": args.id }),
        )?),
        OutputFormat::Pretty => Ok(format!("Session #{} deleted.", args.id)),
    }
}

fn render<S: SessionStore, C: Clock>(
    ctx: &Context<S, C>,
    session: &Session,
) -> Result<String, EssayError> {
    format_session(session, ctx.engine.now(), ctx.overrun, ctx.format)
}

fn updated<S: SessionStore, C: Clock>(
    ctx: &Context<S, C>,
    session: &Session,
    message: &str,
) -> Result<String, EssayError> {
    match ctx.format {
        OutputFormat::Json => render(ctx, session),
        OutputFormat::Pretty => Ok(message.green().to_string()),
    }
}

/// The text argument, the file contents, or stdin for `"-"`.
fn read_text(args: &TextArgs) -> Result<String, EssayError> {
    if let Some(path) = &args.file {
        return std::fs::read_to_string(path).map_err(EssayError::from);
    }

    match args.text.as_deref() {
        Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(text) => Ok(text.to_string()),
        None => Err(EssayError::InvalidData(
            "provide the text or --file".to_string(),
        )),
    }
}
