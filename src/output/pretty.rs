//! Human-readable output formatting.

use chrono::{DateTime, Local, Utc};
use colored::Colorize;

use crate::core::OverrunStyle;
use crate::session::{Phase, Session, TaskCatalog};

/// A short colored status tag for a session.
fn phase_tag(session: &Session, now: DateTime<Utc>, style: OverrunStyle) -> String {
    match (session.phase(), session.reading(now)) {
        (Phase::InProgress, Some(reading)) => {
            let label = reading.label(style);
            if reading.is_overrun() {
                label.red().to_string()
            } else {
                label.yellow().to_string()
            }
        }
        (Phase::Completed, _) => "completed".green().to_string(),
        _ => "not started".dimmed().to_string(),
    }
}

fn format_local(t: DateTime<Utc>) -> String {
    t.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Format a list of sessions, newest first as given.
#[must_use]
pub fn format_sessions_pretty(sessions: &[Session], now: DateTime<Utc>, style: OverrunStyle) -> String {
    if sessions.is_empty() {
        return "Sessions (0)\n  No sessions yet. Create one with 'essay new'".to_string();
    }

    let mut output = format!("Sessions ({})\n", sessions.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for session in sessions {
        let id = session
            .id
            .map_or_else(|| "-".to_string(), |id| id.to_string());
        output.push_str(&format!(
            "{:>4}  {}  {}  {}\n",
            format!("#{id}").dimmed(),
            session.list_label(),
            session.summary_label().cyan(),
            phase_tag(session, now, style)
        ));
    }

    output
}

/// Format a single session in full.
#[must_use]
pub fn format_session_pretty(session: &Session, now: DateTime<Utc>, style: OverrunStyle) -> String {
    let task = session.task_type();
    let title = session
        .id
        .map_or_else(|| "Session".to_string(), |id| format!("Session #{id}"));

    let mut output = format!("{}  {}\n", title.bold(), phase_tag(session, now, style));
    output.push_str(&format!("  {}: {task}\n", "Task".dimmed()));
    output.push_str(&format!(
        "  {}: {}\n",
        "Created".dimmed(),
        format_local(session.created_at())
    ));

    if let Some(started) = session.started_at() {
        output.push_str(&format!("  {}: {}\n", "Started".dimmed(), format_local(started)));
    }
    if let Some(completed) = session.completed_at() {
        output.push_str(&format!(
            "  {}: {}\n",
            "Completed".dimmed(),
            format_local(completed)
        ));
    }

    output.push_str(&format!("\n{}\n", "Question:".bold()));
    if session.question().is_empty() {
        output.push_str(&format!("{}\n", "(no question yet)".dimmed()));
    } else {
        output.push_str(session.question());
        output.push('\n');
    }

    output.push_str(&format!("\n{}\n", "Your answer:".bold()));
    match session.phase() {
        Phase::NotStarted => {
            output.push_str(&format!("{}\n", "(start the session to write)".dimmed()));
        }
        Phase::InProgress => {
            output.push_str(session.answer());
            output.push('\n');
        }
        Phase::Completed => {
            output.push_str(&session.answer_with_stats());
            output.push('\n');
        }
    }

    let words = session.words_progress_label();
    let words = if session.meets_word_target() {
        words.green()
    } else {
        words.normal()
    };
    output.push_str(&format!("\n{words}"));

    if let Some(reading) = session.reading(now) {
        output.push_str(&format!("    {}", reading.label(style)));
    }
    output.push('\n');

    output
}

/// Format the task type catalog.
#[must_use]
pub fn format_task_types_pretty(catalog: &TaskCatalog) -> String {
    let mut output = format!("Task types ({})\n", catalog.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for (index, task) in catalog.iter().enumerate() {
        let marker = if index == 0 { " (default)".dimmed().to_string() } else { String::new() };
        output.push_str(&format!(
            "{:>3}. {}  {} words, {} min{marker}\n",
            index + 1,
            task.name.bold(),
            task.min_words_count,
            task.expected_time_in_minutes
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::TaskType;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 10, 9, 0, 0).unwrap()
    }

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_empty_list() {
        plain();
        let output = format_sessions_pretty(&[], t0(), OverrunStyle::Signed);
        assert!(output.contains("Sessions (0)"));
    }

    #[test]
    fn test_list_shows_countdown_and_summary() {
        plain();
        let mut session = Session::new(TaskType::new("IELTS General Task 1", 150, 20), t0());
        session.id = Some(3);
        session.start(t0()).unwrap();

        let output = format_sessions_pretty(
            &[session],
            t0() + Duration::seconds(30),
            OverrunStyle::Signed,
        );

        assert!(output.contains("#3"));
        assert!(output.contains("IELTS General Task 1"));
        assert!(output.contains("(0 words)"));
        assert!(output.contains("Time left: 19:30"));
    }

    #[test]
    fn test_completed_session_detail() {
        plain();
        let mut session = Session::new(TaskType::new("Short", 2, 5), t0());
        session.set_question("Why write?").unwrap();
        session.start(t0()).unwrap();
        session.set_answer("Because practice.").unwrap();
        session.finish(t0() + Duration::seconds(65)).unwrap();

        let output = format_session_pretty(&session, t0() + Duration::hours(1), OverrunStyle::Signed);

        assert!(output.contains("Why write?"));
        assert!(output.contains("Because practice.\n\n(2 words in 01:05)"));
        assert!(output.contains("Words: 2 of 2"));
        assert!(output.contains("Time spent: 01:05"));
    }

    #[test]
    fn test_overdue_respects_style() {
        plain();
        let mut session = Session::new(TaskType::new("Short", 2, 1), t0());
        session.start(t0()).unwrap();
        let later = t0() + Duration::seconds(90);

        assert!(format_session_pretty(&session, later, OverrunStyle::Signed)
            .contains("Time left: -00:30"));
        assert!(format_session_pretty(&session, later, OverrunStyle::Clamp)
            .contains("Time left: 00:00"));
    }

    #[test]
    fn test_task_types_pretty() {
        plain();
        let output = format_task_types_pretty(&TaskCatalog::ielts());
        assert!(output.contains("1. IELTS General Task 1  150 words, 20 min (default)"));
        assert!(output.contains("4. IELTS Academic Task 2  250 words, 40 min"));
    }
}
