//! The session record and its state transitions.

use chrono::{DateTime, Local, SubsecRound, Utc};
use serde::Serialize;

use super::catalog::TaskType;
use super::lifecycle::{Lifecycle, Phase};
use super::timer::TimerReading;
use crate::core::{count_words, format_duration, seconds_between};
use crate::error::EssayError;

/// One writing-practice attempt.
///
/// Fields are private so every change goes through a guarded operation.
/// A rejected operation leaves the session untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    /// Store identity (`None` until persisted).
    pub id: Option<i64>,
    created_at: DateTime<Utc>,
    task_type: TaskType,
    question: String,
    answer: String,
    #[serde(flatten)]
    lifecycle: Lifecycle,
}

impl Session {
    /// Create a session that has not been started.
    ///
    /// Timestamps are kept to the microsecond, the precision of the store.
    #[must_use]
    pub fn new(task_type: TaskType, now: DateTime<Utc>) -> Self {
        Self {
            id: None,
            created_at: now.trunc_subsecs(6),
            task_type,
            question: String::new(),
            answer: String::new(),
            lifecycle: Lifecycle::NotStarted,
        }
    }

    /// Reassemble a session from stored parts.
    ///
    /// The lifecycle carries the timestamp invariants; build it with
    /// [`Lifecycle::from_timestamps`] when reading optional columns.
    #[must_use]
    pub const fn from_parts(
        id: Option<i64>,
        created_at: DateTime<Utc>,
        task_type: TaskType,
        question: String,
        answer: String,
        lifecycle: Lifecycle,
    ) -> Self {
        Self {
            id,
            created_at,
            task_type,
            question,
            answer,
            lifecycle,
        }
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub const fn task_type(&self) -> &TaskType {
        &self.task_type
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub const fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.lifecycle.phase()
    }

    #[must_use]
    pub const fn started_at(&self) -> Option<DateTime<Utc>> {
        self.lifecycle.started_at()
    }

    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.lifecycle.completed_at()
    }

    /// Whether the question and task type may still change.
    #[must_use]
    pub const fn prompt_editable(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::NotStarted)
    }

    /// Whether the answer is open for writing.
    #[must_use]
    pub const fn answer_editable(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::InProgress { .. })
    }

    /// Whether Start should be offered.
    #[must_use]
    pub const fn can_start(&self) -> bool {
        self.prompt_editable()
    }

    /// Whether Finish should be offered.
    #[must_use]
    pub const fn can_finish(&self) -> bool {
        self.answer_editable()
    }

    /// Change the task type.
    ///
    /// # Errors
    ///
    /// Returns `EssayError::InvalidState` once the session has started.
    pub fn set_task_type(&mut self, task_type: TaskType) -> Result<(), EssayError> {
        if !self.prompt_editable() {
            return Err(EssayError::invalid_state("change the task type of", self.phase()));
        }
        self.task_type = task_type;
        Ok(())
    }

    /// Replace the question.
    ///
    /// # Errors
    ///
    /// Returns `EssayError::InvalidState` once the session has started.
    pub fn set_question(&mut self, text: impl Into<String>) -> Result<(), EssayError> {
        if !self.prompt_editable() {
            return Err(EssayError::invalid_state("edit the question of", self.phase()));
        }
        self.question = text.into();
        Ok(())
    }

    /// Replace the answer.
    ///
    /// # Errors
    ///
    /// Returns `EssayError::InvalidState` unless the session is in progress.
    pub fn set_answer(&mut self, text: impl Into<String>) -> Result<(), EssayError> {
        if !self.answer_editable() {
            return Err(EssayError::invalid_state("edit the answer of", self.phase()));
        }
        self.answer = text.into();
        Ok(())
    }

    /// Start the countdown at `now`.
    ///
    /// Locks the question and task type and opens the answer.
    ///
    /// # Errors
    ///
    /// Returns `EssayError::InvalidState` if the session was already started.
    pub fn start(&mut self, now: DateTime<Utc>) -> Result<(), EssayError> {
        if !self.can_start() {
            return Err(EssayError::invalid_state("start", self.phase()));
        }
        self.lifecycle = Lifecycle::InProgress {
            started_at: now.trunc_subsecs(6),
        };
        tracing::debug!(id = ?self.id, task = %self.task_type.name, "session started");
        Ok(())
    }

    /// Finish the session at `now`, locking the answer.
    ///
    /// A `now` earlier than the start time is recorded as the start time.
    ///
    /// # Errors
    ///
    /// Returns `EssayError::InvalidState` unless the session is in progress.
    pub fn finish(&mut self, now: DateTime<Utc>) -> Result<(), EssayError> {
        let Lifecycle::InProgress { started_at } = self.lifecycle else {
            return Err(EssayError::invalid_state("finish", self.phase()));
        };
        self.lifecycle = Lifecycle::Completed {
            started_at,
            completed_at: now.trunc_subsecs(6).max(started_at),
        };
        tracing::debug!(id = ?self.id, words = self.words_count(), "session finished");
        Ok(())
    }

    /// Number of words in the answer.
    #[must_use]
    pub fn words_count(&self) -> usize {
        count_words(&self.answer)
    }

    /// Whether the answer reaches the task's minimum word count.
    #[must_use]
    pub fn meets_word_target(&self) -> bool {
        self.words_count() >= self.task_type.min_words_count as usize
    }

    /// The timer value at `now`, or `None` before the start.
    #[must_use]
    pub fn reading(&self, now: DateTime<Utc>) -> Option<TimerReading> {
        match self.lifecycle {
            Lifecycle::NotStarted => None,
            Lifecycle::InProgress { started_at } => Some(TimerReading::Remaining(
                self.task_type.expected_seconds() - seconds_between(started_at, now),
            )),
            Lifecycle::Completed {
                started_at,
                completed_at,
            } => Some(TimerReading::Elapsed(seconds_between(
                started_at,
                completed_at,
            ))),
        }
    }

    /// Seconds between start and finish, once finished.
    #[must_use]
    pub fn elapsed_seconds(&self) -> Option<i64> {
        match self.lifecycle {
            Lifecycle::Completed {
                started_at,
                completed_at,
            } => Some(seconds_between(started_at, completed_at)),
            _ => None,
        }
    }

    /// `"(<n> words)"`, or `"(<n> words in MM:SS)"` once finished.
    #[must_use]
    pub fn summary_label(&self) -> String {
        let words = self.words_count();
        match self.elapsed_seconds() {
            Some(elapsed) => format!("({words} words in {})", format_duration(elapsed)),
            None => format!("({words} words)"),
        }
    }

    /// `"Words: <n> of <min>"`.
    #[must_use]
    pub fn words_progress_label(&self) -> String {
        format!(
            "Words: {} of {}",
            self.words_count(),
            self.task_type.min_words_count
        )
    }

    /// The answer followed by a blank line and the summary label.
    #[must_use]
    pub fn answer_with_stats(&self) -> String {
        format!("{}\n\n{}", self.answer, self.summary_label())
    }

    /// Creation time in the local timezone.
    #[must_use]
    pub fn created_at_local(&self) -> DateTime<Local> {
        self.created_at.with_timezone(&Local)
    }

    /// The creation time and task name, as shown in session lists.
    #[must_use]
    pub fn list_label(&self) -> String {
        format!(
            "{}  {}",
            self.created_at_local().format("%Y-%m-%d %H:%M:%S"),
            self.task_type.name
        )
    }
}
