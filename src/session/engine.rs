//! Session engine: binds sessions to a clock and a task catalog.

use chrono::{DateTime, Utc};

use super::catalog::{TaskCatalog, TaskType};
use super::session::Session;
use super::timer::TimerReading;
use crate::core::Clock;
use crate::error::EssayError;

/// Drives session transitions with an injected clock and catalog.
///
/// Hosts use this instead of calling [`Session::start`] and friends with a
/// hand-rolled `now`, so tests can swap in a [`crate::core::FixedClock`].
#[derive(Debug)]
pub struct SessionEngine<C: Clock> {
    clock: C,
    catalog: TaskCatalog,
}

impl<C: Clock> SessionEngine<C> {
    /// Create an engine.
    pub const fn new(clock: C, catalog: TaskCatalog) -> Self {
        Self { clock, catalog }
    }

    /// The task type catalog.
    pub const fn catalog(&self) -> &TaskCatalog {
        &self.catalog
    }

    /// The current instant according to the engine's clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Create a session with the catalog's default task type.
    pub fn create_session(&self) -> Session {
        Session::new(self.catalog.default_task().clone(), self.clock.now())
    }

    /// Look up a task type by position or name.
    ///
    /// # Errors
    ///
    /// Returns `EssayError::NotFound` if nothing in the catalog matches.
    pub fn task_type(&self, key: &str) -> Result<&TaskType, EssayError> {
        self.catalog
            .find(key)
            .ok_or_else(|| EssayError::NotFound(format!("task type \"{key}\"")))
    }

    /// Switch `session` to the catalog entry matching `key`.
    ///
    /// # Errors
    ///
    /// Returns `EssayError::NotFound` for an unknown key and
    /// `EssayError::InvalidState` once the session has started.
    pub fn select_task_type(&self, session: &mut Session, key: &str) -> Result<(), EssayError> {
        let task_type = self.task_type(key)?.clone();
        session.set_task_type(task_type)
    }

    /// Advance `session` to the next catalog entry.
    ///
    /// # Errors
    ///
    /// Returns `EssayError::InvalidState` once the session has started.
    pub fn cycle_task_type(&self, session: &mut Session) -> Result<(), EssayError> {
        let next = self.catalog.next_after(session.task_type()).clone();
        session.set_task_type(next)
    }

    /// Start `session` now.
    ///
    /// # Errors
    ///
    /// Returns `EssayError::InvalidState` if it was already started.
    pub fn start(&self, session: &mut Session) -> Result<(), EssayError> {
        session.start(self.clock.now())
    }

    /// Finish `session` now.
    ///
    /// # Errors
    ///
    /// Returns `EssayError::InvalidState` unless it is in progress.
    pub fn finish(&self, session: &mut Session) -> Result<(), EssayError> {
        session.finish(self.clock.now())
    }

    /// The timer value of `session` now.
    pub fn reading(&self, session: &Session) -> Option<TimerReading> {
        session.reading(self.clock.now())
    }
}
