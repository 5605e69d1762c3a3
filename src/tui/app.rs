//! Application state for the TUI.

use crate::core::{Clock, OverrunStyle};
use crate::error::EssayError;
use crate::session::{Session, SessionEngine, TimerReading};
use crate::storage::SessionStore;

/// Which view is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// The session list.
    List,
    /// The editor for one session.
    Writing,
}

/// The text field receiving keystrokes in the writing view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Question,
    Answer,
}

/// An irreversible step waiting for y/n.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirm {
    Start,
    Finish,
    Delete(i64),
}

/// Application state.
pub struct App<'a, S: SessionStore, C: Clock> {
    store: &'a S,
    engine: &'a SessionEngine<C>,
    /// How overdue countdowns are shown.
    pub overrun: OverrunStyle,
    /// All sessions, newest first.
    pub sessions: Vec<Session>,
    /// Currently selected index in the list.
    pub selected: usize,
    /// Current view.
    pub screen: Screen,
    /// The session open in the writing view.
    pub current: Option<Session>,
    /// Field receiving typed text.
    pub focus: Field,
    /// Pending confirmation dialog.
    pub confirm: Option<Confirm>,
    /// Status message to display.
    pub status: Option<String>,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Pending 'g' key for 'gg' command.
    pub pending_g: bool,
    /// Whether `current` has edits not yet written to the store.
    pub dirty: bool,
}

impl<'a, S: SessionStore, C: Clock> App<'a, S, C> {
    /// Create a new app instance.
    ///
    /// # Errors
    ///
    /// Returns an error if listing sessions fails.
    pub fn new(
        store: &'a S,
        engine: &'a SessionEngine<C>,
        overrun: OverrunStyle,
    ) -> Result<Self, EssayError> {
        let sessions = store.list()?;

        Ok(Self {
            store,
            engine,
            overrun,
            sessions,
            selected: 0,
            screen: Screen::List,
            current: None,
            focus: Field::Question,
            confirm: None,
            status: Some("Press ? for help".to_string()),
            should_quit: false,
            pending_g: false,
            dirty: false,
        })
    }

    /// Reload sessions from the store.
    ///
    /// # Errors
    ///
    /// Returns an error if listing sessions fails.
    pub fn refresh(&mut self) -> Result<(), EssayError> {
        self.sessions = self.store.list()?;

        if self.sessions.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.sessions.len() {
            self.selected = self.sessions.len() - 1;
        }
        Ok(())
    }

    /// Get the currently selected session.
    pub fn selected_session(&self) -> Option<&Session> {
        self.sessions.get(self.selected)
    }

    /// The timer value of `session` now.
    pub fn reading_of(&self, session: &Session) -> Option<TimerReading> {
        self.engine.reading(session)
    }

    /// The timer value of the open session now.
    pub fn reading(&self) -> Option<TimerReading> {
        self.current.as_ref().and_then(|s| self.engine.reading(s))
    }

    /// Move selection up.
    pub fn select_previous(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
        self.pending_g = false;
    }

    /// Move selection down.
    pub fn select_next(&mut self) {
        if !self.sessions.is_empty() && self.selected < self.sessions.len() - 1 {
            self.selected += 1;
        }
        self.pending_g = false;
    }

    /// Jump to first item.
    pub fn select_first(&mut self) {
        self.selected = 0;
        self.pending_g = false;
    }

    /// Jump to last item.
    pub fn select_last(&mut self) {
        if !self.sessions.is_empty() {
            self.selected = self.sessions.len() - 1;
        }
        self.pending_g = false;
    }

    /// Handle 'g' key for 'gg' command.
    pub fn handle_g(&mut self) {
        if self.pending_g {
            self.select_first();
        } else {
            self.pending_g = true;
            self.status = Some("g-".to_string());
        }
    }

    /// Cancel pending 'g' command.
    pub fn cancel_pending(&mut self) {
        self.pending_g = false;
        self.status = None;
    }

    /// Create a session and open it.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn new_session(&mut self) -> Result<(), EssayError> {
        let mut session = self.engine.create_session();
        self.store.insert(&mut session)?;

        self.status = Some(format!(
            "Created session #{}: {}",
            session.id.unwrap_or_default(),
            session.task_type()
        ));
        self.current = Some(session);
        self.screen = Screen::Writing;
        self.focus = Field::Question;
        self.dirty = false;
        Ok(())
    }

    /// Open the selected session in the writing view.
    pub fn open_selected(&mut self) {
        if let Some(session) = self.selected_session().cloned() {
            self.focus = if session.prompt_editable() {
                Field::Question
            } else {
                Field::Answer
            };
            self.current = Some(session);
            self.screen = Screen::Writing;
            self.dirty = false;
        }
    }

    /// Write pending edits of the open session.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn save(&mut self) -> Result<(), EssayError> {
        if let (true, Some(session)) = (self.dirty, &self.current) {
            self.store.update(session)?;
            self.dirty = false;
        }
        Ok(())
    }

    /// Save and go back to the list.
    ///
    /// # Errors
    ///
    /// Returns an error if saving or listing fails.
    pub fn close(&mut self) -> Result<(), EssayError> {
        self.save()?;
        self.current = None;
        self.confirm = None;
        self.screen = Screen::List;
        self.refresh()
    }

    /// Save and quit.
    ///
    /// # Errors
    ///
    /// Returns an error if saving fails.
    pub fn quit(&mut self) -> Result<(), EssayError> {
        self.save()?;
        self.should_quit = true;
        Ok(())
    }

    /// Periodic tick: persists edits so at most one tick of typing is lost.
    ///
    /// # Errors
    ///
    /// Returns an error if saving fails.
    pub fn on_tick(&mut self) -> Result<(), EssayError> {
        self.save()
    }

    /// Switch between the question and the answer.
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Field::Question => Field::Answer,
            Field::Answer => Field::Question,
        };
    }

    /// Type one character into the focused field.
    ///
    /// # Errors
    ///
    /// Returns `EssayError::InvalidState` if the field is locked.
    pub fn insert_char(&mut self, c: char) -> Result<(), EssayError> {
        self.edit(|text| text.push(c))
    }

    /// Delete the last character of the focused field.
    ///
    /// # Errors
    ///
    /// Returns `EssayError::InvalidState` if the field is locked.
    pub fn backspace(&mut self) -> Result<(), EssayError> {
        self.edit(|text| {
            text.pop();
        })
    }

    fn edit(&mut self, change: impl FnOnce(&mut String)) -> Result<(), EssayError> {
        let Some(session) = self.current.as_mut() else {
            return Ok(());
        };

        match self.focus {
            Field::Question => {
                let mut text = session.question().to_string();
                change(&mut text);
                session.set_question(text)?;
            }
            Field::Answer => {
                let mut text = session.answer().to_string();
                change(&mut text);
                session.set_answer(text)?;
            }
        }
        self.dirty = true;
        Ok(())
    }

    /// Move the open session to the next task type.
    ///
    /// # Errors
    ///
    /// Returns `EssayError::InvalidState` once the session has started.
    pub fn cycle_task(&mut self) -> Result<(), EssayError> {
        if let Some(session) = self.current.as_mut() {
            self.engine.cycle_task_type(session)?;
            self.status = Some(format!("Task: {}", session.task_type()));
            self.dirty = true;
        }
        Ok(())
    }

    /// Ask before starting the countdown.
    ///
    /// # Errors
    ///
    /// Returns `EssayError::InvalidState` if the session was already started.
    pub fn request_start(&mut self) -> Result<(), EssayError> {
        if let Some(session) = &self.current {
            if !session.can_start() {
                return Err(EssayError::invalid_state("start", session.phase()));
            }
            self.confirm = Some(Confirm::Start);
        }
        Ok(())
    }

    /// Ask before finishing.
    ///
    /// # Errors
    ///
    /// Returns `EssayError::InvalidState` unless the session is in progress.
    pub fn request_finish(&mut self) -> Result<(), EssayError> {
        if let Some(session) = &self.current {
            if !session.can_finish() {
                return Err(EssayError::invalid_state("finish", session.phase()));
            }
            self.confirm = Some(Confirm::Finish);
        }
        Ok(())
    }

    /// Ask before deleting the selected session.
    pub fn request_delete(&mut self) {
        if let Some(id) = self.selected_session().and_then(|s| s.id) {
            self.confirm = Some(Confirm::Delete(id));
        }
    }

    /// Carry out the pending confirmation.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition or the store write fails.
    pub fn confirm_yes(&mut self) -> Result<(), EssayError> {
        let Some(confirm) = self.confirm.take() else {
            return Ok(());
        };

        match confirm {
            Confirm::Start => {
                if let Some(mut session) = self.current.clone() {
                    self.engine.start(&mut session)?;
                    self.store.update(&session)?;
                    self.current = Some(session);
                    self.dirty = false;
                    self.focus = Field::Answer;
                    self.status = Some("Countdown started".to_string());
                }
            }
            Confirm::Finish => {
                if let Some(mut session) = self.current.clone() {
                    self.engine.finish(&mut session)?;
                    self.store.update(&session)?;
                    self.status = Some(format!("Finished {}", session.summary_label()));
                    self.current = Some(session);
                    self.dirty = false;
                }
            }
            Confirm::Delete(id) => {
                self.store.delete(id)?;
                self.status = Some(format!("Deleted session #{id}"));
                self.refresh()?;
            }
        }
        Ok(())
    }

    /// Dismiss the pending confirmation.
    pub fn confirm_no(&mut self) {
        self.confirm = None;
        self.status = Some("Cancelled".to_string());
    }
}
