//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::core::Clock;
use crate::error::EssayError;
use crate::storage::SessionStore;
use crate::tui::app::{App, Screen};

const LIST_HELP: &str = "j/k:nav | n:new | Enter:open | d:delete | r:refresh | q:quit";
const WRITING_HELP: &str =
    "Tab:switch field | Ctrl+T:task | Ctrl+S:start | Ctrl+F:finish | Esc:back";

/// Wait up to `tick_rate` for a key press and handle it.
///
/// A timeout counts as a tick: pending edits are saved and the caller redraws
/// the countdown.
///
/// # Errors
///
/// Returns an error if event polling or a store write fails.
pub fn handle_events<S: SessionStore, C: Clock>(
    app: &mut App<'_, S, C>,
    tick_rate: Duration,
) -> Result<(), EssayError> {
    if !event::poll(tick_rate)? {
        return app.on_tick();
    }

    if let Event::Key(key) = event::read()? {
        if key.kind == KeyEventKind::Press {
            handle_key(app, key)?;
        }
    }
    Ok(())
}

/// Apply one key press to the app.
///
/// Lifecycle violations become a status message; other errors propagate.
///
/// # Errors
///
/// Returns an error if a store operation fails.
pub fn handle_key<S: SessionStore, C: Clock>(
    app: &mut App<'_, S, C>,
    key: KeyEvent,
) -> Result<(), EssayError> {
    match dispatch_key(app, key) {
        Err(e) if e.is_invalid_state() => {
            app.status = Some(e.to_string());
            Ok(())
        }
        other => other,
    }
}

fn dispatch_key<S: SessionStore, C: Clock>(
    app: &mut App<'_, S, C>,
    key: KeyEvent,
) -> Result<(), EssayError> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl && key.code == KeyCode::Char('c') {
        return app.quit();
    }

    if app.confirm.is_some() {
        match key.code {
            KeyCode::Char('y' | 'Y') | KeyCode::Enter => return app.confirm_yes(),
            KeyCode::Char('n' | 'N') | KeyCode::Esc => app.confirm_no(),
            _ => {}
        }
        return Ok(());
    }

    match app.screen {
        Screen::List => list_key(app, key),
        Screen::Writing if ctrl => match key.code {
            KeyCode::Char('s') => app.request_start(),
            KeyCode::Char('f') => app.request_finish(),
            KeyCode::Char('t') => app.cycle_task(),
            _ => Ok(()),
        },
        Screen::Writing => writing_key(app, key),
    }
}

fn list_key<S: SessionStore, C: Clock>(
    app: &mut App<'_, S, C>,
    key: KeyEvent,
) -> Result<(), EssayError> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.cancel_pending();
            return app.quit();
        }

        // Navigation - vim style
        KeyCode::Char('j') | KeyCode::Down => {
            app.cancel_pending();
            app.select_next();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.cancel_pending();
            app.select_previous();
        }
        KeyCode::Char('g') => app.handle_g(),
        KeyCode::Char('G') | KeyCode::End => {
            app.cancel_pending();
            app.select_last();
        }
        KeyCode::Home => {
            app.cancel_pending();
            app.select_first();
        }

        KeyCode::Char('n') => {
            app.cancel_pending();
            return app.new_session();
        }
        KeyCode::Enter => {
            app.cancel_pending();
            app.open_selected();
        }
        KeyCode::Char('d') => {
            app.cancel_pending();
            app.request_delete();
        }
        KeyCode::Char('r') => {
            app.cancel_pending();
            app.refresh()?;
            app.status = Some(format!("Refreshed {} sessions", app.sessions.len()));
        }
        KeyCode::Char('?') => {
            app.cancel_pending();
            app.status = Some(LIST_HELP.to_string());
        }

        _ => app.cancel_pending(),
    }
    Ok(())
}

fn writing_key<S: SessionStore, C: Clock>(
    app: &mut App<'_, S, C>,
    key: KeyEvent,
) -> Result<(), EssayError> {
    match key.code {
        KeyCode::Esc => app.close(),
        KeyCode::Tab | KeyCode::BackTab => {
            app.toggle_focus();
            Ok(())
        }
        KeyCode::F(1) => {
            app.status = Some(WRITING_HELP.to_string());
            Ok(())
        }
        KeyCode::Enter => app.insert_char('\n'),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Char(c) => app.insert_char(c),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FixedClock, OverrunStyle};
    use crate::session::{Phase, SessionEngine, TaskCatalog};
    use crate::storage::SqliteSessionStore;
    use crate::tui::app::{Confirm, Field};
    use chrono::{TimeZone, Utc};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_keyboard_flow() {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 2, 10, 9, 0, 0).unwrap());
        let store = SqliteSessionStore::in_memory().unwrap();
        let engine = SessionEngine::new(&clock, TaskCatalog::ielts());
        let mut app = App::new(&store, &engine, OverrunStyle::Signed).unwrap();

        handle_key(&mut app, press(KeyCode::Char('n'))).unwrap();
        assert_eq!(app.screen, Screen::Writing);

        // 'q' is text in the writing view
        handle_key(&mut app, press(KeyCode::Char('q'))).unwrap();
        assert!(!app.should_quit);
        assert_eq!(app.current.as_ref().unwrap().question(), "q");

        handle_key(&mut app, ctrl('s')).unwrap();
        assert_eq!(app.confirm, Some(Confirm::Start));
        handle_key(&mut app, press(KeyCode::Char('y'))).unwrap();
        assert_eq!(app.current.as_ref().unwrap().phase(), Phase::InProgress);
        assert_eq!(app.focus, Field::Answer);

        handle_key(&mut app, press(KeyCode::Char('a'))).unwrap();
        handle_key(&mut app, ctrl('f')).unwrap();
        handle_key(&mut app, press(KeyCode::Esc)).unwrap();
        assert_eq!(app.confirm, None);
        assert_eq!(app.current.as_ref().unwrap().phase(), Phase::InProgress);

        handle_key(&mut app, press(KeyCode::Esc)).unwrap();
        assert_eq!(app.screen, Screen::List);
        assert_eq!(app.sessions[0].answer(), "a");

        handle_key(&mut app, press(KeyCode::Char('q'))).unwrap();
        assert!(app.should_quit);
    }

    #[test]
    fn test_locked_field_sets_status() {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 2, 10, 9, 0, 0).unwrap());
        let store = SqliteSessionStore::in_memory().unwrap();
        let engine = SessionEngine::new(&clock, TaskCatalog::ielts());
        let mut app = App::new(&store, &engine, OverrunStyle::Signed).unwrap();

        handle_key(&mut app, press(KeyCode::Char('n'))).unwrap();
        handle_key(&mut app, press(KeyCode::Tab)).unwrap();
        handle_key(&mut app, press(KeyCode::Char('x'))).unwrap();

        assert_eq!(
            app.status.as_deref(),
            Some("cannot edit the answer of a session that is not started")
        );
        assert_eq!(app.current.as_ref().unwrap().answer(), "");
    }

    #[test]
    fn test_ctrl_c_quits_from_writing() {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 2, 10, 9, 0, 0).unwrap());
        let store = SqliteSessionStore::in_memory().unwrap();
        let engine = SessionEngine::new(&clock, TaskCatalog::ielts());
        let mut app = App::new(&store, &engine, OverrunStyle::Signed).unwrap();

        handle_key(&mut app, press(KeyCode::Char('n'))).unwrap();
        handle_key(&mut app, press(KeyCode::Char('W'))).unwrap();
        handle_key(&mut app, ctrl('c')).unwrap();

        assert!(app.should_quit);
        assert_eq!(store.list().unwrap()[0].question(), "W");
    }
}
