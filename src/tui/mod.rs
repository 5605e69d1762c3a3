//! Terminal User Interface (TUI) for essay-timer.
//!
//! A session list plus a writing view with a live countdown.
//! Built with ratatui and crossterm.

mod app;
mod event;
mod ui;

pub use app::{App, Confirm, Field, Screen};
pub use event::handle_key;

use std::io;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::config::DisplayConfig;
use crate::core::Clock;
use crate::error::EssayError;
use crate::session::SessionEngine;
use crate::storage::SessionStore;

/// Run the TUI application.
///
/// # Errors
///
/// Returns an error if the TUI fails to initialize or a store operation fails.
pub fn run<S: SessionStore, C: Clock>(
    store: &S,
    engine: &SessionEngine<C>,
    display: &DisplayConfig,
) -> Result<(), EssayError> {
    // Load before touching the terminal so errors print normally
    let mut app = App::new(store, engine, display.overrun)?;
    let tick_rate = Duration::from_millis(display.tick_rate_ms.max(50));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    tracing::info!(sessions = app.sessions.len(), "tui started");
    let result = run_app(&mut terminal, &mut app, tick_rate);

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

/// Run the main application loop.
fn run_app<B: Backend, S: SessionStore, C: Clock>(
    terminal: &mut Terminal<B>,
    app: &mut App<'_, S, C>,
    tick_rate: Duration,
) -> Result<(), EssayError> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(frame, app))?;
        event::handle_events(app, tick_rate)?;
    }

    Ok(())
}
