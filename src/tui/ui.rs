//! UI rendering for the TUI.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::core::Clock;
use crate::session::{Phase, Session, TimerReading};
use crate::storage::SessionStore;
use crate::tui::app::{App, Confirm, Field, Screen};

/// Render the application UI.
pub fn render<S: SessionStore, C: Clock>(frame: &mut Frame<'_>, app: &App<'_, S, C>) {
    // Create layout: header, body, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    match (app.screen, &app.current) {
        (Screen::Writing, Some(session)) => render_writing(frame, app, session, chunks[1]),
        _ => render_list(frame, app, chunks[1]),
    }
    render_status_bar(frame, app, chunks[2]);

    if let Some(confirm) = app.confirm {
        render_confirm(frame, confirm);
    }
}

fn timer_style(reading: TimerReading) -> Style {
    match reading {
        TimerReading::Elapsed(_) => Style::default().fg(Color::Green),
        TimerReading::Remaining(_) if reading.is_overrun() => Style::default().fg(Color::Red),
        TimerReading::Remaining(_) => Style::default().fg(Color::Yellow),
    }
}

/// Render the header.
fn render_header<S: SessionStore, C: Clock>(frame: &mut Frame<'_>, app: &App<'_, S, C>, area: Rect) {
    let line = match (app.screen, &app.current) {
        (Screen::Writing, Some(session)) => {
            let mut spans = vec![Span::styled(
                format!(" {} ", session.task_type()),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )];
            if let Some(reading) = app.reading() {
                spans.push(Span::styled(
                    format!(" {} ", reading.label(app.overrun)),
                    timer_style(reading).add_modifier(Modifier::BOLD),
                ));
            }
            Line::from(spans)
        }
        _ => Line::from(Span::styled(
            format!(" Sessions ({}) ", app.sessions.len()),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
    };

    let header = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(header, area);
}

/// Render the session list.
fn render_list<S: SessionStore, C: Clock>(frame: &mut Frame<'_>, app: &App<'_, S, C>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    if app.sessions.is_empty() {
        let empty = Paragraph::new("No sessions yet. Press n to start writing.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem<'_>> = app
        .sessions
        .iter()
        .enumerate()
        .map(|(i, session)| {
            let is_selected = i == app.selected;

            let (icon, color) = match session.phase() {
                Phase::NotStarted => ("[ ]", Color::White),
                Phase::InProgress => ("[~]", Color::Yellow),
                Phase::Completed => ("[x]", Color::Green),
            };

            let mut spans = vec![
                Span::styled(format!("{icon} "), Style::default().fg(color)),
                Span::styled(
                    session.list_label(),
                    Style::default().add_modifier(if is_selected {
                        Modifier::BOLD
                    } else {
                        Modifier::empty()
                    }),
                ),
                Span::styled(
                    format!("  {}", session.summary_label()),
                    Style::default().fg(Color::Blue),
                ),
            ];

            if let (Phase::InProgress, Some(reading)) = (session.phase(), app.reading_of(session)) {
                spans.push(Span::styled(
                    format!("  {}", reading.label(app.overrun)),
                    timer_style(reading),
                ));
            }

            let style = if is_selected {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };

            ListItem::new(Line::from(spans)).style(style)
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray));

    // Create list state for scrolling
    let mut state = ListState::default();
    state.select(Some(app.selected));

    frame.render_stateful_widget(list, area, &mut state);
}

fn field_block(title: &str, focused: bool, editable: bool) -> Block<'static> {
    let color = match (focused, editable) {
        (true, true) => Color::Cyan,
        (_, false) => Color::DarkGray,
        (false, true) => Color::White,
    };
    let title = if editable {
        format!(" {title} ")
    } else {
        format!(" {title} (locked) ")
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
}

/// Render the question and answer editors.
fn render_writing<S: SessionStore, C: Clock>(
    frame: &mut Frame<'_>,
    app: &App<'_, S, C>,
    session: &Session,
    area: Rect,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(area);

    let question = Paragraph::new(session.question().to_string())
        .wrap(Wrap { trim: false })
        .block(field_block(
            "Question",
            app.focus == Field::Question,
            session.prompt_editable(),
        ));
    frame.render_widget(question, chunks[0]);

    let answer_text = if session.phase() == Phase::Completed {
        session.answer_with_stats()
    } else {
        session.answer().to_string()
    };
    let words_color = if session.meets_word_target() {
        Color::Green
    } else {
        Color::White
    };
    let answer = Paragraph::new(answer_text)
        .wrap(Wrap { trim: false })
        .block(
            field_block(
                "Your answer",
                app.focus == Field::Answer,
                session.answer_editable(),
            )
            .title_bottom(Line::styled(
                format!(" {} ", session.words_progress_label()),
                Style::default().fg(words_color),
            )),
        );
    frame.render_widget(answer, chunks[1]);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Render the y/n dialog over everything else.
fn render_confirm(frame: &mut Frame<'_>, confirm: Confirm) {
    let message = match confirm {
        Confirm::Start => {
            "Start the countdown? The question and task type can't be changed afterwards.".to_string()
        }
        Confirm::Finish => "Finish the session? The answer can't be changed afterwards.".to_string(),
        Confirm::Delete(id) => format!("Delete session #{id}? This can't be undone."),
    };

    let area = centered(frame.area(), 50, 6);
    let dialog = Paragraph::new(vec![
        Line::from(message),
        Line::from(""),
        Line::styled("y: yes   n: no", Style::default().fg(Color::DarkGray)),
    ])
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .title(" Confirm ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );

    frame.render_widget(Clear, area);
    frame.render_widget(dialog, area);
}

/// Render the status bar.
fn render_status_bar<S: SessionStore, C: Clock>(
    frame: &mut Frame<'_>,
    app: &App<'_, S, C>,
    area: Rect,
) {
    let default = match app.screen {
        Screen::List => "j/k:nav | n:new | Enter:open | d:delete | ?:help | q:quit",
        Screen::Writing => "Tab:switch | Ctrl+T:task | Ctrl+S:start | Ctrl+F:finish | F1:help | Esc:back",
    };
    let status_text = app.status.as_deref().unwrap_or(default);

    let status = Paragraph::new(status_text).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FixedClock, OverrunStyle};
    use crate::session::{SessionEngine, TaskCatalog};
    use crate::storage::SqliteSessionStore;
    use chrono::{Duration, TimeZone, Utc};
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text<S: SessionStore, C: Clock>(app: &App<'_, S, C>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn test_render_empty_list() {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 2, 10, 9, 0, 0).unwrap());
        let store = SqliteSessionStore::in_memory().unwrap();
        let engine = SessionEngine::new(&clock, TaskCatalog::ielts());
        let app = App::new(&store, &engine, OverrunStyle::Signed).unwrap();

        let text = screen_text(&app);
        assert!(text.contains("Sessions (0)"));
        assert!(text.contains("No sessions yet"));
    }

    #[test]
    fn test_render_countdown() {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 2, 10, 9, 0, 0).unwrap());
        let store = SqliteSessionStore::in_memory().unwrap();
        let engine = SessionEngine::new(&clock, TaskCatalog::ielts());
        let mut app = App::new(&store, &engine, OverrunStyle::Signed).unwrap();

        app.new_session().unwrap();
        app.request_start().unwrap();
        let text = screen_text(&app);
        assert!(text.contains("Confirm"));

        app.confirm_yes().unwrap();
        clock.advance(Duration::seconds(30));
        let text = screen_text(&app);
        assert!(text.contains("Time left: 19:30"));
        assert!(text.contains("Question (locked)"));
        assert!(text.contains("Words: 0 of 150"));
    }

    #[test]
    fn test_render_overrun() {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 2, 10, 9, 0, 0).unwrap());
        let store = SqliteSessionStore::in_memory().unwrap();
        let engine = SessionEngine::new(&clock, TaskCatalog::ielts());
        let mut app = App::new(&store, &engine, OverrunStyle::Clamp).unwrap();

        app.new_session().unwrap();
        app.request_start().unwrap();
        app.confirm_yes().unwrap();
        clock.advance(Duration::minutes(25));

        assert!(screen_text(&app).contains("Time left: 00:00"));
    }
}
