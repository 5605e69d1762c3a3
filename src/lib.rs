//! essay-timer - timed writing practice for exam-style essay tasks
//!
//! The library holds the session engine (lifecycle, countdown, word count),
//! a `SQLite` record store and the CLI/TUI presentation layers used by the
//! `essay` binary.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod output;
pub mod session;
pub mod storage;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use crate::core::{count_words, format_duration, Clock, FixedClock, SystemClock};
pub use error::EssayError;
pub use session::{Phase, Session, SessionEngine, TaskCatalog, TaskType, TimerReading};
pub use storage::{SessionStore, SqliteSessionStore};
