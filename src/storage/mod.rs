//! Storage layer for essay-timer.
//!
//! Sessions are kept in a local `SQLite` database. The engine only needs
//! create, read, update-in-place and delete, expressed by [`SessionStore`].

mod database;
mod migrations;
mod sessions;

pub use database::Database;
pub use sessions::{SessionStore, SqliteSessionStore};
