//! Command-line interface for essay-timer.

pub mod args;
pub mod commands;
