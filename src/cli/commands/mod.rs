//! Command implementations for essay-timer.
//!
//! Each command loads the session it acts on, applies one engine operation
//! and writes the record back. Irreversible steps (start, finish, delete)
//! need `--yes`, the command-line form of a confirmation dialog.

mod session;

pub use session::{
    delete, finish, list, new_session, set_answer, set_question, set_task, show, start, types,
};

use crate::cli::args::{Commands, OutputFormat};
use crate::core::{Clock, OverrunStyle};
use crate::error::EssayError;
use crate::session::SessionEngine;
use crate::storage::SessionStore;

/// Everything a command needs.
pub struct Context<S: SessionStore, C: Clock> {
    /// Where sessions are kept.
    pub store: S,
    /// Clock and catalog bound together.
    pub engine: SessionEngine<C>,
    /// Requested output format.
    pub format: OutputFormat,
    /// How overdue countdowns are shown.
    pub overrun: OverrunStyle,
}

/// Execute a session command and return its rendered output.
///
/// `Tui` and `Completions` drive the terminal directly and are handled by
/// the binary; passing them here returns an empty string.
///
/// # Errors
///
/// Propagates store, lifecycle and formatting errors.
pub fn dispatch<S: SessionStore, C: Clock>(
    ctx: &Context<S, C>,
    command: Commands,
) -> Result<String, EssayError> {
    match command {
        Commands::New(args) => new_session(ctx, &args),
        Commands::List => list(ctx),
        Commands::Show { id } => show(ctx, id),
        Commands::Types => types(ctx),
        Commands::Question(args) => set_question(ctx, &args),
        Commands::Task { id, task } => set_task(ctx, id, &task),
        Commands::Start(args) => start(ctx, &args),
        Commands::Answer(args) => set_answer(ctx, &args),
        Commands::Finish(args) => finish(ctx, &args),
        Commands::Delete(args) => delete(ctx, &args),
        Commands::Tui | Commands::Completions { .. } => Ok(String::new()),
    }
}
