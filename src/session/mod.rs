//! Writing sessions.
//!
//! A session moves through three phases: not started, in progress and
//! completed. The phase decides which fields may be edited:
//! - the question and task type only before the start
//! - the answer only between start and finish
//!
//! The countdown and the elapsed time are derived from the lifecycle
//! timestamps on demand, never stored.

pub mod catalog;
mod engine;
mod lifecycle;
#[allow(clippy::module_inception)]
mod session;
mod timer;

pub use catalog::{TaskCatalog, TaskType};
pub use engine::SessionEngine;
pub use lifecycle::{Lifecycle, Phase};
pub use session::Session;
pub use timer::TimerReading;
