//! Measurement utilities and shared collaborators.
//!
//! Everything here is free of session state: word counting, `MM:SS`
//! formatting, and the clock the engine reads "now" from.

pub mod clock;
mod duration;
mod words;

pub use clock::{Clock, FixedClock, SystemClock};
pub use duration::{
    format_countdown, format_duration, parse_minutes, seconds_between, OverrunStyle,
};
pub use words::count_words;
