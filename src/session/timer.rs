//! Countdown and elapsed-time readings.

use serde::{Deserialize, Serialize};

use crate::core::{format_countdown, format_duration, OverrunStyle};

/// What the timer shows for a started session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "seconds", rename_all = "lowercase")]
pub enum TimerReading {
    /// Seconds left of the allotted time; negative once overdue.
    Remaining(i64),
    /// Seconds between start and finish.
    Elapsed(i64),
}

impl TimerReading {
    /// The raw number of seconds.
    #[must_use]
    pub const fn seconds(&self) -> i64 {
        match self {
            Self::Remaining(s) | Self::Elapsed(s) => *s,
        }
    }

    /// `"remaining"` or `"elapsed"`.
    #[must_use]
    pub const fn mode(&self) -> &'static str {
        match self {
            Self::Remaining(_) => "remaining",
            Self::Elapsed(_) => "elapsed",
        }
    }

    /// Whether the allotted time has run out on an unfinished session.
    #[must_use]
    pub const fn is_overrun(&self) -> bool {
        matches!(self, Self::Remaining(s) if *s < 0)
    }

    /// `"Time left: MM:SS"` or `"Time spent: MM:SS"`.
    #[must_use]
    pub fn label(&self, style: OverrunStyle) -> String {
        match self {
            Self::Remaining(s) => format!("Time left: {}", format_countdown(*s, style)),
            Self::Elapsed(s) => format!("Time spent: {}", format_duration(*s)),
        }
    }
}
