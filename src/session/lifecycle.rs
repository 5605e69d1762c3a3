//! The session lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::EssayError;

/// Where a session is in its lifecycle, together with the timestamps that
/// phase implies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Lifecycle {
    /// The prompt is still being set up.
    NotStarted,
    /// The countdown is running and the answer is open for writing.
    InProgress {
        /// When the user pressed Start.
        started_at: DateTime<Utc>,
    },
    /// The answer is locked.
    Completed {
        /// When the user pressed Start.
        started_at: DateTime<Utc>,
        /// When the user pressed Finish; never earlier than `started_at`.
        completed_at: DateTime<Utc>,
    },
}

impl Lifecycle {
    /// Rebuild a lifecycle from optional timestamps, as stored on disk.
    ///
    /// # Errors
    ///
    /// Returns `EssayError::InvalidData` if a completion time is present
    /// without a start time, or precedes it.
    pub fn from_timestamps(
        started_at: Option<DateTime<Utc>>,
        completed_at: Option<DateTime<Utc>>,
    ) -> Result<Self, EssayError> {
        match (started_at, completed_at) {
            (None, None) => Ok(Self::NotStarted),
            (Some(started_at), None) => Ok(Self::InProgress { started_at }),
            (Some(started_at), Some(completed_at)) if completed_at >= started_at => {
                Ok(Self::Completed {
                    started_at,
                    completed_at,
                })
            }
            (Some(_), Some(_)) => Err(EssayError::InvalidData(
                "completed_at precedes started_at".to_string(),
            )),
            (None, Some(_)) => Err(EssayError::InvalidData(
                "completed_at is set but started_at is not".to_string(),
            )),
        }
    }

    /// The phase without its timestamps.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        match self {
            Self::NotStarted => Phase::NotStarted,
            Self::InProgress { .. } => Phase::InProgress,
            Self::Completed { .. } => Phase::Completed,
        }
    }

    /// When the session was started.
    #[must_use]
    pub const fn started_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::NotStarted => None,
            Self::InProgress { started_at } | Self::Completed { started_at, .. } => {
                Some(*started_at)
            }
        }
    }

    /// When the session was finished.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Completed { completed_at, .. } => Some(*completed_at),
            _ => None,
        }
    }
}

/// Lifecycle phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Not yet started.
    NotStarted,
    /// Started, not finished.
    InProgress,
    /// Finished.
    Completed,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotStarted => write!(f, "not started"),
            Self::InProgress => write!(f, "in progress"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 10, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_from_timestamps() {
        assert_eq!(
            Lifecycle::from_timestamps(None, None).unwrap(),
            Lifecycle::NotStarted
        );
        assert_eq!(
            Lifecycle::from_timestamps(Some(t0()), None).unwrap().phase(),
            Phase::InProgress
        );

        let done = Lifecycle::from_timestamps(Some(t0()), Some(t0() + Duration::minutes(5)))
            .unwrap();
        assert_eq!(done.phase(), Phase::Completed);
        assert_eq!(done.started_at(), Some(t0()));
        assert_eq!(done.completed_at(), Some(t0() + Duration::minutes(5)));
    }

    #[test]
    fn test_completed_without_start_rejected() {
        let err = Lifecycle::from_timestamps(None, Some(t0())).unwrap_err();
        assert!(matches!(err, EssayError::InvalidData(_)));
    }

    #[test]
    fn test_completed_before_start_rejected() {
        let err =
            Lifecycle::from_timestamps(Some(t0()), Some(t0() - Duration::seconds(1))).unwrap_err();
        assert!(matches!(err, EssayError::InvalidData(_)));
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::NotStarted.to_string(), "not started");
        assert_eq!(Phase::InProgress.to_string(), "in progress");
        assert_eq!(Phase::Completed.to_string(), "completed");
    }
}
