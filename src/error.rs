//! Error types for essay-timer.

use thiserror::Error;

use crate::session::Phase;

/// Errors produced by the session engine, the record store and the
/// presentation layers.
#[derive(Debug, Error)]
pub enum EssayError {
    /// An operation was attempted in a lifecycle phase that does not allow it.
    ///
    /// Hosts are expected to disable the matching controls; the engine still
    /// rejects the call before touching any field.
    #[error("cannot {action} a session that is {phase}")]
    InvalidState {
        /// The rejected operation, e.g. `"start"` or `"edit the answer of"`.
        action: &'static str,
        /// The phase the session was in.
        phase: Phase,
    },

    /// A destructive or irreversible step was requested without confirmation.
    #[error("{0}")]
    Unconfirmed(String),

    /// A session or task type could not be found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Configuration could not be read, written or resolved.
    #[error("configuration error: {0}")]
    Config(String),

    /// The `SQLite` store failed.
    #[error("database error: {0}")]
    Database(String),

    /// Stored or supplied data violates the session invariants.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Serialization failed.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Terminal or file I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EssayError {
    /// Build an [`EssayError::InvalidState`].
    #[must_use]
    pub const fn invalid_state(action: &'static str, phase: Phase) -> Self {
        Self::InvalidState { action, phase }
    }

    /// Whether this error is a lifecycle contract violation.
    #[must_use]
    pub const fn is_invalid_state(&self) -> bool {
        matches!(self, Self::InvalidState { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_state_message() {
        let err = EssayError::invalid_state("start", Phase::InProgress);
        assert_eq!(err.to_string(), "cannot start a session that is in progress");
        assert!(err.is_invalid_state());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let err: EssayError = io.into();
        assert!(matches!(err, EssayError::Io(_)));
        assert!(!err.is_invalid_state());
    }
}
