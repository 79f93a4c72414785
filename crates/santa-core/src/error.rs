use thiserror::Error;

/// Errors that abort a draw.
///
/// An infeasible roster is not an error; it is reported as
/// [`crate::Outcome::Infeasible`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// Fewer than two people can't exchange gifts
    #[error("need at least 2 participants for Secret Santa, got {found}")]
    InsufficientParticipants { found: usize },
    /// The same identity was listed twice
    #[error("participant {identity} is listed more than once")]
    DuplicateParticipant { identity: String },
    /// A generated draw failed validation. Always a bug in the generator.
    #[error("generated assignments failed validation: {}", .violations.join("; "))]
    InternalInconsistency { violations: Vec<String> },
}

/// Errors loading or saving a roster
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("failed to read or write roster: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid roster JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("participant {identity} is listed more than once")]
    DuplicateParticipant { identity: String },
}

pub type RosterResult<T> = Result<T, RosterError>;
