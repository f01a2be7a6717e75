//! Error types for learning and generation

use std::fmt;

/// Main error type for all learning and generation operations
///
/// Contradictions hit during normal solving are not errors: they are
/// expected outcomes the solver recovers from by restarting. Only malformed
/// input, unsatisfiable user constraints, exhausted retries, and violated
/// internal invariants surface here.
#[derive(Debug)]
pub enum GenerationError {
    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Training data cannot drive a generation
    InvalidSourceData {
        /// Description of what's wrong with the source data
        reason: String,
    },

    /// A set-tile instruction referenced a tile identifier never learned
    UnknownTile {
        /// The unknown tile identifier
        tile: usize,
    },

    /// Applying the user's set-tile instructions produced a contradiction
    ///
    /// The seed constraints are mutually unsatisfiable under the learned
    /// adjacency rules; restarting cannot help, so this is fatal.
    UnsatisfiableSeed {
        /// Wave matrix position (row, col) where the contradiction surfaced
        position: [usize; 2],
    },

    /// Every solve attempt ended in a contradiction
    AttemptsExhausted {
        /// Number of attempts made before giving up
        attempts: usize,
    },

    /// Numerical computation violated an internal invariant
    Computation {
        /// Name of the computation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::UnknownTile { tile } => {
                write!(f, "Tile identifier {tile} was never learned")
            }
            Self::UnsatisfiableSeed { position } => {
                write!(
                    f,
                    "Set-tile instructions contradict at position ({}, {})",
                    position[0], position[1]
                )
            }
            Self::AttemptsExhausted { attempts } => {
                write!(f, "Generation failed after {attempts} attempt(s)")
            }
            Self::Computation { operation, reason } => {
                write!(f, "Computation error in {operation}: {reason}")
            }
        }
    }
}

impl std::error::Error for GenerationError {}

/// Convenience type alias for generation results
pub type Result<T> = std::result::Result<T, GenerationError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> GenerationError {
    GenerationError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a computation error
pub fn computation_error(operation: &'static str, reason: &impl ToString) -> GenerationError {
    GenerationError::Computation {
        operation,
        reason: reason.to_string(),
    }
}
