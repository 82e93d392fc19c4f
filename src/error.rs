//! Error types for the 8-puzzle solver.

use thiserror::Error;

/// Errors raised while building or parsing boards and moves.
///
/// Search outcomes such as "no solution" or "cancelled" are not errors; they
/// are reported through [`crate::solver::SearchOutcome`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid board dimensions: expected {expected} {unit}, got {got}")]
    InvalidDimensions {
        unit: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("tile value {value} at ({row}, {col}) is out of range (must be 0-8)")]
    ValueOutOfRange { value: u8, row: usize, col: usize },

    #[error("tile value {value} appears more than once")]
    DuplicateValue { value: u8 },

    #[error("unrecognized token '{token}' in '{context}'")]
    InvalidToken { token: String, context: String },

    #[error("unrecognized move '{input}' (expected up, down, left or right)")]
    InvalidMove { input: String },

    #[error("invalid puzzle file: {message}")]
    InvalidPuzzleFile { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;
