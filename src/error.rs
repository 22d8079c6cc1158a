//! Error types for shiplp.

use thiserror::Error;

use crate::domain::EntityKind;
use crate::solver::TerminationStatus;

/// Error type for shiplp operations.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Instance data failed validation while building the model.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Malformed linear program handed to a solver.
    #[error("Invalid problem: {0}")]
    InvalidProblem(String),

    /// Solver error.
    #[error("Solver error: {0}")]
    SolverError(String),

    /// The solve terminated without an optimal solution.
    #[error("No optimal solution: status {status:?}{}", .message.as_deref().map(|m| format!(" ({m})")).unwrap_or_default())]
    NotOptimal {
        status: TerminationStatus,
        message: Option<String>,
    },

    /// The instance document could not be decoded.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A problem with the instance data, always naming the offending key.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// An identifier set has no members.
    #[error("the {kind} set is empty")]
    EmptySet { kind: EntityKind },

    /// A table key names an identifier that is not registered.
    #[error("{table} entry ({row}, {col}) references unknown {kind} '{name}'")]
    UnknownIdentifier {
        table: &'static str,
        row: String,
        col: String,
        kind: EntityKind,
        name: String,
    },

    /// A required table entry is absent.
    #[error("{table} has no entry for ({row}, {col})")]
    MissingEntry {
        table: &'static str,
        row: String,
        col: String,
    },

    /// A table entry is below zero.
    #[error("{table} entry ({row}, {col}) is negative: {value}")]
    NegativeValue {
        table: &'static str,
        row: String,
        col: String,
        value: f64,
    },

    /// A table entry is NaN or infinite.
    #[error("{table} entry ({row}, {col}) is not finite: {value}")]
    NonFiniteValue {
        table: &'static str,
        row: String,
        col: String,
        value: f64,
    },
}

impl ValidationError {
    /// Name of the table the error refers to, if any.
    pub fn table(&self) -> Option<&'static str> {
        match self {
            ValidationError::EmptySet { .. } => None,
            ValidationError::UnknownIdentifier { table, .. }
            | ValidationError::MissingEntry { table, .. }
            | ValidationError::NegativeValue { table, .. }
            | ValidationError::NonFiniteValue { table, .. } => Some(table),
        }
    }
}

/// Result type for shiplp operations.
pub type Result<T> = std::result::Result<T, TransportError>;
