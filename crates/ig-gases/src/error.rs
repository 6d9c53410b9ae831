//! Gas table errors.

use thiserror::Error;

/// Result type for gas table operations.
pub type GasResult<T> = Result<T, GasError>;

/// Errors raised while building or querying a gas table.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GasError {
    /// No entry matches the requested id, name or alias.
    #[error("Unknown gas: {query}")]
    UnknownGas { query: String },

    /// A property record violates a physical constraint.
    #[error("Invalid property for {gas}: {what}")]
    InvalidProperty { gas: String, what: &'static str },

    /// Two entries share the same id.
    #[error("Duplicate gas id: {id}")]
    DuplicateId { id: String },

    /// Table file could not be parsed.
    #[error("Failed to parse gas table: {message}")]
    Parse { message: String },
}
