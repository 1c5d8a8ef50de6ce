//! Common error types for graph storage.

use crate::{StatementId, ThingId};
use thiserror::Error;

/// Errors that can occur during graph operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    /// Thing not found.
    #[error("Thing not found: {0}")]
    ThingNotFound(ThingId),

    /// Resource not found.
    #[error("Resource not found: {0}")]
    ResourceNotFound(ThingId),

    /// Literal not found.
    #[error("Literal not found: {0}")]
    LiteralNotFound(ThingId),

    /// Predicate not found.
    #[error("Predicate not found: {0}")]
    PredicateNotFound(ThingId),

    /// Statement not found.
    #[error("Statement not found: {0}")]
    StatementNotFound(StatementId),

    /// Cannot delete a resource because statements reference it.
    #[error("Cannot delete resource {0}: referenced by statements")]
    ResourceInUse(ThingId),

    /// Cannot modify a thing owned by the system.
    #[error("Thing {0} is not modifiable")]
    NotModifiable(ThingId),

    /// Invalid operation.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;
