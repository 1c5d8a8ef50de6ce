//! Table error types.

use std::collections::BTreeMap;

use tabula_core::{GraphError, ThingId};
use thiserror::Error;

/// Result type for table operations.
pub type TableResult<T> = Result<T, TableError>;

/// Errors that can occur while creating, updating or reading a table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    // ========== State ==========
    #[error("Table \"{0}\" not found.")]
    TableNotFound(ThingId),

    #[error("Table \"{0}\" is not modifiable.")]
    TableNotModifiable(ThingId),

    // ========== Structure ==========
    #[error("Missing table rows. At least one row is required.")]
    MissingTableRows,

    #[error("Missing table header value at index {index}.")]
    MissingTableHeaderValue { index: usize },

    #[error("Table header value at index {index} must be a literal.")]
    TableHeaderValueMustBeLiteral { index: usize },

    #[error("Row {row_index} has more values than the header. Expected exactly {expected} values.")]
    TooManyTableRowValues { row_index: usize, expected: usize },

    #[error("Row {row_index} has less values than the header. Expected exactly {expected} values.")]
    MissingTableRowValues { row_index: usize, expected: usize },

    #[error("A label must not be blank or contain newlines or NULL characters and must be at most {max_length} characters long. Field: \"{property}\".")]
    InvalidLabel { property: String, max_length: usize },

    // ========== References ==========
    #[error("Thing \"{0}\" not found.")]
    ThingNotFound(String),

    #[error("Thing \"{0}\" is not a class.")]
    ThingIsNotAClass(String),

    #[error("Class \"{0}\" is reserved and therefore cannot be set.")]
    ReservedClass(ThingId),

    #[error("Invalid temp id \"{0}\". Requires a leading \"#\" followed by at least one character.")]
    InvalidTempId(String),

    #[error("Duplicate temp ids: {}", format_counts(.0))]
    DuplicateTempIds(BTreeMap<String, usize>),

    #[error("Literal label \"{label}\" is not a valid {datatype}.")]
    InvalidLiteralLabel { label: String, datatype: String },

    #[error("The URI <{0}> is not absolute.")]
    URINotAbsolute(String),

    #[error("List \"{0}\" contains itself.")]
    CyclicListDefinition(String),

    // ========== Internal ==========
    #[error("Illegal state: {0}")]
    IllegalState(String),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

fn format_counts(counts: &BTreeMap<String, usize>) -> String {
    counts
        .iter()
        .map(|(id, count)| format!("\"{}\"={}", id, count))
        .collect::<Vec<_>>()
        .join(", ")
}

impl TableError {
    pub fn missing_header_value(index: usize) -> Self {
        Self::MissingTableHeaderValue { index }
    }

    pub fn header_must_be_literal(index: usize) -> Self {
        Self::TableHeaderValueMustBeLiteral { index }
    }

    pub fn too_many_row_values(row_index: usize, expected: usize) -> Self {
        Self::TooManyTableRowValues {
            row_index,
            expected,
        }
    }

    pub fn missing_row_values(row_index: usize, expected: usize) -> Self {
        Self::MissingTableRowValues {
            row_index,
            expected,
        }
    }

    pub fn invalid_label(property: impl Into<String>, max_length: usize) -> Self {
        Self::InvalidLabel {
            property: property.into(),
            max_length,
        }
    }

    pub fn invalid_literal_label(label: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self::InvalidLiteralLabel {
            label: label.into(),
            datatype: datatype.into(),
        }
    }

    pub fn thing_not_found(id: impl Into<String>) -> Self {
        Self::ThingNotFound(id.into())
    }

    pub fn illegal_state(message: impl Into<String>) -> Self {
        Self::IllegalState(message.into())
    }

    /// Returns true for errors raised before any mutation was issued.
    pub fn is_validation_error(&self) -> bool {
        !matches!(self, Self::IllegalState(_) | Self::Graph(_))
    }

    /// Returns true for errors that indicate a bug rather than bad input.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Self::IllegalState(_))
    }
}
