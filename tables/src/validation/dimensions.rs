use crate::command::{RowDefinition, TableCommand};
use crate::error::{TableError, TableResult};
use crate::pipeline::Action;

/// Checks that a header exists, has no blank values, and that every data
/// row is exactly as long as the header.
pub struct DimensionValidator;

impl DimensionValidator {
    pub fn validate(rows: &[RowDefinition]) -> TableResult<()> {
        let header = rows.first().ok_or(TableError::MissingTableRows)?;
        for (index, value) in header.data.iter().enumerate() {
            if value.as_deref().map_or(true, |v| v.trim().is_empty()) {
                return Err(TableError::missing_header_value(index));
            }
        }

        let expected = header.data.len();
        for (row_index, row) in rows.iter().enumerate().skip(1) {
            if row.data.len() > expected {
                return Err(TableError::too_many_row_values(row_index, expected));
            }
            if row.data.len() < expected {
                return Err(TableError::missing_row_values(row_index, expected));
            }
        }
        Ok(())
    }
}

impl<C: TableCommand, S> Action<C, S> for DimensionValidator {
    fn name(&self) -> &'static str {
        "validate-dimensions"
    }

    fn apply(&self, command: &C, state: S) -> TableResult<S> {
        if let Some(rows) = command.rows() {
            Self::validate(rows)?;
        }
        Ok(state)
    }
}
