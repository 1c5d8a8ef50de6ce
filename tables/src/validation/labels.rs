use tabula_core::label::is_valid_label;

use crate::command::TableCommand;
use crate::config::TableConfig;
use crate::error::{TableError, TableResult};
use crate::pipeline::Action;

/// Checks the label of the table itself.
pub struct TableLabelValidator {
    config: TableConfig,
}

impl TableLabelValidator {
    pub fn new(config: TableConfig) -> Self {
        Self { config }
    }
}

impl<C: TableCommand, S> Action<C, S> for TableLabelValidator {
    fn name(&self) -> &'static str {
        "validate-table-label"
    }

    fn apply(&self, command: &C, state: S) -> TableResult<S> {
        let max = self.config.max_label_length;
        match command.label() {
            Some(label) if !is_valid_label(label, max) => {
                Err(TableError::invalid_label("label", max))
            }
            _ => Ok(state),
        }
    }
}

/// Checks every row label that is set, the header's included.
pub struct RowLabelValidator {
    config: TableConfig,
}

impl RowLabelValidator {
    pub fn new(config: TableConfig) -> Self {
        Self { config }
    }
}

impl<C: TableCommand, S> Action<C, S> for RowLabelValidator {
    fn name(&self) -> &'static str {
        "validate-row-labels"
    }

    fn apply(&self, command: &C, state: S) -> TableResult<S> {
        let max = self.config.max_label_length;
        for (index, row) in command.rows().unwrap_or_default().iter().enumerate() {
            if let Some(label) = &row.label {
                if !is_valid_label(label, max) {
                    return Err(TableError::invalid_label(format!("rows[{}].label", index), max));
                }
            }
        }
        Ok(state)
    }
}
