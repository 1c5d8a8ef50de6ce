use std::sync::Arc;

use tracing::debug;

use tabula_graph::ports::{
    LiteralUseCases, ResourceUseCases, StatementUseCases, UpdateLiteralCommand,
};

use crate::command::UpdateTableCommand;
use crate::error::TableResult;
use crate::pipeline::Action;
use crate::state::UpdateTableState;
use crate::writer::TableRowCreator;

/// Patches row labels, adds and removes rows. Cells are left to
/// [`TableCellsUpdater`](super::TableCellsUpdater).
pub struct TableRowsUpdater {
    rows: TableRowCreator,
    literals: Arc<dyn LiteralUseCases>,
}

impl TableRowsUpdater {
    pub fn new(
        resources: Arc<dyn ResourceUseCases>,
        literals: Arc<dyn LiteralUseCases>,
        statements: Arc<dyn StatementUseCases>,
    ) -> Self {
        Self {
            rows: TableRowCreator::new(resources, literals.clone(), statements),
            literals,
        }
    }
}

impl Action<UpdateTableCommand, UpdateTableState> for TableRowsUpdater {
    fn name(&self) -> &'static str {
        "update-rows"
    }

    fn apply(
        &self,
        command: &UpdateTableCommand,
        mut state: UpdateTableState,
    ) -> TableResult<UpdateTableState> {
        let Some(rows) = command.rows.as_deref() else {
            return Ok(state);
        };
        let desired = rows.get(1..).unwrap_or_default();
        let contributor_id = command.contributor_id;

        let mut row_ids = Vec::with_capacity(desired.len());
        for (index, row) in desired.iter().enumerate() {
            let Some(existing) = state.existing_rows.get(index) else {
                let row_id =
                    self.rows
                        .create(contributor_id, &command.table_id, index, row.label.as_deref())?;
                debug!(row = %row_id, index, "row created");
                row_ids.push(row_id);
                continue;
            };

            match (row.label.as_deref(), &existing.label_statement) {
                (None, Some(old)) => {
                    state.statements_to_delete.insert(old.id.clone());
                }
                (Some(label), None) => {
                    self.rows.create_label(contributor_id, &existing.row_id, label)?;
                }
                (Some(label), Some(old)) if old.object.label() != label => {
                    self.literals.update_literal(UpdateLiteralCommand {
                        id: old.object.id().clone(),
                        contributor_id,
                        label: label.to_string(),
                    })?;
                    debug!(row = %existing.row_id, "row label updated");
                }
                _ => {}
            }
            row_ids.push(existing.row_id.clone());
        }

        for row in state.existing_rows.iter().skip(desired.len()) {
            debug!(row = %row.row_id, "row marked for deletion");
            state.things_to_delete.insert(row.row_id.clone());
            state.statements_to_delete.extend(row.statement_ids());
        }

        state.row_ids = row_ids;
        Ok(state)
    }
}
