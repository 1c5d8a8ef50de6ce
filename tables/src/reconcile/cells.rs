use std::sync::Arc;

use tracing::{debug, error, info};

use tabula_core::{ContributorId, ThingId};
use tabula_graph::ports::{ResourceUseCases, StatementUseCases};

use super::{column_at, resolve_values, Deletions};
use crate::cache::IdentityCache;
use crate::command::{RowDefinition, UpdateTableCommand};
use crate::error::{TableError, TableResult};
use crate::pipeline::Action;
use crate::reader::RowGraph;
use crate::state::UpdateTableState;
use crate::writer::TableCellCreator;

/// Patches cell values, adds and removes cells, then applies every deletion
/// scheduled by the reconciliation steps.
pub struct TableCellsUpdater {
    cells: TableCellCreator,
    resources: Arc<dyn ResourceUseCases>,
    statements: Arc<dyn StatementUseCases>,
}

impl TableCellsUpdater {
    pub fn new(
        resources: Arc<dyn ResourceUseCases>,
        statements: Arc<dyn StatementUseCases>,
    ) -> Self {
        Self {
            cells: TableCellCreator::new(resources.clone(), statements.clone()),
            resources,
            statements,
        }
    }

    /// Diff one desired row against its persisted counterpart.
    fn patch_row(
        &self,
        contributor_id: ContributorId,
        existing: &RowGraph,
        values: &[Option<ThingId>],
        column_ids: &[ThingId],
        deletions: &mut Deletions<'_>,
    ) -> TableResult<()> {
        for (slot, value) in values.iter().enumerate() {
            match existing.cells.get(slot).and_then(Option::as_ref) {
                None => {
                    if let Some(value) = value {
                        let column_id = column_at(column_ids, slot)?;
                        self.cells
                            .create(contributor_id, &existing.row_id, column_id, Some(value))?;
                    }
                }
                Some(cell) if cell.value_id() != value.as_ref() => {
                    if let Some(old) = &cell.value_statement {
                        deletions.statements.insert(old.id.clone());
                    }
                    if let Some(value) = value {
                        self.cells.link_value(contributor_id, &cell.cell_id, value)?;
                    }
                    debug!(cell = %cell.cell_id, "cell value replaced");
                }
                Some(_) => {}
            }
        }

        for cell in existing.cells.iter().skip(values.len()).flatten() {
            deletions.cell(cell);
        }
        // Stray cells would keep a deleted column referenced.
        for cell in &existing.stray_cells {
            if cell.column_id().is_some_and(|c| deletions.things.contains(c)) {
                deletions.cell(cell);
            }
        }
        Ok(())
    }

    /// Create the non-empty cells of a row that has none yet.
    fn fill_row(
        &self,
        contributor_id: ContributorId,
        row_id: &ThingId,
        values: &[Option<ThingId>],
        column_ids: &[ThingId],
    ) -> TableResult<()> {
        for (slot, value) in values.iter().enumerate() {
            if let Some(value) = value {
                let column_id = column_at(column_ids, slot)?;
                self.cells.create(contributor_id, row_id, column_id, Some(value))?;
            }
        }
        Ok(())
    }

    /// Delete the scheduled statements, then the scheduled resources.
    fn apply_deletions(
        &self,
        contributor_id: ContributorId,
        identities: &IdentityCache,
        deletions: &Deletions<'_>,
    ) -> TableResult<()> {
        for id in deletions.things.iter() {
            if identities.resource(id).is_none() {
                error!(thing = %id, "scheduled deletion of a thing that is not a known resource");
                return Err(TableError::illegal_state(format!(
                    "Thing \"{}\" is not a known resource.",
                    id
                )));
            }
        }

        if !deletions.statements.is_empty() {
            self.statements.delete_statements(&*deletions.statements)?;
        }
        for id in deletions.things.iter() {
            self.resources.delete_resource(id, contributor_id)?;
        }
        if !deletions.things.is_empty() || !deletions.statements.is_empty() {
            info!(
                statements = deletions.statements.len(),
                things = deletions.things.len(),
                "applied table deletions"
            );
        }
        Ok(())
    }
}

/// Returns true if the desired row matches the persisted one exactly.
fn is_unchanged(desired: &RowDefinition, values: &[Option<ThingId>], existing: &RowGraph) -> bool {
    desired.label.as_deref() == existing.label()
        && values.len() == existing.cells.len()
        && values
            .iter()
            .zip(existing.value_ids())
            .all(|(value, current)| value.as_ref() == current)
}

impl Action<UpdateTableCommand, UpdateTableState> for TableCellsUpdater {
    fn name(&self) -> &'static str {
        "update-cells"
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

        let UpdateTableState {
            identities,
            existing_rows,
            column_ids,
            row_ids,
            things_to_delete,
            statements_to_delete,
            ..
        } = &mut state;
        let mut deletions = Deletions {
            things: things_to_delete,
            statements: statements_to_delete,
        };

        for (index, row) in desired.iter().enumerate() {
            let values = resolve_values(identities, &row.data)?;
            match existing_rows.get(index) {
                Some(existing) if is_unchanged(row, &values, existing) => {}
                Some(existing) => {
                    self.patch_row(contributor_id, existing, &values, column_ids, &mut deletions)?
                }
                None => {
                    let row_id = row_ids.get(index).ok_or_else(|| {
                        TableError::illegal_state(format!("No row at index {}.", index))
                    })?;
                    self.fill_row(contributor_id, row_id, &values, column_ids)?;
                }
            }
        }

        for row in existing_rows.iter().skip(desired.len()) {
            for cell in row.all_cells() {
                deletions.cell(cell);
            }
        }

        self.apply_deletions(contributor_id, identities, &deletions)?;
        Ok(state)
    }
}
