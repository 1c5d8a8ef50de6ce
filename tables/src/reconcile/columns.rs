use std::sync::Arc;

use tracing::debug;

use tabula_core::vocab::predicates;
use tabula_core::ThingId;
use tabula_graph::ports::{LiteralUseCases, ResourceUseCases, StatementUseCases};

use crate::command::UpdateTableCommand;
use crate::error::{TableError, TableResult};
use crate::pipeline::Action;
use crate::state::UpdateTableState;
use crate::writer::{link, TableColumnCreator};

/// Patches column titles, adds and removes columns.
pub struct TableColumnsUpdater {
    columns: TableColumnCreator,
    statements: Arc<dyn StatementUseCases>,
}

impl TableColumnsUpdater {
    pub fn new(
        resources: Arc<dyn ResourceUseCases>,
        literals: Arc<dyn LiteralUseCases>,
        statements: Arc<dyn StatementUseCases>,
    ) -> Self {
        Self {
            columns: TableColumnCreator::new(resources, literals, statements.clone()),
            statements,
        }
    }
}

impl Action<UpdateTableCommand, UpdateTableState> for TableColumnsUpdater {
    fn name(&self) -> &'static str {
        "update-columns"
    }

    fn apply(
        &self,
        command: &UpdateTableCommand,
        mut state: UpdateTableState,
    ) -> TableResult<UpdateTableState> {
        let Some(rows) = command.rows.as_deref() else {
            return Ok(state);
        };
        let header = rows.first().ok_or(TableError::MissingTableRows)?;
        let titles = header
            .data
            .iter()
            .enumerate()
            .map(|(index, title)| match title {
                Some(title) => state.identities.require(title),
                None => Err(TableError::missing_header_value(index)),
            })
            .collect::<TableResult<Vec<ThingId>>>()?;

        let contributor_id = command.contributor_id;
        let mut column_ids = Vec::with_capacity(titles.len());
        for (index, title_id) in titles.iter().enumerate() {
            let Some(column) = state.existing_columns.get(index) else {
                let column_id =
                    self.columns
                        .create(contributor_id, &command.table_id, index, Some(title_id))?;
                debug!(column = %column_id, index, "column created");
                column_ids.push(column_id);
                continue;
            };

            if column.title_id() != Some(title_id) {
                if let Some(old) = &column.title_statement {
                    state.statements_to_delete.insert(old.id.clone());
                }
                link(
                    self.statements.as_ref(),
                    contributor_id,
                    &column.column_id,
                    predicates::CSVW_TITLES,
                    title_id,
                )?;
                debug!(column = %column.column_id, title = %title_id, "column title replaced");
            }
            column_ids.push(column.column_id.clone());
        }

        for column in state.existing_columns.iter().skip(titles.len()) {
            debug!(column = %column.column_id, "column marked for deletion");
            state.things_to_delete.insert(column.column_id.clone());
            state.statements_to_delete.extend(column.statement_ids());
        }

        state.column_ids = column_ids;
        Ok(state)
    }
}
