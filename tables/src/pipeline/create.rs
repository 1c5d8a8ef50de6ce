//! Steps of the create pipeline.

use std::sync::Arc;

use tracing::debug;

use tabula_core::vocab::classes;
use tabula_core::ThingId;
use tabula_graph::ports::{CreateResourceCommand, ResourceUseCases};

use super::{Action, Pipeline, PipelineBuilder};
use crate::command::{CreateTableCommand, RowDefinition};
use crate::config::TableConfig;
use crate::error::{TableError, TableResult};
use crate::service::TablePorts;
use crate::state::CreateTableState;
use crate::validation::{
    CellReferenceValidator, ColumnTypeValidator, DimensionValidator, RowLabelValidator,
    TableLabelValidator, TempIdValidator, ThingDefinitionValidator, ThingIdValidator,
};
use crate::writer::{TableCellCreator, TableColumnCreator, TableRowCreator};

/// Build the pipeline that creates a table.
pub fn create_table_pipeline(
    ports: &TablePorts,
    config: &TableConfig,
) -> Pipeline<CreateTableCommand, CreateTableState> {
    let thing_ids = ThingIdValidator::new(ports.things.clone(), config.clone());

    PipelineBuilder::new("create-table")
        .validate(TableLabelValidator::new(config.clone()))
        .validate(TempIdValidator::new(config.clone()))
        .validate(ThingDefinitionValidator::new(thing_ids.clone(), config.clone()))
        .validate(DimensionValidator)
        .validate(RowLabelValidator::new(config.clone()))
        .validate(ColumnTypeValidator::new(thing_ids.clone()))
        .validate(CellReferenceValidator::new(thing_ids))
        .writing()
        .write(ports.thing_definition_creator())
        .write(TableResourceCreator::new(ports.resources.clone()))
        .write(TableColumnsCreator::new(ports.column_creator()))
        .write(TableRowsCreator::new(ports.row_creator()))
        .write(TableCellsCreator::new(ports.cell_creator()))
        .build()
}

fn header(rows: &[RowDefinition]) -> TableResult<&RowDefinition> {
    rows.first().ok_or(TableError::MissingTableRows)
}

fn table_id(state: &CreateTableState) -> TableResult<&ThingId> {
    state
        .table_id
        .as_ref()
        .ok_or_else(|| TableError::illegal_state("Table resource was not created."))
}

/// Creates the table resource itself.
pub struct TableResourceCreator {
    resources: Arc<dyn ResourceUseCases>,
}

impl TableResourceCreator {
    pub fn new(resources: Arc<dyn ResourceUseCases>) -> Self {
        Self { resources }
    }
}

impl Action<CreateTableCommand, CreateTableState> for TableResourceCreator {
    fn name(&self) -> &'static str {
        "create-table-resource"
    }

    fn apply(
        &self,
        command: &CreateTableCommand,
        mut state: CreateTableState,
    ) -> TableResult<CreateTableState> {
        // Only one observatory and organization can be attributed.
        let id = self.resources.create_resource(
            CreateResourceCommand::new(command.contributor_id, command.label.as_str())
                .with_class(classes::TABLE)
                .with_observatory(command.observatories.first().copied())
                .with_organization(command.organizations.first().copied())
                .with_extraction_method(command.extraction_method),
        )?;
        debug!(table = %id, "table resource created");
        state.table_id = Some(id);
        Ok(state)
    }
}

/// Creates one column per header value.
pub struct TableColumnsCreator {
    columns: TableColumnCreator,
}

impl TableColumnsCreator {
    pub fn new(columns: TableColumnCreator) -> Self {
        Self { columns }
    }
}

impl Action<CreateTableCommand, CreateTableState> for TableColumnsCreator {
    fn name(&self) -> &'static str {
        "create-columns"
    }

    fn apply(
        &self,
        command: &CreateTableCommand,
        mut state: CreateTableState,
    ) -> TableResult<CreateTableState> {
        let table_id = table_id(&state)?.clone();
        let mut column_ids = Vec::new();
        for (index, title) in header(&command.rows)?.data.iter().enumerate() {
            let title = title
                .as_deref()
                .ok_or(TableError::missing_header_value(index))?;
            let title_id = state.identities.require(title)?;
            column_ids.push(
                self.columns
                    .create(command.contributor_id, &table_id, index, Some(&title_id))?,
            );
        }
        state.column_ids = column_ids;
        Ok(state)
    }
}

/// Creates one row per data row, labels included.
pub struct TableRowsCreator {
    rows: TableRowCreator,
}

impl TableRowsCreator {
    pub fn new(rows: TableRowCreator) -> Self {
        Self { rows }
    }
}

impl Action<CreateTableCommand, CreateTableState> for TableRowsCreator {
    fn name(&self) -> &'static str {
        "create-rows"
    }

    fn apply(
        &self,
        command: &CreateTableCommand,
        mut state: CreateTableState,
    ) -> TableResult<CreateTableState> {
        let table_id = table_id(&state)?.clone();
        let row_ids = command
            .rows
            .iter()
            .skip(1)
            .enumerate()
            .map(|(index, row)| {
                self.rows
                    .create(command.contributor_id, &table_id, index, row.label.as_deref())
            })
            .collect::<TableResult<Vec<_>>>()?;
        state.row_ids = row_ids;
        Ok(state)
    }
}

/// Creates a cell for every non-empty value.
pub struct TableCellsCreator {
    cells: TableCellCreator,
}

impl TableCellsCreator {
    pub fn new(cells: TableCellCreator) -> Self {
        Self { cells }
    }
}

impl Action<CreateTableCommand, CreateTableState> for TableCellsCreator {
    fn name(&self) -> &'static str {
        "create-cells"
    }

    fn apply(
        &self,
        command: &CreateTableCommand,
        state: CreateTableState,
    ) -> TableResult<CreateTableState> {
        for (row, row_id) in command.rows.iter().skip(1).zip(&state.row_ids) {
            for (slot, value) in row.data.iter().enumerate() {
                let Some(value) = value else {
                    continue;
                };
                let value_id = state.identities.require(value)?;
                let column_id = state.column_ids.get(slot).ok_or_else(|| {
                    TableError::illegal_state(format!("No column at index {}.", slot))
                })?;
                self.cells
                    .create(command.contributor_id, row_id, column_id, Some(&value_id))?;
            }
        }
        Ok(state)
    }
}
