//! Steps of the update pipeline.

use std::sync::Arc;

use tracing::{debug, info};

use tabula_core::vocab::classes;
use tabula_core::Resource;
use tabula_graph::ports::{
    ResourceRepository, ResourceUseCases, StatementRepository, UpdateResourceCommand,
};

use super::{Action, Pipeline, PipelineBuilder};
use crate::command::UpdateTableCommand;
use crate::config::TableConfig;
use crate::error::{TableError, TableResult};
use crate::reader::TableGraph;
use crate::reconcile::{TableCellsUpdater, TableColumnsUpdater, TableRowsUpdater};
use crate::service::TablePorts;
use crate::state::UpdateTableState;
use crate::validation::{
    CellReferenceValidator, ColumnTypeValidator, DimensionValidator, RowLabelValidator,
    TableLabelValidator, TempIdValidator, ThingDefinitionValidator, ThingIdValidator,
};

/// Build the pipeline that updates a table.
pub fn update_table_pipeline(
    ports: &TablePorts,
    config: &TableConfig,
) -> Pipeline<UpdateTableCommand, UpdateTableState> {
    let thing_ids = ThingIdValidator::new(ports.things.clone(), config.clone());

    PipelineBuilder::new("update-table")
        .validate(TableExistenceValidator::new(ports.resource_repository.clone()))
        .validate(TableModifiableValidator)
        .validate(TableStatementsLoader::new(
            ports.statement_repository.clone(),
            config.bundle_depth,
        ))
        .validate(TableLabelValidator::new(config.clone()))
        .validate(TempIdValidator::new(config.clone()))
        .validate(ThingDefinitionValidator::new(thing_ids.clone(), config.clone()))
        .validate(DimensionValidator)
        .validate(RowLabelValidator::new(config.clone()))
        .validate(ColumnTypeValidator::new(thing_ids.clone()))
        .validate(CellReferenceValidator::new(thing_ids))
        .writing()
        .write(ports.thing_definition_creator())
        .reconciling()
        .reconcile(TableGraphParser)
        .reconcile(TableColumnsUpdater::new(
            ports.resources.clone(),
            ports.literals.clone(),
            ports.statements.clone(),
        ))
        .reconcile(TableRowsUpdater::new(
            ports.resources.clone(),
            ports.literals.clone(),
            ports.statements.clone(),
        ))
        .reconcile(TableCellsUpdater::new(
            ports.resources.clone(),
            ports.statements.clone(),
        ))
        .reconcile(TableMetadataUpdater::new(ports.resources.clone()))
        .build()
}

fn loaded_table(state: &UpdateTableState) -> TableResult<&Resource> {
    state
        .table
        .as_ref()
        .ok_or_else(|| TableError::illegal_state("Table was not loaded."))
}

/// Looks the table up; fails if it is absent or not a table.
pub struct TableExistenceValidator {
    resources: Arc<dyn ResourceRepository>,
}

impl TableExistenceValidator {
    pub fn new(resources: Arc<dyn ResourceRepository>) -> Self {
        Self { resources }
    }
}

impl Action<UpdateTableCommand, UpdateTableState> for TableExistenceValidator {
    fn name(&self) -> &'static str {
        "validate-table-exists"
    }

    fn apply(
        &self,
        command: &UpdateTableCommand,
        mut state: UpdateTableState,
    ) -> TableResult<UpdateTableState> {
        let table = self
            .resources
            .find_resource(&command.table_id)
            .filter(|resource| resource.has_class(classes::TABLE))
            .ok_or_else(|| TableError::TableNotFound(command.table_id.clone()))?;
        state.table = Some(table);
        Ok(state)
    }
}

/// Rejects tables owned by the system.
pub struct TableModifiableValidator;

impl Action<UpdateTableCommand, UpdateTableState> for TableModifiableValidator {
    fn name(&self) -> &'static str {
        "validate-table-modifiable"
    }

    fn apply(
        &self,
        _command: &UpdateTableCommand,
        state: UpdateTableState,
    ) -> TableResult<UpdateTableState> {
        let table = loaded_table(&state)?;
        if !table.modifiable {
            return Err(TableError::TableNotModifiable(table.id.clone()));
        }
        Ok(state)
    }
}

/// Reads every statement reachable from the table, and puts each thing they
/// mention into the identity cache.
pub struct TableStatementsLoader {
    statements: Arc<dyn StatementRepository>,
    depth: usize,
}

impl TableStatementsLoader {
    pub fn new(statements: Arc<dyn StatementRepository>, depth: usize) -> Self {
        Self { statements, depth }
    }
}

impl Action<UpdateTableCommand, UpdateTableState> for TableStatementsLoader {
    fn name(&self) -> &'static str {
        "load-table-statements"
    }

    fn apply(
        &self,
        command: &UpdateTableCommand,
        mut state: UpdateTableState,
    ) -> TableResult<UpdateTableState> {
        let statements = self.statements.fetch_bundle(&command.table_id, self.depth);
        for statement in &statements {
            state.identities.insert_resolved(statement.subject.clone());
            state.identities.insert_resolved(statement.object.clone());
        }
        debug!(table = %command.table_id, count = statements.len(), "table statements loaded");
        state.statements = statements;
        Ok(state)
    }
}

/// Rebuilds the persisted columns and rows. Skipped when the command leaves
/// the rows untouched.
pub struct TableGraphParser;

impl Action<UpdateTableCommand, UpdateTableState> for TableGraphParser {
    fn name(&self) -> &'static str {
        "parse-table-graph"
    }

    fn apply(
        &self,
        command: &UpdateTableCommand,
        mut state: UpdateTableState,
    ) -> TableResult<UpdateTableState> {
        if command.rows.is_none() {
            return Ok(state);
        }
        let parsed = TableGraph::parse(&command.table_id, &state.statements);
        state.existing_columns = parsed.columns;
        state.existing_rows = parsed.rows;
        Ok(state)
    }
}

/// Updates the table resource's own label and attribution.
pub struct TableMetadataUpdater {
    resources: Arc<dyn ResourceUseCases>,
}

impl TableMetadataUpdater {
    pub fn new(resources: Arc<dyn ResourceUseCases>) -> Self {
        Self { resources }
    }
}

impl Action<UpdateTableCommand, UpdateTableState> for TableMetadataUpdater {
    fn name(&self) -> &'static str {
        "update-table-metadata"
    }

    fn apply(
        &self,
        command: &UpdateTableCommand,
        state: UpdateTableState,
    ) -> TableResult<UpdateTableState> {
        let update = UpdateResourceCommand {
            label: command.label.clone(),
            observatory_id: command.observatories.as_ref().and_then(|o| o.first().copied()),
            organization_id: command.organizations.as_ref().and_then(|o| o.first().copied()),
            extraction_method: command.extraction_method,
            visibility: command.visibility,
            ..UpdateResourceCommand::new(command.table_id.clone(), command.contributor_id)
        };
        if update.is_empty() {
            return Ok(state);
        }

        self.resources.update_resource(update)?;
        info!(table = %command.table_id, "table metadata updated");
        Ok(state)
    }
}
