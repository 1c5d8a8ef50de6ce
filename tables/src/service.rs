//! Table service: the composition root of the table pipelines.

use std::sync::Arc;

use tracing::info;

use tabula_core::vocab::classes;
use tabula_core::ThingId;
use tabula_graph::ports::{
    ClassUseCases, LiteralUseCases, PredicateUseCases, ResourceRepository, ResourceUseCases,
    StatementRepository, StatementUseCases, ThingRepository,
};

use crate::command::{CreateTableCommand, UpdateTableCommand};
use crate::config::TableConfig;
use crate::error::{TableError, TableResult};
use crate::pipeline::{create_table_pipeline, update_table_pipeline, Pipeline};
use crate::reader::{Table, TableGraph};
use crate::state::{CreateTableState, UpdateTableState};
use crate::writer::{TableCellCreator, TableColumnCreator, TableRowCreator, ThingDefinitionCreator};

/// The graph collaborators the table pipelines depend on.
#[derive(Clone)]
pub struct TablePorts {
    pub resources: Arc<dyn ResourceUseCases>,
    pub literals: Arc<dyn LiteralUseCases>,
    pub statements: Arc<dyn StatementUseCases>,
    pub predicates: Arc<dyn PredicateUseCases>,
    pub classes: Arc<dyn ClassUseCases>,
    pub things: Arc<dyn ThingRepository>,
    pub resource_repository: Arc<dyn ResourceRepository>,
    pub statement_repository: Arc<dyn StatementRepository>,
}

impl TablePorts {
    /// Wire every port to one adapter implementing all of them.
    pub fn from_adapter<A>(adapter: Arc<A>) -> Self
    where
        A: ResourceUseCases
            + LiteralUseCases
            + StatementUseCases
            + PredicateUseCases
            + ClassUseCases
            + ThingRepository
            + ResourceRepository
            + StatementRepository
            + 'static,
    {
        Self {
            resources: adapter.clone(),
            literals: adapter.clone(),
            statements: adapter.clone(),
            predicates: adapter.clone(),
            classes: adapter.clone(),
            things: adapter.clone(),
            resource_repository: adapter.clone(),
            statement_repository: adapter,
        }
    }

    pub(crate) fn thing_definition_creator(&self) -> ThingDefinitionCreator {
        ThingDefinitionCreator::new(
            self.resources.clone(),
            self.literals.clone(),
            self.statements.clone(),
            self.predicates.clone(),
            self.classes.clone(),
        )
    }

    pub(crate) fn column_creator(&self) -> TableColumnCreator {
        TableColumnCreator::new(
            self.resources.clone(),
            self.literals.clone(),
            self.statements.clone(),
        )
    }

    pub(crate) fn row_creator(&self) -> TableRowCreator {
        TableRowCreator::new(
            self.resources.clone(),
            self.literals.clone(),
            self.statements.clone(),
        )
    }

    pub(crate) fn cell_creator(&self) -> TableCellCreator {
        TableCellCreator::new(self.resources.clone(), self.statements.clone())
    }
}

/// Creates, updates and reads tables.
///
/// Mutations are issued in pipeline order without a transaction of their
/// own; callers wrap `create` and `update` in whatever transaction their
/// adapter offers.
pub struct TableService {
    ports: TablePorts,
    config: TableConfig,
    create: Pipeline<CreateTableCommand, CreateTableState>,
    update: Pipeline<UpdateTableCommand, UpdateTableState>,
}

impl TableService {
    pub fn new(ports: TablePorts) -> Self {
        Self::with_config(ports, TableConfig::default())
    }

    pub fn with_config(ports: TablePorts, config: TableConfig) -> Self {
        let create = create_table_pipeline(&ports, &config);
        let update = update_table_pipeline(&ports, &config);
        Self {
            ports,
            config,
            create,
            update,
        }
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Create a table and return its id.
    pub fn create(&self, command: CreateTableCommand) -> TableResult<ThingId> {
        let state = self.create.execute(&command, CreateTableState::new())?;
        let id = state
            .table_id
            .ok_or_else(|| TableError::illegal_state("Table resource was not created."))?;
        info!(
            table = %id,
            columns = state.column_ids.len(),
            rows = state.row_ids.len(),
            "table created"
        );
        Ok(id)
    }

    /// Update a table in place.
    pub fn update(&self, command: UpdateTableCommand) -> TableResult<()> {
        let state = self.update.execute(&command, UpdateTableState::new())?;
        info!(
            table = %command.table_id,
            deleted_statements = state.statements_to_delete.len(),
            deleted_things = state.things_to_delete.len(),
            "table updated"
        );
        Ok(())
    }

    /// Read a table back, header row first.
    pub fn find_by_id(&self, id: &ThingId) -> Option<Table> {
        let resource = self
            .ports
            .resource_repository
            .find_resource(id)
            .filter(|r| r.has_class(classes::TABLE))?;
        let statements = self
            .ports
            .statement_repository
            .fetch_bundle(id, self.config.bundle_depth);
        Some(Table::from_graph(&resource, &TableGraph::parse(id, &statements)))
    }
}
