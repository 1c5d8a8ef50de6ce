use std::sync::Arc;

use tabula_core::vocab::{classes, predicates};
use tabula_core::{ContributorId, StatementId, ThingId};
use tabula_graph::ports::{CreateResourceCommand, ResourceUseCases, StatementUseCases};

use super::link;
use crate::error::TableResult;

/// Creates one cell of a row.
#[derive(Clone)]
pub struct TableCellCreator {
    resources: Arc<dyn ResourceUseCases>,
    statements: Arc<dyn StatementUseCases>,
}

impl TableCellCreator {
    pub fn new(
        resources: Arc<dyn ResourceUseCases>,
        statements: Arc<dyn StatementUseCases>,
    ) -> Self {
        Self {
            resources,
            statements,
        }
    }

    pub fn create(
        &self,
        contributor_id: ContributorId,
        row_id: &ThingId,
        column_id: &ThingId,
        value_id: Option<&ThingId>,
    ) -> TableResult<ThingId> {
        let cell_id = self.resources.create_resource(
            CreateResourceCommand::new(contributor_id, "").with_class(classes::CELL),
        )?;

        let statements = self.statements.as_ref();
        link(statements, contributor_id, &cell_id, predicates::CSVW_COLUMN, column_id)?;
        if let Some(value_id) = value_id {
            self.link_value(contributor_id, &cell_id, value_id)?;
        }
        link(statements, contributor_id, row_id, predicates::CSVW_CELLS, &cell_id)?;
        Ok(cell_id)
    }

    /// Point an existing cell at a value.
    pub fn link_value(
        &self,
        contributor_id: ContributorId,
        cell_id: &ThingId,
        value_id: &ThingId,
    ) -> TableResult<StatementId> {
        link(
            self.statements.as_ref(),
            contributor_id,
            cell_id,
            predicates::CSVW_VALUE,
            value_id,
        )
    }
}
