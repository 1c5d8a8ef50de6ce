use std::sync::Arc;

use tabula_core::vocab::{classes, datatypes, predicates};
use tabula_core::{ContributorId, ThingId};
use tabula_graph::ports::{
    CreateLiteralCommand, CreateResourceCommand, LiteralUseCases, ResourceUseCases,
    StatementUseCases,
};

use super::link;
use crate::error::TableResult;

/// Creates one column of a table.
#[derive(Clone)]
pub struct TableColumnCreator {
    resources: Arc<dyn ResourceUseCases>,
    literals: Arc<dyn LiteralUseCases>,
    statements: Arc<dyn StatementUseCases>,
}

impl TableColumnCreator {
    pub fn new(
        resources: Arc<dyn ResourceUseCases>,
        literals: Arc<dyn LiteralUseCases>,
        statements: Arc<dyn StatementUseCases>,
    ) -> Self {
        Self {
            resources,
            literals,
            statements,
        }
    }

    /// Create the column at 0-based `index`, titled by an existing literal.
    pub fn create(
        &self,
        contributor_id: ContributorId,
        table_id: &ThingId,
        index: usize,
        title_id: Option<&ThingId>,
    ) -> TableResult<ThingId> {
        let column_id = self.resources.create_resource(
            CreateResourceCommand::new(contributor_id, "").with_class(classes::COLUMN),
        )?;

        let number_id = self.literals.create_literal(CreateLiteralCommand {
            contributor_id,
            label: (index + 1).to_string(),
            datatype: datatypes::XSD_INTEGER.to_string(),
        })?;
        let statements = self.statements.as_ref();
        link(statements, contributor_id, &column_id, predicates::CSVW_NUMBER, &number_id)?;

        if let Some(title_id) = title_id {
            link(statements, contributor_id, &column_id, predicates::CSVW_TITLES, title_id)?;
        }

        link(statements, contributor_id, table_id, predicates::CSVW_COLUMNS, &column_id)?;
        Ok(column_id)
    }
}
