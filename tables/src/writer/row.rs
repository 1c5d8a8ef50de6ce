use std::sync::Arc;

use tabula_core::vocab::{classes, datatypes, predicates};
use tabula_core::{ContributorId, ThingId};
use tabula_graph::ports::{
    CreateLiteralCommand, CreateResourceCommand, LiteralUseCases, ResourceUseCases,
    StatementUseCases,
};

use super::link;
use crate::error::TableResult;

/// Creates one row of a table, without its cells.
#[derive(Clone)]
pub struct TableRowCreator {
    resources: Arc<dyn ResourceUseCases>,
    literals: Arc<dyn LiteralUseCases>,
    statements: Arc<dyn StatementUseCases>,
}

impl TableRowCreator {
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

    /// Create the data row at 0-based `index`.
    pub fn create(
        &self,
        contributor_id: ContributorId,
        table_id: &ThingId,
        index: usize,
        label: Option<&str>,
    ) -> TableResult<ThingId> {
        let row_id = self.resources.create_resource(
            CreateResourceCommand::new(contributor_id, "").with_class(classes::ROW),
        )?;

        let number_id = self.literals.create_literal(CreateLiteralCommand {
            contributor_id,
            label: (index + 1).to_string(),
            datatype: datatypes::XSD_INTEGER.to_string(),
        })?;
        let statements = self.statements.as_ref();
        link(statements, contributor_id, &row_id, predicates::CSVW_NUMBER, &number_id)?;

        if let Some(label) = label {
            self.create_label(contributor_id, &row_id, label)?;
        }

        link(statements, contributor_id, table_id, predicates::CSVW_ROWS, &row_id)?;
        Ok(row_id)
    }

    /// Attach a fresh label literal to a row.
    pub fn create_label(
        &self,
        contributor_id: ContributorId,
        row_id: &ThingId,
        label: &str,
    ) -> TableResult<ThingId> {
        let label_id = self.literals.create_literal(CreateLiteralCommand {
            contributor_id,
            label: label.to_string(),
            datatype: datatypes::XSD_STRING.to_string(),
        })?;
        link(
            self.statements.as_ref(),
            contributor_id,
            row_id,
            predicates::CSVW_TITLES,
            &label_id,
        )?;
        Ok(label_id)
    }
}
