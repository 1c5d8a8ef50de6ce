//! Write side: materialize columns, rows, cells and declared things.
//!
//! Writers issue independent mutation calls in a fixed order; atomicity is
//! left to the caller's transaction.

mod cell;
mod column;
mod row;
mod things;

use tabula_core::{ContributorId, StatementId, ThingId};
use tabula_graph::ports::{CreateStatementCommand, StatementUseCases};

use crate::error::TableResult;

pub use cell::TableCellCreator;
pub use column::TableColumnCreator;
pub use row::TableRowCreator;
pub use things::ThingDefinitionCreator;

/// Create `subject --predicate--> object`.
pub(crate) fn link(
    statements: &dyn StatementUseCases,
    contributor_id: ContributorId,
    subject: &ThingId,
    predicate: &str,
    object: &ThingId,
) -> TableResult<StatementId> {
    let id = statements.create_statement(CreateStatementCommand {
        contributor_id,
        subject_id: subject.clone(),
        predicate_id: ThingId::new(predicate),
        object_id: object.clone(),
    })?;
    Ok(id)
}
