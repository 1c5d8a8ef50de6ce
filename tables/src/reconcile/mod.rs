//! Positional diff and patch of an existing table.
//!
//! Each dimension is reconciled in three phases: pairs of desired and
//! existing entries are patched in place, extra desired entries are created
//! at their index, and extra existing entries are marked for deletion.
//! Deletions are collected in the state and applied at the end of the cells
//! phase, statements first.

mod cells;
mod columns;
mod rows;

use std::collections::BTreeSet;

use tabula_core::{StatementId, ThingId};

use crate::cache::IdentityCache;
use crate::error::{TableError, TableResult};
use crate::reader::CellGraph;

pub use cells::TableCellsUpdater;
pub use columns::TableColumnsUpdater;
pub use rows::TableRowsUpdater;

/// Resolve the ids of one row to persisted things.
pub(crate) fn resolve_values(
    cache: &IdentityCache,
    data: &[Option<String>],
) -> TableResult<Vec<Option<ThingId>>> {
    data.iter()
        .map(|value| value.as_deref().map(|id| cache.require(id)).transpose())
        .collect()
}

/// Look up the column at a slot, which earlier steps guarantee exists.
pub(crate) fn column_at(column_ids: &[ThingId], slot: usize) -> TableResult<&ThingId> {
    column_ids
        .get(slot)
        .ok_or_else(|| TableError::illegal_state(format!("No column at index {}.", slot)))
}

/// Statement and thing ids scheduled for deletion.
pub(crate) struct Deletions<'a> {
    pub things: &'a mut BTreeSet<ThingId>,
    pub statements: &'a mut BTreeSet<StatementId>,
}

impl Deletions<'_> {
    pub fn cell(&mut self, cell: &CellGraph) {
        self.things.insert(cell.cell_id.clone());
        self.statements.extend(cell.statement_ids());
    }
}
