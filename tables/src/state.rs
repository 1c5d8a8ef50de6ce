//! Pipeline states.
//!
//! Each step takes a state by value and returns the next one. Later steps
//! only read fields earlier steps filled in.

use std::collections::BTreeSet;

use tabula_core::{Resource, Statement, StatementId, ThingId};

use crate::cache::IdentityCache;
use crate::reader::{ColumnGraph, RowGraph};

/// Access to the identity cache shared by the validation steps.
pub trait ValidationState {
    fn identities(&self) -> &IdentityCache;

    fn identities_mut(&mut self) -> &mut IdentityCache;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateTableState {
    pub identities: IdentityCache,
    pub table_id: Option<ThingId>,
    /// Created column ids, in position order.
    pub column_ids: Vec<ThingId>,
    /// Created row ids, in position order.
    pub row_ids: Vec<ThingId>,
}

impl CreateTableState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ValidationState for CreateTableState {
    fn identities(&self) -> &IdentityCache {
        &self.identities
    }

    fn identities_mut(&mut self) -> &mut IdentityCache {
        &mut self.identities
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateTableState {
    /// The table resource, once looked up.
    pub table: Option<Resource>,
    /// Every statement reachable from the table.
    pub statements: Vec<Statement>,
    pub identities: IdentityCache,
    /// Columns as persisted before the update.
    pub existing_columns: Vec<ColumnGraph>,
    /// Rows as persisted before the update.
    pub existing_rows: Vec<RowGraph>,
    /// Column ids after reconciliation, in position order.
    pub column_ids: Vec<ThingId>,
    /// Row ids after reconciliation, in position order.
    pub row_ids: Vec<ThingId>,
    pub things_to_delete: BTreeSet<ThingId>,
    pub statements_to_delete: BTreeSet<StatementId>,
}

impl UpdateTableState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ValidationState for UpdateTableState {
    fn identities(&self) -> &IdentityCache {
        &self.identities
    }

    fn identities_mut(&mut self) -> &mut IdentityCache {
        &mut self.identities
    }
}
