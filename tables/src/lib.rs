//! Tabula Tables
//!
//! Stores two-dimensional tables in a knowledge graph and keeps them in sync
//! with client edits:
//! - A table is a resource linked to Column, Row and Cell resources
//! - Creation validates the whole command, then writes it top-down
//! - Updates diff the desired rows against the persisted structure and patch
//!   only what changed, so unchanged cells keep their identity
//!
//! Commands refer to things either by id or by a temporary id declared in
//! the same command.

mod cache;
mod command;
mod config;
mod error;
pub mod pipeline;
mod reader;
mod reconcile;
mod service;
mod state;
pub mod validation;
mod writer;

pub use cache::{IdentityCache, Resolution};
pub use command::{
    ClassDefinition, CreateTableCommand, ListDefinition, LiteralDefinition, PredicateDefinition,
    ResourceDefinition, RowDefinition, TableCommand, ThingDefinition, ThingDefinitions,
    UpdateTableCommand,
};
pub use config::TableConfig;
pub use error::{TableError, TableResult};
pub use reader::{CellGraph, ColumnGraph, RowGraph, Table, TableGraph, TableRow};
pub use reconcile::{TableCellsUpdater, TableColumnsUpdater, TableRowsUpdater};
pub use service::{TablePorts, TableService};
pub use state::{CreateTableState, UpdateTableState, ValidationState};
pub use writer::{TableCellCreator, TableColumnCreator, TableRowCreator, ThingDefinitionCreator};
