//! Read side: rebuild table views from persisted statements.

mod graph;
mod table;

pub use graph::{CellGraph, ColumnGraph, RowGraph, TableGraph};
pub use table::{Table, TableRow};

#[cfg(test)]
pub(crate) use graph::tests::StatementFixture;
