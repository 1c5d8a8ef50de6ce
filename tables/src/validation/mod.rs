//! Structural and reference validators.
//!
//! Every validator runs before the first mutation of a command, so a
//! rejected command leaves the graph untouched.

mod dimensions;
mod header;
mod labels;
mod references;
mod temp_ids;
mod thing_id;
mod things;

pub use dimensions::DimensionValidator;
pub use header::ColumnTypeValidator;
pub use labels::{RowLabelValidator, TableLabelValidator};
pub use references::CellReferenceValidator;
pub use temp_ids::TempIdValidator;
pub use thing_id::ThingIdValidator;
pub use things::ThingDefinitionValidator;
