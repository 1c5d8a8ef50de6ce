//! Tabula Graph Storage
//!
//! This crate provides the graph-side collaborators of the table engine:
//! - Ports: the create/update/delete use cases and lookup repositories the
//!   engine is injected with
//! - Graph: in-memory thing and statement storage with indexed access
//! - Journal: an LSN-ordered log of every mutation call
//! - InMemoryGraph: a thread-safe adapter implementing every port

mod graph;
mod index;
mod journal;
mod memory;
pub mod ports;

pub use graph::*;
pub use journal::{Lsn, MutationEntry, MutationJournal, MutationKind, MutationRecord};
pub use memory::InMemoryGraph;
