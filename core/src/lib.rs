//! Tabula Core Types
//!
//! This crate provides the foundational types used throughout Tabula:
//! - Identity types (ThingId, StatementId, ContributorId, ...)
//! - Things (Resource, Literal, Predicate, Class) and statements
//! - The well-known vocabulary tables are encoded with
//! - Label and literal syntax
//! - Common error types

mod error;
mod id;
pub mod label;
mod thing;
pub mod vocab;

pub use error::*;
pub use id::*;
pub use thing::*;
