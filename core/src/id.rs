//! Identity types for graph things and statements.
//!
//! Thing and statement identifiers are opaque strings:
//! - Assigned by the storage adapter on creation
//! - Immutable once assigned
//! - Compared by value, never parsed by the engine

use std::fmt;

/// Identifier of a thing (resource, literal, predicate or class).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ThingId(pub String);

impl ThingId {
    /// Create a new ThingId from a raw value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ThingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ThingId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Identifier of a statement (a directed, typed edge between two things).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StatementId(pub String);

impl StatementId {
    /// Create a new StatementId from a raw value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StatementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StatementId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Identifier of the user on whose behalf a mutation is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ContributorId(pub u64);

impl ContributorId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// The anonymous contributor.
    pub fn unknown() -> Self {
        Self(0)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ContributorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "u{}", self.0)
    }
}

/// Identifier of an observatory a resource is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObservatoryId(pub u64);

impl ObservatoryId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObservatoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "obs{}", self.0)
    }
}

/// Identifier of an organization a resource is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OrganizationId(pub u64);

impl OrganizationId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for OrganizationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "org{}", self.0)
    }
}
