//! Thing and statement structures.
//!
//! Things are the nodes of the knowledge graph; statements are the directed,
//! predicate-typed edges between them.

use std::collections::BTreeSet;
use std::fmt;

use crate::vocab::datatypes;
use crate::{ContributorId, ObservatoryId, OrganizationId, StatementId, ThingId};

/// Visibility of a resource in listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    #[default]
    Default,
    Featured,
    Unlisted,
    Deleted,
}

/// How the content of a resource was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExtractionMethod {
    #[default]
    Unknown,
    Manual,
    Automatic,
}

/// A resource: a labelled node carrying a set of classes.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub id: ThingId,
    pub label: String,
    pub classes: BTreeSet<ThingId>,
    pub created_by: ContributorId,
    pub observatory_id: Option<ObservatoryId>,
    pub organization_id: Option<OrganizationId>,
    pub extraction_method: ExtractionMethod,
    pub visibility: Visibility,
    /// Non-modifiable resources are owned by the system.
    pub modifiable: bool,
    /// Bumped on every update.
    pub version: u64,
}

impl Resource {
    /// Create a new modifiable resource.
    pub fn new(id: ThingId, label: impl Into<String>, classes: BTreeSet<ThingId>) -> Self {
        Self {
            id,
            label: label.into(),
            classes,
            created_by: ContributorId::unknown(),
            observatory_id: None,
            organization_id: None,
            extraction_method: ExtractionMethod::Unknown,
            visibility: Visibility::Default,
            modifiable: true,
            version: 1,
        }
    }

    /// Returns true if the resource carries the given class.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c.as_str() == class)
    }
}

/// A literal: a typed scalar value.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub id: ThingId,
    pub label: String,
    pub datatype: String,
    pub created_by: ContributorId,
    pub modifiable: bool,
}

impl Literal {
    /// Create a new literal with the given datatype.
    pub fn new(id: ThingId, label: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            datatype: datatype.into(),
            created_by: ContributorId::unknown(),
            modifiable: true,
        }
    }

    /// Returns true for plain string literals.
    pub fn is_string(&self) -> bool {
        self.datatype == datatypes::XSD_STRING
    }
}

/// A predicate: the type of a statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub id: ThingId,
    pub label: String,
    pub created_by: ContributorId,
}

impl Predicate {
    pub fn new(id: ThingId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            created_by: ContributorId::unknown(),
        }
    }
}

/// A class: a type resources can be tagged with.
#[derive(Debug, Clone, PartialEq)]
pub struct Class {
    pub id: ThingId,
    pub label: String,
    pub uri: Option<String>,
    pub created_by: ContributorId,
}

impl Class {
    pub fn new(id: ThingId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            uri: None,
            created_by: ContributorId::unknown(),
        }
    }
}

/// Any graph entity.
#[derive(Debug, Clone, PartialEq)]
pub enum Thing {
    Resource(Resource),
    Literal(Literal),
    Predicate(Predicate),
    Class(Class),
}

impl Thing {
    /// Get the id of the wrapped thing.
    pub fn id(&self) -> &ThingId {
        match self {
            Thing::Resource(r) => &r.id,
            Thing::Literal(l) => &l.id,
            Thing::Predicate(p) => &p.id,
            Thing::Class(c) => &c.id,
        }
    }

    /// Get the label of the wrapped thing.
    pub fn label(&self) -> &str {
        match self {
            Thing::Resource(r) => &r.label,
            Thing::Literal(l) => &l.label,
            Thing::Predicate(p) => &p.label,
            Thing::Class(c) => &c.label,
        }
    }

    pub fn as_resource(&self) -> Option<&Resource> {
        match self {
            Thing::Resource(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Thing::Literal(l) => Some(l),
            _ => None,
        }
    }

    pub fn is_class(&self) -> bool {
        matches!(self, Thing::Class(_))
    }

    /// Name of the thing kind, for messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Thing::Resource(_) => "Resource",
            Thing::Literal(_) => "Literal",
            Thing::Predicate(_) => "Predicate",
            Thing::Class(_) => "Class",
        }
    }
}

impl fmt::Display for Thing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind(), self.id())
    }
}

impl From<Resource> for Thing {
    fn from(r: Resource) -> Self {
        Thing::Resource(r)
    }
}

impl From<Literal> for Thing {
    fn from(l: Literal) -> Self {
        Thing::Literal(l)
    }
}

impl From<Predicate> for Thing {
    fn from(p: Predicate) -> Self {
        Thing::Predicate(p)
    }
}

impl From<Class> for Thing {
    fn from(c: Class) -> Self {
        Thing::Class(c)
    }
}

/// A statement: `subject --predicate--> object`, with the endpoints resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub id: StatementId,
    pub subject: Thing,
    pub predicate: Predicate,
    pub object: Thing,
    pub created_by: ContributorId,
}

impl Statement {
    /// Returns true if the statement uses the given predicate.
    pub fn has_predicate(&self, predicate: &str) -> bool {
        self.predicate.id.as_str() == predicate
    }

    /// Returns true if the statement starts at the given thing.
    pub fn is_about(&self, subject: &ThingId) -> bool {
        self.subject.id() == subject
    }
}
