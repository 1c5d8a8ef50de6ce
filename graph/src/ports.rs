//! Collaborator ports consumed by the table engine.
//!
//! Use cases mutate the graph, repositories read it. Every port takes
//! `&self`; implementations synchronize internally.

use std::collections::BTreeSet;

use tabula_core::{
    ContributorId, ExtractionMethod, GraphResult, ObservatoryId, OrganizationId, Resource,
    Statement, StatementId, Thing, ThingId, Visibility,
};

/// Create a resource.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateResourceCommand {
    pub contributor_id: ContributorId,
    pub label: String,
    pub classes: BTreeSet<ThingId>,
    pub observatory_id: Option<ObservatoryId>,
    pub organization_id: Option<OrganizationId>,
    pub extraction_method: ExtractionMethod,
    pub modifiable: bool,
}

impl CreateResourceCommand {
    pub fn new(contributor_id: ContributorId, label: impl Into<String>) -> Self {
        Self {
            contributor_id,
            label: label.into(),
            classes: BTreeSet::new(),
            observatory_id: None,
            organization_id: None,
            extraction_method: ExtractionMethod::Unknown,
            modifiable: true,
        }
    }

    /// Tag the resource with a class.
    pub fn with_class(mut self, class: impl Into<ThingId>) -> Self {
        self.classes.insert(class.into());
        self
    }

    pub fn with_classes(mut self, classes: impl IntoIterator<Item = ThingId>) -> Self {
        self.classes.extend(classes);
        self
    }

    pub fn with_observatory(mut self, observatory_id: Option<ObservatoryId>) -> Self {
        self.observatory_id = observatory_id;
        self
    }

    pub fn with_organization(mut self, organization_id: Option<OrganizationId>) -> Self {
        self.organization_id = organization_id;
        self
    }

    pub fn with_extraction_method(mut self, extraction_method: ExtractionMethod) -> Self {
        self.extraction_method = extraction_method;
        self
    }

    pub fn with_modifiable(mut self, modifiable: bool) -> Self {
        self.modifiable = modifiable;
        self
    }
}

/// Update a resource. `None` fields are left unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateResourceCommand {
    pub id: ThingId,
    pub contributor_id: ContributorId,
    pub label: Option<String>,
    pub classes: Option<BTreeSet<ThingId>>,
    pub observatory_id: Option<ObservatoryId>,
    pub organization_id: Option<OrganizationId>,
    pub extraction_method: Option<ExtractionMethod>,
    pub visibility: Option<Visibility>,
}

impl UpdateResourceCommand {
    pub fn new(id: ThingId, contributor_id: ContributorId) -> Self {
        Self {
            id,
            contributor_id,
            label: None,
            classes: None,
            observatory_id: None,
            organization_id: None,
            extraction_method: None,
            visibility: None,
        }
    }

    /// Returns true if applying the command would change nothing.
    pub fn is_empty(&self) -> bool {
        self.label.is_none()
            && self.classes.is_none()
            && self.observatory_id.is_none()
            && self.organization_id.is_none()
            && self.extraction_method.is_none()
            && self.visibility.is_none()
    }
}

/// Create a literal.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateLiteralCommand {
    pub contributor_id: ContributorId,
    pub label: String,
    pub datatype: String,
}

/// Replace the label of a literal.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateLiteralCommand {
    pub id: ThingId,
    pub contributor_id: ContributorId,
    pub label: String,
}

/// Create a statement between two existing things.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateStatementCommand {
    pub contributor_id: ContributorId,
    pub subject_id: ThingId,
    pub predicate_id: ThingId,
    pub object_id: ThingId,
}

/// Create a predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatePredicateCommand {
    pub contributor_id: ContributorId,
    pub label: String,
}

/// Create a class.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateClassCommand {
    pub contributor_id: ContributorId,
    pub label: String,
    pub uri: Option<String>,
}

// ==================== Use Cases ====================

pub trait ResourceUseCases: Send + Sync {
    fn create_resource(&self, command: CreateResourceCommand) -> GraphResult<ThingId>;

    fn update_resource(&self, command: UpdateResourceCommand) -> GraphResult<()>;

    /// Delete a resource. Fails while statements still reference it.
    fn delete_resource(&self, id: &ThingId, contributor_id: ContributorId) -> GraphResult<()>;
}

pub trait LiteralUseCases: Send + Sync {
    fn create_literal(&self, command: CreateLiteralCommand) -> GraphResult<ThingId>;

    fn update_literal(&self, command: UpdateLiteralCommand) -> GraphResult<()>;
}

pub trait StatementUseCases: Send + Sync {
    fn create_statement(&self, command: CreateStatementCommand) -> GraphResult<StatementId>;

    /// Delete every statement in the set. Unknown ids are ignored.
    fn delete_statements(&self, ids: &BTreeSet<StatementId>) -> GraphResult<()>;
}

pub trait PredicateUseCases: Send + Sync {
    fn create_predicate(&self, command: CreatePredicateCommand) -> GraphResult<ThingId>;
}

pub trait ClassUseCases: Send + Sync {
    fn create_class(&self, command: CreateClassCommand) -> GraphResult<ThingId>;
}

// ==================== Repositories ====================

pub trait ThingRepository: Send + Sync {
    fn find_thing(&self, id: &ThingId) -> Option<Thing>;
}

pub trait ResourceRepository: Send + Sync {
    fn find_resource(&self, id: &ThingId) -> Option<Resource>;
}

pub trait StatementRepository: Send + Sync {
    /// Fetch every statement reachable from `root` in at most `max_level`
    /// hops along outgoing statements, in creation order.
    fn fetch_bundle(&self, root: &ThingId, max_level: usize) -> Vec<Statement>;
}
