//! Table commands and the thing definitions they carry.
//!
//! Row data and thing definitions refer to things by string: either the id
//! of an existing thing or a temporary id declared in the same command.

use std::collections::{BTreeMap, BTreeSet};

use tabula_core::vocab::datatypes;
use tabula_core::{
    ContributorId, ExtractionMethod, ObservatoryId, OrganizationId, ThingId, Visibility,
};

/// One row of a table: an optional label and one optional id per column.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowDefinition {
    pub label: Option<String>,
    pub data: Vec<Option<String>>,
}

impl RowDefinition {
    pub fn new(label: Option<&str>, data: Vec<Option<&str>>) -> Self {
        Self {
            label: label.map(str::to_string),
            data: data.into_iter().map(|d| d.map(str::to_string)).collect(),
        }
    }

    /// An unlabelled row where every cell holds a value.
    pub fn of(data: &[&str]) -> Self {
        Self {
            label: None,
            data: data.iter().map(|d| Some(d.to_string())).collect(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDefinition {
    pub label: String,
    /// Class ids or class temp ids.
    pub classes: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralDefinition {
    pub label: String,
    pub datatype: String,
}

impl LiteralDefinition {
    /// A plain string literal.
    pub fn string(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            datatype: datatypes::XSD_STRING.to_string(),
        }
    }

    pub fn typed(label: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            datatype: datatype.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredicateDefinition {
    pub label: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDefinition {
    pub label: String,
    pub uri: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListDefinition {
    pub label: String,
    /// Element ids or temp ids, in order.
    pub elements: Vec<String>,
}

/// A thing to be created by the command, keyed by its temp id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThingDefinition {
    Resource(ResourceDefinition),
    Literal(LiteralDefinition),
    Predicate(PredicateDefinition),
    Class(ClassDefinition),
    List(ListDefinition),
}

impl ThingDefinition {
    pub fn label(&self) -> &str {
        match self {
            ThingDefinition::Resource(d) => &d.label,
            ThingDefinition::Literal(d) => &d.label,
            ThingDefinition::Predicate(d) => &d.label,
            ThingDefinition::Class(d) => &d.label,
            ThingDefinition::List(d) => &d.label,
        }
    }

    pub fn is_class(&self) -> bool {
        matches!(self, ThingDefinition::Class(_))
    }
}

/// Every thing a command declares, one map per kind.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ThingDefinitions {
    pub resources: BTreeMap<String, ResourceDefinition>,
    pub literals: BTreeMap<String, LiteralDefinition>,
    pub predicates: BTreeMap<String, PredicateDefinition>,
    pub classes: BTreeMap<String, ClassDefinition>,
    pub lists: BTreeMap<String, ListDefinition>,
}

impl ThingDefinitions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resource(
        mut self,
        temp_id: impl Into<String>,
        label: impl Into<String>,
        classes: &[&str],
    ) -> Self {
        self.resources.insert(
            temp_id.into(),
            ResourceDefinition {
                label: label.into(),
                classes: classes.iter().map(|c| c.to_string()).collect(),
            },
        );
        self
    }

    pub fn with_literal(mut self, temp_id: impl Into<String>, literal: LiteralDefinition) -> Self {
        self.literals.insert(temp_id.into(), literal);
        self
    }

    /// Declare a plain string literal.
    pub fn with_string(self, temp_id: impl Into<String>, label: impl Into<String>) -> Self {
        self.with_literal(temp_id, LiteralDefinition::string(label))
    }

    pub fn with_predicate(
        mut self,
        temp_id: impl Into<String>,
        label: impl Into<String>,
        description: Option<&str>,
    ) -> Self {
        self.predicates.insert(
            temp_id.into(),
            PredicateDefinition {
                label: label.into(),
                description: description.map(str::to_string),
            },
        );
        self
    }

    pub fn with_class(
        mut self,
        temp_id: impl Into<String>,
        label: impl Into<String>,
        uri: Option<&str>,
    ) -> Self {
        self.classes.insert(
            temp_id.into(),
            ClassDefinition {
                label: label.into(),
                uri: uri.map(str::to_string),
            },
        );
        self
    }

    pub fn with_list(
        mut self,
        temp_id: impl Into<String>,
        label: impl Into<String>,
        elements: &[&str],
    ) -> Self {
        self.lists.insert(
            temp_id.into(),
            ListDefinition {
                label: label.into(),
                elements: elements.iter().map(|e| e.to_string()).collect(),
            },
        );
        self
    }

    /// Look up a definition by temp id.
    pub fn get(&self, temp_id: &str) -> Option<ThingDefinition> {
        if let Some(d) = self.resources.get(temp_id) {
            return Some(ThingDefinition::Resource(d.clone()));
        }
        if let Some(d) = self.literals.get(temp_id) {
            return Some(ThingDefinition::Literal(d.clone()));
        }
        if let Some(d) = self.predicates.get(temp_id) {
            return Some(ThingDefinition::Predicate(d.clone()));
        }
        if let Some(d) = self.classes.get(temp_id) {
            return Some(ThingDefinition::Class(d.clone()));
        }
        self.lists
            .get(temp_id)
            .map(|d| ThingDefinition::List(d.clone()))
    }

    /// Every declared temp id, with repetitions across kinds.
    pub fn temp_ids(&self) -> impl Iterator<Item = &String> {
        self.resources
            .keys()
            .chain(self.literals.keys())
            .chain(self.predicates.keys())
            .chain(self.classes.keys())
            .chain(self.lists.keys())
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
            && self.literals.is_empty()
            && self.predicates.is_empty()
            && self.classes.is_empty()
            && self.lists.is_empty()
    }
}

/// Create a table.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTableCommand {
    pub contributor_id: ContributorId,
    pub label: String,
    /// The header row first, then the data rows.
    pub rows: Vec<RowDefinition>,
    pub observatories: Vec<ObservatoryId>,
    pub organizations: Vec<OrganizationId>,
    pub extraction_method: ExtractionMethod,
    pub thing_definitions: ThingDefinitions,
}

impl CreateTableCommand {
    pub fn new(contributor_id: ContributorId, label: impl Into<String>) -> Self {
        Self {
            contributor_id,
            label: label.into(),
            rows: Vec::new(),
            observatories: Vec::new(),
            organizations: Vec::new(),
            extraction_method: ExtractionMethod::Unknown,
            thing_definitions: ThingDefinitions::new(),
        }
    }

    pub fn with_rows(mut self, rows: Vec<RowDefinition>) -> Self {
        self.rows = rows;
        self
    }

    pub fn with_things(mut self, thing_definitions: ThingDefinitions) -> Self {
        self.thing_definitions = thing_definitions;
        self
    }
}

/// Update a table. `None` fields are left unchanged; `rows = None` skips
/// structural reconciliation altogether.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateTableCommand {
    pub table_id: ThingId,
    pub contributor_id: ContributorId,
    pub label: Option<String>,
    pub rows: Option<Vec<RowDefinition>>,
    pub visibility: Option<Visibility>,
    pub observatories: Option<Vec<ObservatoryId>>,
    pub organizations: Option<Vec<OrganizationId>>,
    pub extraction_method: Option<ExtractionMethod>,
    pub thing_definitions: ThingDefinitions,
}

impl UpdateTableCommand {
    pub fn new(table_id: ThingId, contributor_id: ContributorId) -> Self {
        Self {
            table_id,
            contributor_id,
            label: None,
            rows: None,
            visibility: None,
            observatories: None,
            organizations: None,
            extraction_method: None,
            thing_definitions: ThingDefinitions::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_rows(mut self, rows: Vec<RowDefinition>) -> Self {
        self.rows = Some(rows);
        self
    }

    pub fn with_things(mut self, thing_definitions: ThingDefinitions) -> Self {
        self.thing_definitions = thing_definitions;
        self
    }
}

/// What the shared validation and definition steps need from a command.
pub trait TableCommand {
    fn contributor_id(&self) -> ContributorId;

    /// The table label, if the command sets one.
    fn label(&self) -> Option<&str>;

    /// The desired rows, if the command sets them.
    fn rows(&self) -> Option<&[RowDefinition]>;

    fn thing_definitions(&self) -> &ThingDefinitions;
}

impl TableCommand for CreateTableCommand {
    fn contributor_id(&self) -> ContributorId {
        self.contributor_id
    }

    fn label(&self) -> Option<&str> {
        Some(&self.label)
    }

    fn rows(&self) -> Option<&[RowDefinition]> {
        Some(&self.rows)
    }

    fn thing_definitions(&self) -> &ThingDefinitions {
        &self.thing_definitions
    }
}

impl TableCommand for UpdateTableCommand {
    fn contributor_id(&self) -> ContributorId {
        self.contributor_id
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn rows(&self) -> Option<&[RowDefinition]> {
        self.rows.as_deref()
    }

    fn thing_definitions(&self) -> &ThingDefinitions {
        &self.thing_definitions
    }
}
