//! Identity resolution cache.
//!
//! Maps every id a command mentions to either the definition of a thing
//! still to be created or the persisted thing it names. Once definitions
//! are materialized, their temp ids resolve through the `created` map.

use std::collections::BTreeMap;

use tabula_core::vocab::datatypes;
use tabula_core::{Resource, Thing, ThingId};

use crate::command::ThingDefinition;
use crate::error::{TableError, TableResult};

/// What an id resolves to.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Declared in the command, not created yet.
    Pending(ThingDefinition),
    /// Already persisted.
    Resolved(Thing),
}

impl Resolution {
    /// Returns true if the id denotes a plain string literal.
    pub fn is_string_literal(&self) -> bool {
        match self {
            Resolution::Pending(ThingDefinition::Literal(literal)) => {
                literal.datatype == datatypes::XSD_STRING
            }
            Resolution::Pending(_) => false,
            Resolution::Resolved(Thing::Literal(literal)) => literal.is_string(),
            Resolution::Resolved(_) => false,
        }
    }

    /// Returns true if the id denotes a class.
    pub fn is_class(&self) -> bool {
        match self {
            Resolution::Pending(definition) => definition.is_class(),
            Resolution::Resolved(thing) => thing.is_class(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdentityCache {
    entries: BTreeMap<String, Resolution>,
    created: BTreeMap<String, ThingId>,
}

impl IdentityCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_pending(&mut self, temp_id: impl Into<String>, definition: ThingDefinition) {
        self.entries
            .insert(temp_id.into(), Resolution::Pending(definition));
    }

    pub fn insert_resolved(&mut self, thing: Thing) {
        self.entries
            .insert(thing.id().to_string(), Resolution::Resolved(thing));
    }

    pub fn get(&self, id: &str) -> Option<&Resolution> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Pending definitions, in temp id order.
    pub fn pending(&self) -> impl Iterator<Item = (&String, &ThingDefinition)> {
        self.entries.iter().filter_map(|(id, resolution)| match resolution {
            Resolution::Pending(definition) => Some((id, definition)),
            Resolution::Resolved(_) => None,
        })
    }

    /// Record the id a temp id was materialized as.
    pub fn record_created(&mut self, temp_id: impl Into<String>, id: ThingId) {
        self.created.insert(temp_id.into(), id);
    }

    /// Returns true once the temp id was materialized.
    pub fn is_created(&self, temp_id: &str) -> bool {
        self.created.contains_key(temp_id)
    }

    /// Resolve any id mentioned by the command to a persisted thing id.
    ///
    /// Returns `None` for unknown ids and for temp ids not created yet.
    pub fn resolve(&self, id: &str) -> Option<ThingId> {
        match self.entries.get(id) {
            Some(Resolution::Resolved(thing)) => Some(thing.id().clone()),
            Some(Resolution::Pending(_)) | None => self.created.get(id).cloned(),
        }
    }

    /// Resolve an id that earlier steps guarantee to be resolvable.
    pub fn require(&self, id: &str) -> TableResult<ThingId> {
        self.resolve(id)
            .ok_or_else(|| TableError::illegal_state(format!("Id \"{}\" was never resolved.", id)))
    }

    /// Get a persisted resource the cache knows about.
    pub fn resource(&self, id: &ThingId) -> Option<&Resource> {
        match self.entries.get(id.as_str()) {
            Some(Resolution::Resolved(thing)) => thing.as_resource(),
            _ => None,
        }
    }
}
