//! Validation of the things a command declares.

use std::collections::{BTreeMap, BTreeSet};

use tabula_core::label::{is_absolute_uri, is_valid_label, is_valid_literal_label, matches_datatype};
use tabula_core::vocab::{datatypes, is_reserved_class};

use crate::cache::{IdentityCache, Resolution};
use crate::command::{ListDefinition, TableCommand, ThingDefinitions};
use crate::config::TableConfig;
use crate::error::{TableError, TableResult};
use crate::pipeline::Action;
use crate::state::ValidationState;

use super::ThingIdValidator;

/// Validates every declared thing before anything is written, and caches
/// each declaration as pending.
pub struct ThingDefinitionValidator {
    thing_ids: ThingIdValidator,
    config: TableConfig,
}

impl ThingDefinitionValidator {
    pub fn new(thing_ids: ThingIdValidator, config: TableConfig) -> Self {
        Self { thing_ids, config }
    }

    pub fn validate(
        &self,
        definitions: &ThingDefinitions,
        cache: &mut IdentityCache,
    ) -> TableResult<()> {
        let max = self.config.max_label_length;

        for (temp_id, class) in &definitions.classes {
            self.check_label(&class.label)?;
            if let Some(uri) = &class.uri {
                if !is_absolute_uri(uri) {
                    return Err(TableError::URINotAbsolute(uri.clone()));
                }
            }
            self.thing_ids.validate(temp_id, definitions, cache)?;
        }

        for (temp_id, predicate) in &definitions.predicates {
            self.check_label(&predicate.label)?;
            if let Some(description) = &predicate.description {
                if !is_valid_literal_label(description, max) {
                    return Err(TableError::invalid_literal_label(
                        description.as_str(),
                        datatypes::XSD_STRING,
                    ));
                }
            }
            self.thing_ids.validate(temp_id, definitions, cache)?;
        }

        for (temp_id, literal) in &definitions.literals {
            if !is_valid_literal_label(&literal.label, max)
                || !matches_datatype(&literal.label, &literal.datatype)
            {
                return Err(TableError::invalid_literal_label(
                    literal.label.as_str(),
                    literal.datatype.as_str(),
                ));
            }
            self.thing_ids.validate(temp_id, definitions, cache)?;
        }

        for (temp_id, resource) in &definitions.resources {
            self.check_label(&resource.label)?;
            for class in &resource.classes {
                self.check_class(class, definitions, cache)?;
            }
            self.thing_ids.validate(temp_id, definitions, cache)?;
        }

        for (temp_id, list) in &definitions.lists {
            self.check_label(&list.label)?;
            for element in &list.elements {
                self.thing_ids.validate(element, definitions, cache)?;
            }
            self.thing_ids.validate(temp_id, definitions, cache)?;
        }
        check_list_cycles(&definitions.lists)
    }

    fn check_label(&self, label: &str) -> TableResult<()> {
        if is_valid_label(label, self.config.max_label_length) {
            Ok(())
        } else {
            Err(TableError::invalid_label("label", self.config.max_label_length))
        }
    }

    fn check_class(
        &self,
        class: &str,
        definitions: &ThingDefinitions,
        cache: &mut IdentityCache,
    ) -> TableResult<()> {
        self.thing_ids.validate(class, definitions, cache)?;
        match cache.get(class) {
            Some(resolution) if !resolution.is_class() => {
                Err(TableError::ThingIsNotAClass(class.to_string()))
            }
            Some(Resolution::Resolved(thing)) if is_reserved_class(thing.id()) => {
                Err(TableError::ReservedClass(thing.id().clone()))
            }
            Some(_) => Ok(()),
            None => Err(TableError::thing_not_found(class)),
        }
    }
}

/// Reject lists that contain themselves, directly or through other lists.
fn check_list_cycles(lists: &BTreeMap<String, ListDefinition>) -> TableResult<()> {
    fn visit<'a>(
        id: &'a str,
        lists: &'a BTreeMap<String, ListDefinition>,
        path: &mut Vec<&'a str>,
        done: &mut BTreeSet<&'a str>,
    ) -> TableResult<()> {
        if done.contains(id) {
            return Ok(());
        }
        if path.contains(&id) {
            return Err(TableError::CyclicListDefinition(id.to_string()));
        }
        if let Some(list) = lists.get(id) {
            path.push(id);
            for element in &list.elements {
                visit(element, lists, path, done)?;
            }
            path.pop();
        }
        done.insert(id);
        Ok(())
    }

    let mut done = BTreeSet::new();
    for id in lists.keys() {
        visit(id, lists, &mut Vec::new(), &mut done)?;
    }
    Ok(())
}

impl<C: TableCommand, S: ValidationState> Action<C, S> for ThingDefinitionValidator {
    fn name(&self) -> &'static str {
        "validate-thing-definitions"
    }

    fn apply(&self, command: &C, mut state: S) -> TableResult<S> {
        if command.rows().is_some() {
            self.validate(command.thing_definitions(), state.identities_mut())?;
        }
        Ok(state)
    }
}
