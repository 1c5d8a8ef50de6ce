use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use tabula_core::vocab::{classes, datatypes, predicates};
use tabula_core::{ContributorId, ThingId};
use tabula_graph::ports::{
    ClassUseCases, CreateClassCommand, CreateLiteralCommand, CreatePredicateCommand,
    CreateResourceCommand, LiteralUseCases, PredicateUseCases, ResourceUseCases,
    StatementUseCases,
};

use super::link;
use crate::cache::IdentityCache;
use crate::command::{ListDefinition, TableCommand, ThingDefinition};
use crate::error::{TableError, TableResult};
use crate::pipeline::Action;
use crate::state::ValidationState;

/// Creates every pending thing in the identity cache.
///
/// Classes come first so resources can be tagged with them; lists come last
/// so their elements exist.
pub struct ThingDefinitionCreator {
    resources: Arc<dyn ResourceUseCases>,
    literals: Arc<dyn LiteralUseCases>,
    statements: Arc<dyn StatementUseCases>,
    predicates: Arc<dyn PredicateUseCases>,
    classes: Arc<dyn ClassUseCases>,
}

impl ThingDefinitionCreator {
    pub fn new(
        resources: Arc<dyn ResourceUseCases>,
        literals: Arc<dyn LiteralUseCases>,
        statements: Arc<dyn StatementUseCases>,
        predicates: Arc<dyn PredicateUseCases>,
        classes: Arc<dyn ClassUseCases>,
    ) -> Self {
        Self {
            resources,
            literals,
            statements,
            predicates,
            classes,
        }
    }

    pub fn create(
        &self,
        contributor_id: ContributorId,
        cache: &mut IdentityCache,
    ) -> TableResult<()> {
        let pending: Vec<(String, ThingDefinition)> = cache
            .pending()
            .filter(|(id, _)| !cache.is_created(id))
            .map(|(id, definition)| (id.clone(), definition.clone()))
            .collect();
        let mut lists = BTreeMap::new();

        // Classes
        for (temp_id, definition) in &pending {
            if let ThingDefinition::Class(class) = definition {
                let id = self.classes.create_class(CreateClassCommand {
                    contributor_id,
                    label: class.label.clone(),
                    uri: class.uri.clone(),
                })?;
                cache.record_created(temp_id.as_str(), id);
            }
        }

        // Predicates, literals, resources
        for (temp_id, definition) in &pending {
            let id = match definition {
                ThingDefinition::Predicate(predicate) => {
                    let id = self.predicates.create_predicate(CreatePredicateCommand {
                        contributor_id,
                        label: predicate.label.clone(),
                    })?;
                    if let Some(description) = &predicate.description {
                        let description_id = self.literals.create_literal(CreateLiteralCommand {
                            contributor_id,
                            label: description.clone(),
                            datatype: datatypes::XSD_STRING.to_string(),
                        })?;
                        link(
                            self.statements.as_ref(),
                            contributor_id,
                            &id,
                            predicates::DESCRIPTION,
                            &description_id,
                        )?;
                    }
                    id
                }
                ThingDefinition::Literal(literal) => {
                    self.literals.create_literal(CreateLiteralCommand {
                        contributor_id,
                        label: literal.label.clone(),
                        datatype: literal.datatype.clone(),
                    })?
                }
                ThingDefinition::Resource(resource) => {
                    let classes = resource
                        .classes
                        .iter()
                        .map(|class| cache.require(class))
                        .collect::<TableResult<Vec<ThingId>>>()?;
                    self.resources.create_resource(
                        CreateResourceCommand::new(contributor_id, resource.label.as_str())
                            .with_classes(classes),
                    )?
                }
                ThingDefinition::List(list) => {
                    lists.insert(temp_id.clone(), list.clone());
                    continue;
                }
                ThingDefinition::Class(_) => continue,
            };
            cache.record_created(temp_id.as_str(), id);
        }

        self.create_lists(contributor_id, lists, cache)?;
        debug!(count = pending.len(), "thing definitions created");
        Ok(())
    }

    /// Create lists once all of their elements exist.
    fn create_lists(
        &self,
        contributor_id: ContributorId,
        mut lists: BTreeMap<String, ListDefinition>,
        cache: &mut IdentityCache,
    ) -> TableResult<()> {
        while !lists.is_empty() {
            let ready: Vec<String> = lists
                .iter()
                .filter(|(_, list)| list.elements.iter().all(|e| cache.resolve(e).is_some()))
                .map(|(temp_id, _)| temp_id.clone())
                .collect();
            if ready.is_empty() {
                return Err(TableError::illegal_state(format!(
                    "Lists {:?} reference elements that are never created.",
                    lists.keys().collect::<Vec<_>>()
                )));
            }

            for temp_id in ready {
                let Some(list) = lists.remove(&temp_id) else {
                    continue;
                };
                let list_id = self.resources.create_resource(
                    CreateResourceCommand::new(contributor_id, list.label.as_str())
                        .with_class(classes::LIST),
                )?;
                for element in &list.elements {
                    let element_id = cache.require(element)?;
                    link(
                        self.statements.as_ref(),
                        contributor_id,
                        &list_id,
                        predicates::HAS_LIST_ELEMENT,
                        &element_id,
                    )?;
                }
                cache.record_created(temp_id, list_id);
            }
        }
        Ok(())
    }
}

impl<C: TableCommand, S: ValidationState> Action<C, S> for ThingDefinitionCreator {
    fn name(&self) -> &'static str {
        "create-thing-definitions"
    }

    fn apply(&self, command: &C, mut state: S) -> TableResult<S> {
        self.create(command.contributor_id(), state.identities_mut())?;
        Ok(state)
    }
}
