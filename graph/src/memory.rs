//! Thread-safe in-memory adapter implementing every port.

use std::collections::BTreeSet;

use parking_lot::RwLock;
use tracing::{debug, trace};

use tabula_core::{
    ContributorId, GraphError, GraphResult, Resource, Statement, StatementId, Thing, ThingId,
};

use crate::graph::Graph;
use crate::journal::{Lsn, MutationEntry, MutationJournal, MutationRecord};
use crate::ports::{
    ClassUseCases, CreateClassCommand, CreateLiteralCommand, CreatePredicateCommand,
    CreateResourceCommand, CreateStatementCommand, LiteralUseCases, PredicateUseCases,
    ResourceRepository, ResourceUseCases, StatementRepository, StatementUseCases,
    ThingRepository, UpdateLiteralCommand, UpdateResourceCommand,
};

#[derive(Debug, Default)]
struct Inner {
    graph: Graph,
    journal: MutationJournal,
}

/// In-memory graph shared behind a read/write lock.
#[derive(Debug, Default)]
pub struct InMemoryGraph {
    inner: RwLock<Inner>,
}

impl InMemoryGraph {
    /// Create an adapter over a graph seeded with the well-known vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` as a unit: if it fails, the graph and the journal are
    /// restored to their state before the call.
    pub fn transaction<T, E>(&self, f: impl FnOnce(&Self) -> Result<T, E>) -> Result<T, E> {
        let (snapshot, mark) = {
            let inner = self.inner.read();
            (inner.graph.clone(), inner.journal.last_lsn())
        };

        let result = f(self);
        if result.is_err() {
            let mut inner = self.inner.write();
            inner.graph = snapshot;
            inner.journal.truncate_after(mark);
            debug!(lsn = mark, "transaction rolled back");
        }
        result
    }

    /// Run a read-only closure against the graph.
    pub fn read<T>(&self, f: impl FnOnce(&Graph) -> T) -> T {
        f(&self.inner.read().graph)
    }

    /// LSN of the last journaled mutation.
    pub fn last_lsn(&self) -> Lsn {
        self.inner.read().journal.last_lsn()
    }

    /// Get the journal records appended after the given LSN.
    pub fn mutations_since(&self, lsn: Lsn) -> Vec<MutationRecord> {
        self.inner.read().journal.since(lsn).to_vec()
    }

    /// Get every journal record.
    pub fn mutations(&self) -> Vec<MutationRecord> {
        self.inner.read().journal.records().to_vec()
    }

    /// Seed a resource directly, bypassing the journal.
    pub fn insert_resource(&self, command: CreateResourceCommand) -> GraphResult<ThingId> {
        let mut inner = self.inner.write();
        let resource = inner.graph.create_resource(command.label, command.classes)?;
        resource.created_by = command.contributor_id;
        resource.observatory_id = command.observatory_id;
        resource.organization_id = command.organization_id;
        resource.extraction_method = command.extraction_method;
        resource.modifiable = command.modifiable;
        Ok(resource.id.clone())
    }

    /// Seed a literal directly, bypassing the journal.
    pub fn insert_literal(&self, label: &str, datatype: &str) -> ThingId {
        self.inner
            .write()
            .graph
            .create_literal(label, datatype, ContributorId::unknown())
    }
}

impl ResourceUseCases for InMemoryGraph {
    fn create_resource(&self, command: CreateResourceCommand) -> GraphResult<ThingId> {
        let mut inner = self.inner.write();
        let label = command.label.clone();
        let classes = command.classes.clone();

        let resource = inner.graph.create_resource(command.label, command.classes)?;
        resource.created_by = command.contributor_id;
        resource.observatory_id = command.observatory_id;
        resource.organization_id = command.organization_id;
        resource.extraction_method = command.extraction_method;
        resource.modifiable = command.modifiable;
        let id = resource.id.clone();

        trace!(%id, "resource created");
        inner.journal.append(MutationEntry::CreateResource {
            id: id.clone(),
            label,
            classes,
        });
        Ok(id)
    }

    fn update_resource(&self, command: UpdateResourceCommand) -> GraphResult<()> {
        let mut inner = self.inner.write();
        if let Some(classes) = &command.classes {
            if let Some(missing) = classes
                .iter()
                .find(|c| !inner.graph.get_thing(c).is_some_and(Thing::is_class))
            {
                return Err(GraphError::ThingNotFound(missing.clone()));
            }
        }

        let id = command.id.clone();
        inner.graph.update_resource(&id, |resource| {
            if let Some(label) = command.label {
                resource.label = label;
            }
            if let Some(classes) = command.classes {
                resource.classes = classes;
            }
            if command.observatory_id.is_some() {
                resource.observatory_id = command.observatory_id;
            }
            if command.organization_id.is_some() {
                resource.organization_id = command.organization_id;
            }
            if let Some(extraction_method) = command.extraction_method {
                resource.extraction_method = extraction_method;
            }
            if let Some(visibility) = command.visibility {
                resource.visibility = visibility;
            }
        })?;

        trace!(%id, "resource updated");
        inner.journal.append(MutationEntry::UpdateResource { id });
        Ok(())
    }

    fn delete_resource(&self, id: &ThingId, contributor_id: ContributorId) -> GraphResult<()> {
        let mut inner = self.inner.write();
        inner.graph.delete_resource(id)?;

        trace!(%id, contributor = %contributor_id, "resource deleted");
        inner
            .journal
            .append(MutationEntry::DeleteResource { id: id.clone() });
        Ok(())
    }
}

impl LiteralUseCases for InMemoryGraph {
    fn create_literal(&self, command: CreateLiteralCommand) -> GraphResult<ThingId> {
        let mut inner = self.inner.write();
        let id = inner.graph.create_literal(
            command.label.as_str(),
            command.datatype.as_str(),
            command.contributor_id,
        );
        inner.journal.append(MutationEntry::CreateLiteral {
            id: id.clone(),
            label: command.label,
            datatype: command.datatype,
        });
        Ok(id)
    }

    fn update_literal(&self, command: UpdateLiteralCommand) -> GraphResult<()> {
        let mut inner = self.inner.write();
        inner.graph.update_literal(&command.id, command.label.as_str())?;
        inner.journal.append(MutationEntry::UpdateLiteral {
            id: command.id,
            label: command.label,
        });
        Ok(())
    }
}

impl StatementUseCases for InMemoryGraph {
    fn create_statement(&self, command: CreateStatementCommand) -> GraphResult<StatementId> {
        let mut inner = self.inner.write();
        let id = inner.graph.create_statement(
            &command.subject_id,
            &command.predicate_id,
            &command.object_id,
            command.contributor_id,
        )?;
        inner.journal.append(MutationEntry::CreateStatement {
            id: id.clone(),
            subject: command.subject_id,
            predicate: command.predicate_id,
            object: command.object_id,
        });
        Ok(id)
    }

    fn delete_statements(&self, ids: &BTreeSet<StatementId>) -> GraphResult<()> {
        if ids.is_empty() {
            return Ok(());
        }

        let mut inner = self.inner.write();
        let mut deleted = BTreeSet::new();
        for id in ids {
            if inner.graph.statement_exists(id) {
                inner.graph.delete_statement(id)?;
                deleted.insert(id.clone());
            }
        }

        trace!(count = deleted.len(), "statements deleted");
        if !deleted.is_empty() {
            inner
                .journal
                .append(MutationEntry::DeleteStatements { ids: deleted });
        }
        Ok(())
    }
}

impl PredicateUseCases for InMemoryGraph {
    fn create_predicate(&self, command: CreatePredicateCommand) -> GraphResult<ThingId> {
        let mut inner = self.inner.write();
        let id = inner
            .graph
            .create_predicate(command.label.as_str(), command.contributor_id);
        inner.journal.append(MutationEntry::CreatePredicate {
            id: id.clone(),
            label: command.label,
        });
        Ok(id)
    }
}

impl ClassUseCases for InMemoryGraph {
    fn create_class(&self, command: CreateClassCommand) -> GraphResult<ThingId> {
        let mut inner = self.inner.write();
        let id = inner.graph.create_class(
            command.label.as_str(),
            command.uri,
            command.contributor_id,
        );
        inner.journal.append(MutationEntry::CreateClass {
            id: id.clone(),
            label: command.label,
        });
        Ok(id)
    }
}

impl ThingRepository for InMemoryGraph {
    fn find_thing(&self, id: &ThingId) -> Option<Thing> {
        self.inner.read().graph.get_thing(id).cloned()
    }
}

impl ResourceRepository for InMemoryGraph {
    fn find_resource(&self, id: &ThingId) -> Option<Resource> {
        self.inner.read().graph.get_resource(id).cloned()
    }
}

impl StatementRepository for InMemoryGraph {
    fn fetch_bundle(&self, root: &ThingId, max_level: usize) -> Vec<Statement> {
        self.inner.read().graph.fetch_bundle(root, max_level)
    }
}
