//! Core graph storage implementation.

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use tabula_core::vocab::{classes, predicates};
use tabula_core::{
    Class, ContributorId, GraphError, GraphResult, Literal, Predicate, Resource, Statement,
    StatementId, Thing, ThingId,
};

use crate::index::{AdjacencyIndex, ClassIndex};

/// ID allocator for things and statements.
#[derive(Debug, Clone, Default)]
struct IdAllocator {
    next_resource_id: u64,
    next_literal_id: u64,
    next_predicate_id: u64,
    next_class_id: u64,
    next_statement_id: u64,
}

impl IdAllocator {
    fn new() -> Self {
        Self {
            next_resource_id: 1,
            next_literal_id: 1,
            next_predicate_id: 1,
            next_class_id: 1,
            next_statement_id: 1,
        }
    }

    fn alloc(counter: &mut u64, prefix: char) -> ThingId {
        let id = ThingId::new(format!("{}{}", prefix, counter));
        *counter += 1;
        id
    }

    fn alloc_resource_id(&mut self) -> ThingId {
        Self::alloc(&mut self.next_resource_id, 'R')
    }

    fn alloc_literal_id(&mut self) -> ThingId {
        Self::alloc(&mut self.next_literal_id, 'L')
    }

    fn alloc_predicate_id(&mut self) -> ThingId {
        Self::alloc(&mut self.next_predicate_id, 'P')
    }

    fn alloc_class_id(&mut self) -> ThingId {
        Self::alloc(&mut self.next_class_id, 'C')
    }

    fn alloc_statement_id(&mut self) -> (StatementId, u64) {
        let seq = self.next_statement_id;
        self.next_statement_id += 1;
        (StatementId::new(format!("S{}", seq)), seq)
    }
}

/// A statement as stored: endpoints by id, plus its creation sequence.
#[derive(Debug, Clone)]
struct StoredStatement {
    subject: ThingId,
    predicate: ThingId,
    object: ThingId,
    created_by: ContributorId,
    seq: u64,
}

/// The in-memory graph storage.
#[derive(Debug, Clone)]
pub struct Graph {
    /// Thing storage
    things: HashMap<ThingId, Thing>,
    /// Statement storage
    statements: HashMap<StatementId, StoredStatement>,
    /// ID allocator
    id_alloc: IdAllocator,
    /// Class index
    class_index: ClassIndex,
    /// Adjacency index
    adj_index: AdjacencyIndex,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    /// Create a graph holding only the well-known predicates and classes.
    pub fn new() -> Self {
        let mut graph = Self::empty();
        for id in predicates::ALL {
            graph
                .things
                .insert(ThingId::new(*id), Predicate::new(ThingId::new(*id), *id).into());
        }
        for id in classes::ALL {
            graph
                .things
                .insert(ThingId::new(*id), Class::new(ThingId::new(*id), *id).into());
        }
        graph
    }

    /// Create a graph without any seeded vocabulary.
    pub fn empty() -> Self {
        Self {
            things: HashMap::new(),
            statements: HashMap::new(),
            id_alloc: IdAllocator::new(),
            class_index: ClassIndex::new(),
            adj_index: AdjacencyIndex::new(),
        }
    }

    // ==================== Thing Operations ====================

    /// Create a resource. Every class must exist.
    ///
    /// Returns the stored resource so the caller can fill in metadata.
    pub fn create_resource(
        &mut self,
        label: impl Into<String>,
        classes: BTreeSet<ThingId>,
    ) -> GraphResult<&mut Resource> {
        for class in &classes {
            match self.things.get(class) {
                Some(Thing::Class(_)) => {}
                _ => return Err(GraphError::ThingNotFound(class.clone())),
            }
        }

        let id = self.id_alloc.alloc_resource_id();
        for class in &classes {
            self.class_index.insert(class, &id);
        }
        self.things
            .insert(id.clone(), Resource::new(id.clone(), label, classes).into());

        match self.things.get_mut(&id) {
            Some(Thing::Resource(resource)) => Ok(resource),
            _ => Err(GraphError::ResourceNotFound(id)),
        }
    }

    /// Create a literal.
    pub fn create_literal(
        &mut self,
        label: impl Into<String>,
        datatype: impl Into<String>,
        created_by: ContributorId,
    ) -> ThingId {
        let id = self.id_alloc.alloc_literal_id();
        let mut literal = Literal::new(id.clone(), label, datatype);
        literal.created_by = created_by;
        self.things.insert(id.clone(), literal.into());
        id
    }

    /// Create a predicate.
    pub fn create_predicate(
        &mut self,
        label: impl Into<String>,
        created_by: ContributorId,
    ) -> ThingId {
        let id = self.id_alloc.alloc_predicate_id();
        let mut predicate = Predicate::new(id.clone(), label);
        predicate.created_by = created_by;
        self.things.insert(id.clone(), predicate.into());
        id
    }

    /// Create a class.
    pub fn create_class(
        &mut self,
        label: impl Into<String>,
        uri: Option<String>,
        created_by: ContributorId,
    ) -> ThingId {
        let id = self.id_alloc.alloc_class_id();
        let mut class = Class::new(id.clone(), label);
        class.uri = uri;
        class.created_by = created_by;
        self.things.insert(id.clone(), class.into());
        id
    }

    /// Get a thing by ID.
    pub fn get_thing(&self, id: &ThingId) -> Option<&Thing> {
        self.things.get(id)
    }

    /// Get a resource by ID.
    pub fn get_resource(&self, id: &ThingId) -> Option<&Resource> {
        self.things.get(id).and_then(Thing::as_resource)
    }

    /// Apply a change to a modifiable resource and bump its version.
    pub fn update_resource(
        &mut self,
        id: &ThingId,
        change: impl FnOnce(&mut Resource),
    ) -> GraphResult<()> {
        let resource = match self.things.get_mut(id) {
            Some(Thing::Resource(resource)) => resource,
            _ => return Err(GraphError::ResourceNotFound(id.clone())),
        };
        if !resource.modifiable {
            return Err(GraphError::NotModifiable(id.clone()));
        }

        let old_classes = resource.classes.clone();
        change(resource);
        resource.version += 1;
        let new_classes = resource.classes.clone();

        // Keep class index in sync
        for class in old_classes.difference(&new_classes) {
            self.class_index.remove(class, id);
        }
        for class in new_classes.difference(&old_classes) {
            self.class_index.insert(class, id);
        }
        Ok(())
    }

    /// Replace the label of a literal.
    pub fn update_literal(&mut self, id: &ThingId, label: impl Into<String>) -> GraphResult<()> {
        match self.things.get_mut(id) {
            Some(Thing::Literal(literal)) if !literal.modifiable => {
                Err(GraphError::NotModifiable(id.clone()))
            }
            Some(Thing::Literal(literal)) => {
                literal.label = label.into();
                Ok(())
            }
            _ => Err(GraphError::LiteralNotFound(id.clone())),
        }
    }

    /// Delete a resource that no statement references anymore.
    pub fn delete_resource(&mut self, id: &ThingId) -> GraphResult<()> {
        let resource = self
            .get_resource(id)
            .ok_or_else(|| GraphError::ResourceNotFound(id.clone()))?;
        if !resource.modifiable {
            return Err(GraphError::NotModifiable(id.clone()));
        }
        if self.adj_index.is_referenced(id) {
            return Err(GraphError::ResourceInUse(id.clone()));
        }

        for class in resource.classes.clone() {
            self.class_index.remove(&class, id);
        }
        self.things.remove(id);
        Ok(())
    }

    /// Get resources tagged with a class.
    pub fn resources_of_class<'a>(
        &'a self,
        class: &ThingId,
    ) -> impl Iterator<Item = &'a ThingId> + 'a {
        self.class_index.get(class)
    }

    // ==================== Statement Operations ====================

    /// Create a statement between two existing things.
    pub fn create_statement(
        &mut self,
        subject: &ThingId,
        predicate: &ThingId,
        object: &ThingId,
        created_by: ContributorId,
    ) -> GraphResult<StatementId> {
        if !self.things.contains_key(subject) {
            return Err(GraphError::ThingNotFound(subject.clone()));
        }
        if !matches!(self.things.get(predicate), Some(Thing::Predicate(_))) {
            return Err(GraphError::PredicateNotFound(predicate.clone()));
        }
        if !self.things.contains_key(object) {
            return Err(GraphError::ThingNotFound(object.clone()));
        }

        let (id, seq) = self.id_alloc.alloc_statement_id();
        self.adj_index.insert(&id, subject, object);
        self.statements.insert(
            id.clone(),
            StoredStatement {
                subject: subject.clone(),
                predicate: predicate.clone(),
                object: object.clone(),
                created_by,
                seq,
            },
        );
        Ok(id)
    }

    /// Get a statement with its endpoints resolved.
    pub fn get_statement(&self, id: &StatementId) -> Option<Statement> {
        let stored = self.statements.get(id)?;
        self.resolve(id, stored)
    }

    /// Delete a statement.
    pub fn delete_statement(&mut self, id: &StatementId) -> GraphResult<()> {
        let stored = self
            .statements
            .remove(id)
            .ok_or_else(|| GraphError::StatementNotFound(id.clone()))?;
        self.adj_index.remove(id, &stored.subject, &stored.object);
        Ok(())
    }

    /// Check if a statement exists.
    pub fn statement_exists(&self, id: &StatementId) -> bool {
        self.statements.contains_key(id)
    }

    /// Get the statements starting at a thing, in creation order.
    pub fn statements_from(&self, subject: &ThingId) -> Vec<Statement> {
        self.collect_ordered(self.adj_index.statements_from(subject))
    }

    /// Get the statements ending at a thing, in creation order.
    pub fn statements_to(&self, object: &ThingId) -> Vec<Statement> {
        self.collect_ordered(self.adj_index.statements_to(object))
    }

    /// Get the number of statements.
    pub fn statement_count(&self) -> usize {
        self.statements.len()
    }

    // ==================== Bundle Operations ====================

    /// Collect every statement reachable from `root` within `max_level`
    /// hops along outgoing statements, in creation order.
    pub fn fetch_bundle(&self, root: &ThingId, max_level: usize) -> Vec<Statement> {
        let mut visited: HashSet<ThingId> = HashSet::new();
        let mut found: HashSet<&StatementId> = HashSet::new();
        let mut queue: VecDeque<(ThingId, usize)> = VecDeque::new();

        visited.insert(root.clone());
        queue.push_back((root.clone(), 1));

        while let Some((subject, level)) = queue.pop_front() {
            if level > max_level {
                continue;
            }
            for id in self.adj_index.statements_from(&subject) {
                if !found.insert(id) {
                    continue;
                }
                if let Some(stored) = self.statements.get(id) {
                    if visited.insert(stored.object.clone()) {
                        queue.push_back((stored.object.clone(), level + 1));
                    }
                }
            }
        }

        self.collect_ordered(found.into_iter())
    }

    // ==================== Helpers ====================

    fn collect_ordered<'a>(&self, ids: impl Iterator<Item = &'a StatementId>) -> Vec<Statement> {
        let mut stored: Vec<(&StatementId, &StoredStatement)> = ids
            .filter_map(|id| self.statements.get(id).map(|s| (id, s)))
            .collect();
        stored.sort_by_key(|(_, s)| s.seq);
        stored
            .into_iter()
            .filter_map(|(id, s)| self.resolve(id, s))
            .collect()
    }

    fn resolve(&self, id: &StatementId, stored: &StoredStatement) -> Option<Statement> {
        let predicate = match self.things.get(&stored.predicate)? {
            Thing::Predicate(predicate) => predicate.clone(),
            _ => return None,
        };
        Some(Statement {
            id: id.clone(),
            subject: self.things.get(&stored.subject)?.clone(),
            predicate,
            object: self.things.get(&stored.object)?.clone(),
            created_by: stored.created_by,
        })
    }
}
