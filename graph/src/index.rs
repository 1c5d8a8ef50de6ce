//! Indexes for efficient graph lookups.

use std::collections::{HashMap, HashSet};

use tabula_core::{StatementId, ThingId};

/// Class index: class -> Set<resource>
#[derive(Debug, Clone, Default)]
pub struct ClassIndex {
    index: HashMap<ThingId, HashSet<ThingId>>,
}

impl ClassIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, class: &ThingId, resource: &ThingId) {
        self.index
            .entry(class.clone())
            .or_default()
            .insert(resource.clone());
    }

    pub fn remove(&mut self, class: &ThingId, resource: &ThingId) {
        if let Some(set) = self.index.get_mut(class) {
            set.remove(resource);
            if set.is_empty() {
                self.index.remove(class);
            }
        }
    }

    pub fn get<'a>(&'a self, class: &ThingId) -> impl Iterator<Item = &'a ThingId> + 'a {
        self.index.get(class).into_iter().flat_map(|set| set.iter())
    }
}

/// Adjacency index: thing -> statements it is the subject or object of.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyIndex {
    /// Statements by subject.
    outgoing: HashMap<ThingId, HashSet<StatementId>>,
    /// Statements by object.
    incoming: HashMap<ThingId, HashSet<StatementId>>,
}

impl AdjacencyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, statement: &StatementId, subject: &ThingId, object: &ThingId) {
        self.outgoing
            .entry(subject.clone())
            .or_default()
            .insert(statement.clone());
        self.incoming
            .entry(object.clone())
            .or_default()
            .insert(statement.clone());
    }

    pub fn remove(&mut self, statement: &StatementId, subject: &ThingId, object: &ThingId) {
        if let Some(set) = self.outgoing.get_mut(subject) {
            set.remove(statement);
            if set.is_empty() {
                self.outgoing.remove(subject);
            }
        }
        if let Some(set) = self.incoming.get_mut(object) {
            set.remove(statement);
            if set.is_empty() {
                self.incoming.remove(object);
            }
        }
    }

    /// Statements whose subject is the given thing.
    pub fn statements_from<'a>(
        &'a self,
        subject: &ThingId,
    ) -> impl Iterator<Item = &'a StatementId> + 'a {
        self.outgoing.get(subject).into_iter().flat_map(|set| set.iter())
    }

    /// Statements whose object is the given thing.
    pub fn statements_to<'a>(
        &'a self,
        object: &ThingId,
    ) -> impl Iterator<Item = &'a StatementId> + 'a {
        self.incoming.get(object).into_iter().flat_map(|set| set.iter())
    }

    /// Returns true if any statement starts or ends at the thing.
    pub fn is_referenced(&self, thing: &ThingId) -> bool {
        self.outgoing.contains_key(thing) || self.incoming.contains_key(thing)
    }
}
