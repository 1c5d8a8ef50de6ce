//! Mutation journal.
//!
//! Every successful mutation issued through the in-memory adapter is
//! appended here with a log sequence number, so callers can inspect the
//! exact set of writes a command produced.

use std::collections::BTreeSet;

use tabula_core::{StatementId, ThingId};

/// Log Sequence Number - unique identifier for each journal record.
pub type Lsn = u64;

/// Journal entry types.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationEntry {
    /// Create a resource.
    CreateResource {
        id: ThingId,
        label: String,
        classes: BTreeSet<ThingId>,
    },

    /// Update a resource's metadata.
    UpdateResource { id: ThingId },

    /// Delete a resource.
    DeleteResource { id: ThingId },

    /// Create a literal.
    CreateLiteral {
        id: ThingId,
        label: String,
        datatype: String,
    },

    /// Replace a literal's label.
    UpdateLiteral { id: ThingId, label: String },

    /// Create a statement.
    CreateStatement {
        id: StatementId,
        subject: ThingId,
        predicate: ThingId,
        object: ThingId,
    },

    /// Delete a batch of statements.
    DeleteStatements { ids: BTreeSet<StatementId> },

    /// Create a predicate.
    CreatePredicate { id: ThingId, label: String },

    /// Create a class.
    CreateClass { id: ThingId, label: String },
}

/// Coarse classification of journal entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    CreateResource,
    UpdateResource,
    DeleteResource,
    CreateLiteral,
    UpdateLiteral,
    CreateStatement,
    DeleteStatements,
    CreatePredicate,
    CreateClass,
}

impl MutationEntry {
    /// Get the kind of this entry.
    pub fn kind(&self) -> MutationKind {
        match self {
            MutationEntry::CreateResource { .. } => MutationKind::CreateResource,
            MutationEntry::UpdateResource { .. } => MutationKind::UpdateResource,
            MutationEntry::DeleteResource { .. } => MutationKind::DeleteResource,
            MutationEntry::CreateLiteral { .. } => MutationKind::CreateLiteral,
            MutationEntry::UpdateLiteral { .. } => MutationKind::UpdateLiteral,
            MutationEntry::CreateStatement { .. } => MutationKind::CreateStatement,
            MutationEntry::DeleteStatements { .. } => MutationKind::DeleteStatements,
            MutationEntry::CreatePredicate { .. } => MutationKind::CreatePredicate,
            MutationEntry::CreateClass { .. } => MutationKind::CreateClass,
        }
    }

    /// Check if this entry creates a thing or a statement.
    pub fn is_creation(&self) -> bool {
        matches!(
            self,
            MutationEntry::CreateResource { .. }
                | MutationEntry::CreateLiteral { .. }
                | MutationEntry::CreateStatement { .. }
                | MutationEntry::CreatePredicate { .. }
                | MutationEntry::CreateClass { .. }
        )
    }

    /// Check if this entry deletes anything.
    pub fn is_deletion(&self) -> bool {
        matches!(
            self,
            MutationEntry::DeleteResource { .. } | MutationEntry::DeleteStatements { .. }
        )
    }
}

/// A journal record with its LSN.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationRecord {
    /// Log sequence number.
    pub lsn: Lsn,
    /// The entry data.
    pub entry: MutationEntry,
}

impl MutationRecord {
    /// Create a new journal record.
    pub fn new(lsn: Lsn, entry: MutationEntry) -> Self {
        Self { lsn, entry }
    }
}

/// In-memory journal of mutations.
#[derive(Debug, Clone)]
pub struct MutationJournal {
    /// All recorded entries.
    records: Vec<MutationRecord>,
    /// Next LSN to assign.
    next_lsn: Lsn,
}

impl Default for MutationJournal {
    fn default() -> Self {
        Self::new()
    }
}

impl MutationJournal {
    /// Create a new empty journal.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_lsn: 1,
        }
    }

    /// Append an entry to the journal.
    pub fn append(&mut self, entry: MutationEntry) -> Lsn {
        let lsn = self.next_lsn;
        self.next_lsn += 1;
        self.records.push(MutationRecord::new(lsn, entry));
        lsn
    }

    /// Get all records.
    pub fn records(&self) -> &[MutationRecord] {
        &self.records
    }

    /// Get the records appended after the given LSN.
    pub fn since(&self, lsn: Lsn) -> &[MutationRecord] {
        let start = self.records.partition_point(|r| r.lsn <= lsn);
        &self.records[start..]
    }

    /// LSN of the last record, or 0 for an empty journal.
    pub fn last_lsn(&self) -> Lsn {
        self.next_lsn - 1
    }

    /// Get entry by LSN.
    pub fn get(&self, lsn: Lsn) -> Option<&MutationRecord> {
        self.records
            .binary_search_by_key(&lsn, |r| r.lsn)
            .ok()
            .map(|i| &self.records[i])
    }

    /// Drop every record after the given LSN.
    pub fn truncate_after(&mut self, lsn: Lsn) {
        let keep = self.records.partition_point(|r| r.lsn <= lsn);
        self.records.truncate(keep);
        self.next_lsn = lsn + 1;
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
