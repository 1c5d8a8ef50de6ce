//! Scenario harness.
//!
//! Runs service calls against an in-memory graph, one transaction per step,
//! and checks each step's outcome and journaled mutations.

use std::sync::{Arc, Once};

use tabula_core::{ContributorId, ThingId};
use tabula_graph::ports::StatementRepository;
use tabula_graph::InMemoryGraph;
use tabula_tables::{Table, TableConfig, TableGraph, TablePorts, TableResult, TableService};
use tracing_subscriber::EnvFilter;

use crate::assertion::{Assertion, MutationSummary};
use crate::error::{ScenarioError, ScenarioResult};
use crate::fixture::TableFixture;

/// Install a test log subscriber once. The filter is read from `TABULA_LOG`.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env("TABULA_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// A service over a fresh in-memory graph.
pub struct Harness {
    graph: Arc<InMemoryGraph>,
    service: TableService,
    contributor_id: ContributorId,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(TableConfig::default())
    }

    pub fn with_config(config: TableConfig) -> Self {
        Self::with_ports(Arc::new(InMemoryGraph::new()), |ports| ports, config)
    }

    /// Build a harness whose ports can be rewired, e.g. to inject failures.
    pub fn with_ports(
        graph: Arc<InMemoryGraph>,
        wire: impl FnOnce(TablePorts) -> TablePorts,
        config: TableConfig,
    ) -> Self {
        init_tracing();
        let ports = wire(TablePorts::from_adapter(graph.clone()));
        Self {
            graph,
            service: TableService::with_config(ports, config),
            contributor_id: ContributorId::new(1),
        }
    }

    pub fn graph(&self) -> &Arc<InMemoryGraph> {
        &self.graph
    }

    pub fn service(&self) -> &TableService {
        &self.service
    }

    pub fn contributor_id(&self) -> ContributorId {
        self.contributor_id
    }

    /// Run one step in a transaction and verify its outcome.
    ///
    /// A failed step is rolled back, so only successful steps leave
    /// mutations behind.
    pub fn step<T>(
        &self,
        name: &str,
        assertion: Assertion,
        f: impl FnOnce(&TableService) -> TableResult<T>,
    ) -> ScenarioResult<Option<T>> {
        let mark = self.graph.last_lsn();
        let result = self.graph.transaction(|_| f(&self.service));
        let summary = MutationSummary::of(&self.graph.mutations_since(mark));
        assertion.verify(name, &result, &summary)?;
        Ok(result.ok())
    }

    /// Create a table that later steps build on.
    pub fn seed(&self, fixture: &TableFixture) -> ScenarioResult<ThingId> {
        self.service
            .create(fixture.create_command(self.contributor_id))
            .map_err(|e| ScenarioError::setup(e.to_string()))
    }

    /// Read a table that must exist.
    pub fn read(&self, id: &ThingId) -> ScenarioResult<Table> {
        self.service
            .find_by_id(id)
            .ok_or_else(|| ScenarioError::setup(format!("table {} not found", id)))
    }

    /// The persisted columns, rows and cells of a table.
    pub fn structure(&self, id: &ThingId) -> TableGraph {
        let statements = self
            .graph
            .fetch_bundle(id, self.service.config().bundle_depth);
        TableGraph::parse(id, &statements)
    }

    /// Cell ids of every data row.
    pub fn cell_ids(&self, id: &ThingId) -> Vec<Vec<Option<ThingId>>> {
        self.structure(id)
            .rows
            .iter()
            .map(|row| {
                row.cells
                    .iter()
                    .map(|cell| cell.as_ref().map(|c| c.cell_id.clone()))
                    .collect()
            })
            .collect()
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}
