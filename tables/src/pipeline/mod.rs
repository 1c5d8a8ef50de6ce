//! Action pipelines.
//!
//! A pipeline is a fixed, ordered list of steps threading a state value
//! through validation, writing and reconciliation. The builder is a
//! typestate: once a later phase has started, steps of an earlier phase
//! can no longer be added.
//!
//! ```text
//! PipelineBuilder<Validating> --writing()--> PipelineBuilder<Writing>
//!                                  --reconciling()--> PipelineBuilder<Reconciling>
//! ```

mod create;
mod update;

use std::marker::PhantomData;

use tracing::debug;

use crate::error::TableResult;

pub use create::{
    create_table_pipeline, TableCellsCreator, TableColumnsCreator, TableResourceCreator,
    TableRowsCreator,
};
pub use update::{
    update_table_pipeline, TableExistenceValidator, TableGraphParser, TableMetadataUpdater,
    TableModifiableValidator, TableStatementsLoader,
};

/// One pipeline step.
pub trait Action<C, S>: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Produce the next state.
    fn apply(&self, command: &C, state: S) -> TableResult<S>;
}

/// Phase markers.
pub struct Validating;
pub struct Writing;
pub struct Reconciling;

pub struct PipelineBuilder<C, S, P> {
    name: &'static str,
    steps: Vec<Box<dyn Action<C, S>>>,
    _phase: PhantomData<P>,
}

impl<C, S, P> PipelineBuilder<C, S, P> {
    fn push(mut self, step: impl Action<C, S> + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    fn into_phase<Q>(self) -> PipelineBuilder<C, S, Q> {
        PipelineBuilder {
            name: self.name,
            steps: self.steps,
            _phase: PhantomData,
        }
    }
}

impl<C, S> PipelineBuilder<C, S, Validating> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            steps: Vec::new(),
            _phase: PhantomData,
        }
    }

    /// Add a step that reads and checks, but never mutates the graph.
    pub fn validate(self, step: impl Action<C, S> + 'static) -> Self {
        self.push(step)
    }

    pub fn writing(self) -> PipelineBuilder<C, S, Writing> {
        self.into_phase()
    }
}

impl<C, S> PipelineBuilder<C, S, Writing> {
    /// Add a step that creates things.
    pub fn write(self, step: impl Action<C, S> + 'static) -> Self {
        self.push(step)
    }

    pub fn reconciling(self) -> PipelineBuilder<C, S, Reconciling> {
        self.into_phase()
    }

    pub fn build(self) -> Pipeline<C, S> {
        Pipeline {
            name: self.name,
            steps: self.steps,
        }
    }
}

impl<C, S> PipelineBuilder<C, S, Reconciling> {
    /// Add a step that diffs against, and patches, the persisted structure.
    pub fn reconcile(self, step: impl Action<C, S> + 'static) -> Self {
        self.push(step)
    }

    pub fn build(self) -> Pipeline<C, S> {
        Pipeline {
            name: self.name,
            steps: self.steps,
        }
    }
}

/// A built pipeline.
pub struct Pipeline<C, S> {
    name: &'static str,
    steps: Vec<Box<dyn Action<C, S>>>,
}

impl<C, S> Pipeline<C, S> {
    /// Run every step in order, stopping at the first error.
    pub fn execute(&self, command: &C, state: S) -> TableResult<S> {
        let mut state = state;
        for step in &self.steps {
            debug!(pipeline = self.name, step = step.name(), "applying step");
            state = step.apply(command, state)?;
        }
        Ok(state)
    }

    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
