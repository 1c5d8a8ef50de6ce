use std::collections::BTreeMap;

use crate::command::TableCommand;
use crate::config::TableConfig;
use crate::error::{TableError, TableResult};
use crate::pipeline::Action;

/// Checks the syntax and uniqueness of every declared temp id.
pub struct TempIdValidator {
    config: TableConfig,
}

impl TempIdValidator {
    pub fn new(config: TableConfig) -> Self {
        Self { config }
    }

    fn check<C: TableCommand>(&self, command: &C) -> TableResult<()> {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for temp_id in command.thing_definitions().temp_ids() {
            if !self.config.is_temp_id(temp_id) || temp_id.chars().count() <= 1 {
                return Err(TableError::InvalidTempId(temp_id.clone()));
            }
            *counts.entry(temp_id.clone()).or_default() += 1;
        }

        counts.retain(|_, count| *count > 1);
        if counts.is_empty() {
            Ok(())
        } else {
            Err(TableError::DuplicateTempIds(counts))
        }
    }
}

impl<C: TableCommand, S> Action<C, S> for TempIdValidator {
    fn name(&self) -> &'static str {
        "validate-temp-ids"
    }

    fn apply(&self, command: &C, state: S) -> TableResult<S> {
        if command.rows().is_some() {
            self.check(command)?;
        }
        Ok(state)
    }
}
