use crate::command::TableCommand;
use crate::error::{TableError, TableResult};
use crate::pipeline::Action;
use crate::state::ValidationState;

use super::ThingIdValidator;

/// Checks that every header value names a string literal, declared or
/// persisted.
pub struct ColumnTypeValidator {
    thing_ids: ThingIdValidator,
}

impl ColumnTypeValidator {
    pub fn new(thing_ids: ThingIdValidator) -> Self {
        Self { thing_ids }
    }
}

impl<C: TableCommand, S: ValidationState> Action<C, S> for ColumnTypeValidator {
    fn name(&self) -> &'static str {
        "validate-column-types"
    }

    fn apply(&self, command: &C, mut state: S) -> TableResult<S> {
        let Some(header) = command.rows().and_then(|rows| rows.first()) else {
            return Ok(state);
        };

        for (index, value) in header.data.iter().enumerate() {
            let id = value
                .as_deref()
                .ok_or_else(|| TableError::missing_header_value(index))?;
            self.thing_ids
                .validate(id, command.thing_definitions(), state.identities_mut())?;
            let is_literal = state
                .identities()
                .get(id)
                .is_some_and(|resolution| resolution.is_string_literal());
            if !is_literal {
                return Err(TableError::header_must_be_literal(index));
            }
        }
        Ok(state)
    }
}
