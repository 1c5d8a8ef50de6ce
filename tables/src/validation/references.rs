use crate::command::TableCommand;
use crate::error::TableResult;
use crate::pipeline::Action;
use crate::state::ValidationState;

use super::ThingIdValidator;

/// Checks that every value of every data row names a declared temp id or an
/// existing thing.
pub struct CellReferenceValidator {
    thing_ids: ThingIdValidator,
}

impl CellReferenceValidator {
    pub fn new(thing_ids: ThingIdValidator) -> Self {
        Self { thing_ids }
    }
}

impl<C: TableCommand, S: ValidationState> Action<C, S> for CellReferenceValidator {
    fn name(&self) -> &'static str {
        "validate-cell-references"
    }

    fn apply(&self, command: &C, mut state: S) -> TableResult<S> {
        let Some(rows) = command.rows() else {
            return Ok(state);
        };

        for id in rows.iter().skip(1).flat_map(|row| row.data.iter().flatten()) {
            self.thing_ids
                .validate(id, command.thing_definitions(), state.identities_mut())?;
        }
        Ok(state)
    }
}
