//! Shared id resolution for validators.

use std::sync::Arc;

use tabula_core::ThingId;
use tabula_graph::ports::ThingRepository;

use crate::cache::IdentityCache;
use crate::command::ThingDefinitions;
use crate::config::TableConfig;
use crate::error::{TableError, TableResult};

/// Resolves ids mentioned by a command into the identity cache.
#[derive(Clone)]
pub struct ThingIdValidator {
    things: Arc<dyn ThingRepository>,
    config: TableConfig,
}

impl ThingIdValidator {
    pub fn new(things: Arc<dyn ThingRepository>, config: TableConfig) -> Self {
        Self { things, config }
    }

    /// Make sure `id` names a declared temp id or an existing thing.
    ///
    /// Temp ids are cached as pending definitions, existing things as
    /// resolved. Ids already in the cache are accepted as they are.
    pub fn validate(
        &self,
        id: &str,
        definitions: &ThingDefinitions,
        cache: &mut IdentityCache,
    ) -> TableResult<()> {
        if cache.contains(id) {
            return Ok(());
        }

        if self.config.is_temp_id(id) {
            let definition = definitions
                .get(id)
                .ok_or_else(|| TableError::thing_not_found(id))?;
            cache.insert_pending(id, definition);
        } else {
            let thing = self
                .things
                .find_thing(&ThingId::new(id))
                .ok_or_else(|| TableError::thing_not_found(id))?;
            cache.insert_resolved(thing);
        }
        Ok(())
    }
}
