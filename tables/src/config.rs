//! Table engine configuration.

use tabula_core::label::MAX_LABEL_LENGTH;

/// Configuration for the table pipelines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    /// Upper bound on label and literal lengths, in characters.
    pub max_label_length: usize,
    /// Leading character that marks a temporary id.
    pub temp_id_prefix: char,
    /// How many hops to follow from the table resource when reading it.
    pub bundle_depth: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            max_label_length: MAX_LABEL_LENGTH,
            temp_id_prefix: '#',
            bundle_depth: 3,
        }
    }
}

impl TableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_label_length(mut self, max_label_length: usize) -> Self {
        self.max_label_length = max_label_length;
        self
    }

    pub fn with_temp_id_prefix(mut self, temp_id_prefix: char) -> Self {
        self.temp_id_prefix = temp_id_prefix;
        self
    }

    pub fn with_bundle_depth(mut self, bundle_depth: usize) -> Self {
        self.bundle_depth = bundle_depth;
        self
    }

    /// Returns true if the id is written as a temporary id.
    pub fn is_temp_id(&self, id: &str) -> bool {
        id.starts_with(self.temp_id_prefix)
    }
}
