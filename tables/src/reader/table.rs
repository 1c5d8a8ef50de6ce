//! Table read model.

use tabula_core::{
    ContributorId, ExtractionMethod, ObservatoryId, OrganizationId, Resource, Thing, ThingId,
    Visibility,
};

use super::graph::TableGraph;

/// A row as read back: the header row has no label and holds the column
/// titles.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub label: Option<String>,
    pub data: Vec<Option<Thing>>,
}

impl TableRow {
    pub fn data_ids(&self) -> Vec<Option<&ThingId>> {
        self.data.iter().map(|d| d.as_ref().map(Thing::id)).collect()
    }

    pub fn data_labels(&self) -> Vec<Option<&str>> {
        self.data.iter().map(|d| d.as_ref().map(Thing::label)).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub id: ThingId,
    pub label: String,
    /// The header row first, then the data rows.
    pub rows: Vec<TableRow>,
    pub observatories: Vec<ObservatoryId>,
    pub organizations: Vec<OrganizationId>,
    pub extraction_method: ExtractionMethod,
    pub visibility: Visibility,
    pub created_by: ContributorId,
    pub modifiable: bool,
}

impl Table {
    /// Assemble a table from its resource and its parsed structure.
    pub fn from_graph(resource: &Resource, graph: &TableGraph) -> Self {
        let header = TableRow {
            label: None,
            data: graph.columns.iter().map(|c| c.title().cloned()).collect(),
        };
        let rows = graph.rows.iter().map(|row| TableRow {
            label: row.label().map(str::to_string),
            data: row
                .cells
                .iter()
                .map(|cell| cell.as_ref().and_then(|c| c.value()).cloned())
                .collect(),
        });

        Self {
            id: resource.id.clone(),
            label: resource.label.clone(),
            rows: std::iter::once(header).chain(rows).collect(),
            observatories: resource.observatory_id.into_iter().collect(),
            organizations: resource.organization_id.into_iter().collect(),
            extraction_method: resource.extraction_method,
            visibility: resource.visibility,
            created_by: resource.created_by,
            modifiable: resource.modifiable,
        }
    }

    pub fn header(&self) -> &TableRow {
        &self.rows[0]
    }

    /// The data rows, without the header.
    pub fn data_rows(&self) -> &[TableRow] {
        &self.rows[1..]
    }
}
