//! Table fixtures.
//!
//! Builds commands from grids of strings. Every non-empty string becomes a
//! string literal declared under a temp id; an empty string is an empty
//! cell.

use tabula_core::ContributorId;
use tabula_tables::{CreateTableCommand, RowDefinition, Table, ThingDefinitions, UpdateTableCommand};

/// A table described by its header and labelled data rows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableFixture {
    pub label: String,
    pub header: Vec<String>,
    pub rows: Vec<(Option<String>, Vec<String>)>,
}

impl TableFixture {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// Header first, then unlabelled data rows.
    pub fn from_grid(label: impl Into<String>, grid: &[&[&str]]) -> Self {
        let mut fixture = Self::new(label);
        if let Some((header, rows)) = grid.split_first() {
            fixture = fixture.header(header);
            for row in rows {
                fixture = fixture.row(row);
            }
        }
        fixture
    }

    pub fn header(mut self, titles: &[&str]) -> Self {
        self.header = titles.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn row(mut self, values: &[&str]) -> Self {
        self.rows
            .push((None, values.iter().map(|v| v.to_string()).collect()));
        self
    }

    pub fn labelled_row(mut self, label: &str, values: &[&str]) -> Self {
        self.rows.push((
            Some(label.to_string()),
            values.iter().map(|v| v.to_string()).collect(),
        ));
        self
    }

    /// The create command declaring one literal per non-empty value.
    pub fn create_command(&self, contributor_id: ContributorId) -> CreateTableCommand {
        let mut things = ThingDefinitions::new();
        let mut declare = |temp_id: String, value: &str| -> Option<String> {
            if value.is_empty() {
                return None;
            }
            things = std::mem::take(&mut things).with_string(temp_id.as_str(), value);
            Some(temp_id)
        };

        let header = RowDefinition {
            label: None,
            data: self
                .header
                .iter()
                .enumerate()
                .map(|(c, title)| declare(format!("#h{}", c), title))
                .collect(),
        };
        let mut rows = vec![header];
        for (r, (label, values)) in self.rows.iter().enumerate() {
            rows.push(RowDefinition {
                label: label.clone(),
                data: values
                    .iter()
                    .enumerate()
                    .map(|(c, value)| declare(format!("#r{}c{}", r, c), value))
                    .collect(),
            });
        }

        CreateTableCommand::new(contributor_id, self.label.as_str())
            .with_rows(rows)
            .with_things(things)
    }

    /// The fixture a read-back table corresponds to.
    pub fn from_table(table: &Table) -> Self {
        let labels = |data: Vec<Option<&str>>| -> Vec<String> {
            data.into_iter()
                .map(|v| v.unwrap_or_default().to_string())
                .collect()
        };
        Self {
            label: table.label.clone(),
            header: labels(table.header().data_labels()),
            rows: table
                .data_rows()
                .iter()
                .map(|row| (row.label.clone(), labels(row.data_labels())))
                .collect(),
        }
    }
}

/// An update command that restates a read-back table exactly, by id.
pub fn restate(table: &Table, contributor_id: ContributorId) -> UpdateTableCommand {
    let rows = table
        .rows
        .iter()
        .map(|row| RowDefinition {
            label: row.label.clone(),
            data: row
                .data_ids()
                .into_iter()
                .map(|id| id.map(|id| id.to_string()))
                .collect(),
        })
        .collect();
    UpdateTableCommand::new(table.id.clone(), contributor_id).with_rows(rows)
}

/// Edit helpers for update commands.
pub trait RowsExt {
    /// Set the value of a cell; row 0 is the header.
    fn set_cell(self, row: usize, slot: usize, value: Option<&str>) -> Self;

    fn set_label(self, row: usize, label: Option<&str>) -> Self;

    /// Keep the header and the first `n` data rows.
    fn keep_rows(self, n: usize) -> Self;

    /// Keep the first `n` values of every row.
    fn keep_columns(self, n: usize) -> Self;
}

impl RowsExt for UpdateTableCommand {
    fn set_cell(mut self, row: usize, slot: usize, value: Option<&str>) -> Self {
        if let Some(cell) = self
            .rows
            .as_mut()
            .and_then(|rows| rows.get_mut(row))
            .and_then(|row| row.data.get_mut(slot))
        {
            *cell = value.map(str::to_string);
        }
        self
    }

    fn set_label(mut self, row: usize, label: Option<&str>) -> Self {
        if let Some(row) = self.rows.as_mut().and_then(|rows| rows.get_mut(row)) {
            row.label = label.map(str::to_string);
        }
        self
    }

    fn keep_rows(mut self, n: usize) -> Self {
        if let Some(rows) = self.rows.as_mut() {
            rows.truncate(n + 1);
        }
        self
    }

    fn keep_columns(mut self, n: usize) -> Self {
        for row in self.rows.iter_mut().flatten() {
            row.data.truncate(n);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_declares_non_empty_values() {
        let fixture = TableFixture::from_grid("t", &[&["name", "age"], &["Alice", ""]]);

        let command = fixture.create_command(ContributorId::new(1));

        assert_eq!(command.rows.len(), 2);
        assert_eq!(command.rows[1].data, vec![Some("#r0c0".to_string()), None]);
        assert_eq!(command.thing_definitions.literals.len(), 3);
    }

    #[test]
    fn test_edits_apply_to_rows() {
        let command = UpdateTableCommand::new("R1".into(), ContributorId::new(1))
            .with_rows(vec![
                RowDefinition::of(&["L1", "L2"]),
                RowDefinition::of(&["L3", "L4"]),
                RowDefinition::of(&["L5", "L6"]),
            ])
            .set_cell(1, 1, None)
            .set_label(1, Some("first"))
            .keep_rows(1)
            .keep_columns(1);

        let rows = command.rows.expect("rows should be set");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], RowDefinition::new(Some("first"), vec![Some("L3")]));
    }
}
