//! Per-column, per-row and per-cell views over a table's statements.
//!
//! A table is stored as:
//!
//! ```text
//! table --CSVW_Columns--> column --CSVW_Number--> "1"
//!                                --CSVW_Titles--> title literal
//! table --CSVW_Rows-----> row    --CSVW_Number--> "1"
//!                                --CSVW_Titles--> label literal
//!                                --CSVW_Cells---> cell --CSVW_Column--> column
//!                                                      --CSVW_Value---> value
//! ```

use std::collections::{BTreeSet, HashMap};

use tracing::warn;

use tabula_core::vocab::predicates;
use tabula_core::{Statement, StatementId, Thing, ThingId};

/// An existing column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnGraph {
    pub column_id: ThingId,
    /// `table --CSVW_Columns--> column`
    pub column_statement: StatementId,
    pub number_statement: Option<Statement>,
    pub title_statement: Option<Statement>,
}

impl ColumnGraph {
    /// The 1-based position recorded on the column.
    pub fn number(&self) -> Option<i64> {
        parse_number(self.number_statement.as_ref())
    }

    pub fn title(&self) -> Option<&Thing> {
        self.title_statement.as_ref().map(|s| &s.object)
    }

    pub fn title_id(&self) -> Option<&ThingId> {
        self.title().map(Thing::id)
    }

    /// Statements to delete together with the column.
    pub fn statement_ids(&self) -> BTreeSet<StatementId> {
        let mut ids = BTreeSet::from([self.column_statement.clone()]);
        ids.extend(self.number_statement.iter().map(|s| s.id.clone()));
        ids.extend(self.title_statement.iter().map(|s| s.id.clone()));
        ids
    }
}

/// An existing cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellGraph {
    pub cell_id: ThingId,
    /// `row --CSVW_Cells--> cell`
    pub cell_statement: StatementId,
    pub column_statement: Option<Statement>,
    pub value_statement: Option<Statement>,
}

impl CellGraph {
    pub fn column_id(&self) -> Option<&ThingId> {
        self.column_statement.as_ref().map(|s| s.object.id())
    }

    pub fn value(&self) -> Option<&Thing> {
        self.value_statement.as_ref().map(|s| &s.object)
    }

    pub fn value_id(&self) -> Option<&ThingId> {
        self.value().map(Thing::id)
    }

    /// Statements to delete together with the cell.
    pub fn statement_ids(&self) -> BTreeSet<StatementId> {
        let mut ids = BTreeSet::from([self.cell_statement.clone()]);
        ids.extend(self.column_statement.iter().map(|s| s.id.clone()));
        ids.extend(self.value_statement.iter().map(|s| s.id.clone()));
        ids
    }
}

/// An existing row, with its cells aligned to the column order.
#[derive(Debug, Clone, PartialEq)]
pub struct RowGraph {
    pub row_id: ThingId,
    /// `table --CSVW_Rows--> row`
    pub row_statement: StatementId,
    pub number_statement: Option<Statement>,
    pub label_statement: Option<Statement>,
    /// One slot per column; `None` where the row has no cell.
    pub cells: Vec<Option<CellGraph>>,
    /// Cells that could not be placed under any column.
    pub stray_cells: Vec<CellGraph>,
}

impl RowGraph {
    pub fn number(&self) -> Option<i64> {
        parse_number(self.number_statement.as_ref())
    }

    pub fn label(&self) -> Option<&str> {
        self.label_statement.as_ref().map(|s| s.object.label())
    }

    /// The value id of every cell slot.
    pub fn value_ids(&self) -> Vec<Option<&ThingId>> {
        self.cells
            .iter()
            .map(|cell| cell.as_ref().and_then(CellGraph::value_id))
            .collect()
    }

    /// Every cell owned by the row, placed or not.
    pub fn all_cells(&self) -> impl Iterator<Item = &CellGraph> {
        self.cells.iter().flatten().chain(self.stray_cells.iter())
    }

    /// Statements to delete together with the row. Cells are not included.
    pub fn statement_ids(&self) -> BTreeSet<StatementId> {
        let mut ids = BTreeSet::from([self.row_statement.clone()]);
        ids.extend(self.number_statement.iter().map(|s| s.id.clone()));
        ids.extend(self.label_statement.iter().map(|s| s.id.clone()));
        ids
    }
}

/// The columns and rows of one table, in position order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableGraph {
    pub columns: Vec<ColumnGraph>,
    pub rows: Vec<RowGraph>,
}

impl TableGraph {
    /// Rebuild the views from the statements reachable from the table.
    pub fn parse(table_id: &ThingId, statements: &[Statement]) -> Self {
        let index = SubjectIndex::new(statements);

        let mut columns: Vec<ColumnGraph> = index
            .find_all(table_id, predicates::CSVW_COLUMNS)
            .map(|statement| {
                let column_id = statement.object.id();
                ColumnGraph {
                    column_id: column_id.clone(),
                    column_statement: statement.id.clone(),
                    number_statement: index.find(column_id, predicates::CSVW_NUMBER).cloned(),
                    title_statement: index.find(column_id, predicates::CSVW_TITLES).cloned(),
                }
            })
            .collect();
        for column in columns.iter().filter(|c| c.number().is_none()) {
            warn!(column = %column.column_id, "column has no position, keeping it last");
        }
        columns.sort_by_key(|c| position_key(c.number()));

        let column_slots: HashMap<&ThingId, usize> = columns
            .iter()
            .enumerate()
            .map(|(i, c)| (&c.column_id, i))
            .collect();

        let mut rows: Vec<RowGraph> = index
            .find_all(table_id, predicates::CSVW_ROWS)
            .map(|statement| {
                let row_id = statement.object.id();
                let (cells, stray_cells) = place_cells(&index, row_id, &column_slots);
                RowGraph {
                    row_id: row_id.clone(),
                    row_statement: statement.id.clone(),
                    number_statement: index.find(row_id, predicates::CSVW_NUMBER).cloned(),
                    label_statement: index.find(row_id, predicates::CSVW_TITLES).cloned(),
                    cells,
                    stray_cells,
                }
            })
            .collect();
        for row in rows.iter().filter(|r| r.number().is_none()) {
            warn!(row = %row.row_id, "row has no position, keeping it last");
        }
        rows.sort_by_key(|r| position_key(r.number()));

        Self { columns, rows }
    }

    pub fn column_ids(&self) -> Vec<ThingId> {
        self.columns.iter().map(|c| c.column_id.clone()).collect()
    }

    pub fn row_ids(&self) -> Vec<ThingId> {
        self.rows.iter().map(|r| r.row_id.clone()).collect()
    }
}

/// Statements grouped by subject, in their original order.
struct SubjectIndex<'a> {
    by_subject: HashMap<&'a ThingId, Vec<&'a Statement>>,
}

impl<'a> SubjectIndex<'a> {
    fn new(statements: &'a [Statement]) -> Self {
        let mut by_subject: HashMap<&ThingId, Vec<&Statement>> = HashMap::new();
        for statement in statements {
            by_subject
                .entry(statement.subject.id())
                .or_default()
                .push(statement);
        }
        Self { by_subject }
    }

    fn find_all<'s>(
        &'s self,
        subject: &ThingId,
        predicate: &'static str,
    ) -> impl Iterator<Item = &'a Statement> + 's {
        self.by_subject
            .get(subject)
            .into_iter()
            .flat_map(|statements| statements.iter().copied())
            .filter(move |s| s.has_predicate(predicate))
    }

    fn find(&self, subject: &ThingId, predicate: &'static str) -> Option<&'a Statement> {
        self.find_all(subject, predicate).next()
    }
}

fn place_cells(
    index: &SubjectIndex<'_>,
    row_id: &ThingId,
    column_slots: &HashMap<&ThingId, usize>,
) -> (Vec<Option<CellGraph>>, Vec<CellGraph>) {
    let mut cells: Vec<Option<CellGraph>> = vec![None; column_slots.len()];
    let mut stray_cells = Vec::new();

    for statement in index.find_all(row_id, predicates::CSVW_CELLS) {
        let cell_id = statement.object.id();
        let cell = CellGraph {
            cell_id: cell_id.clone(),
            cell_statement: statement.id.clone(),
            column_statement: index.find(cell_id, predicates::CSVW_COLUMN).cloned(),
            value_statement: index.find(cell_id, predicates::CSVW_VALUE).cloned(),
        };

        let slot = cell.column_id().and_then(|id| column_slots.get(id)).copied();
        match slot {
            Some(i) if cells[i].is_none() => cells[i] = Some(cell),
            _ => {
                warn!(row = %row_id, cell = %cell.cell_id, "cell does not belong to a free column");
                stray_cells.push(cell);
            }
        }
    }

    (cells, stray_cells)
}

fn parse_number(statement: Option<&Statement>) -> Option<i64> {
    statement.and_then(|s| s.object.label().trim().parse().ok())
}

/// Numbered entries first, in order; unnumbered ones keep their relative order.
fn position_key(number: Option<i64>) -> (bool, i64) {
    match number {
        Some(n) => (false, n),
        None => (true, 0),
    }
}
