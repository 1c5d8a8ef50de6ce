//! Well-known predicate, class and datatype identifiers.
//!
//! Tables follow the CSV on the Web vocabulary: a table links to its
//! columns and rows, a row links to its cells, a cell links to its column
//! and its value.

use crate::ThingId;

/// Predicate identifiers used to encode structured content.
pub mod predicates {
    /// Table -> Column.
    pub const CSVW_COLUMNS: &str = "CSVW_Columns";
    /// Table -> Row.
    pub const CSVW_ROWS: &str = "CSVW_Rows";
    /// Row -> Cell.
    pub const CSVW_CELLS: &str = "CSVW_Cells";
    /// Cell -> Column.
    pub const CSVW_COLUMN: &str = "CSVW_Column";
    /// Cell -> value thing.
    pub const CSVW_VALUE: &str = "CSVW_Value";
    /// Column/Row -> 1-based position literal.
    pub const CSVW_NUMBER: &str = "CSVW_Number";
    /// Column -> title literal, Row -> label literal.
    pub const CSVW_TITLES: &str = "CSVW_Titles";
    /// List -> element.
    pub const HAS_LIST_ELEMENT: &str = "hasListElement";
    /// Predicate -> description literal.
    pub const DESCRIPTION: &str = "description";

    /// All predicates the engine relies on.
    pub const ALL: &[&str] = &[
        CSVW_COLUMNS,
        CSVW_ROWS,
        CSVW_CELLS,
        CSVW_COLUMN,
        CSVW_VALUE,
        CSVW_NUMBER,
        CSVW_TITLES,
        HAS_LIST_ELEMENT,
        DESCRIPTION,
    ];
}

/// Class identifiers used to tag structural resources.
pub mod classes {
    pub const TABLE: &str = "Table";
    pub const COLUMN: &str = "Column";
    pub const ROW: &str = "Row";
    pub const CELL: &str = "Cell";
    pub const LIST: &str = "List";

    /// Classes a client may never assign to a resource it defines.
    pub const RESERVED: &[&str] = &[TABLE, COLUMN, ROW, CELL, LIST];

    /// All classes the engine relies on.
    pub const ALL: &[&str] = RESERVED;
}

/// Literal datatypes.
pub mod datatypes {
    pub const XSD_STRING: &str = "xsd:string";
    pub const XSD_INTEGER: &str = "xsd:integer";
    pub const XSD_DECIMAL: &str = "xsd:decimal";
    pub const XSD_FLOAT: &str = "xsd:float";
    pub const XSD_BOOLEAN: &str = "xsd:boolean";
}

/// Build a ThingId for a well-known identifier.
pub fn thing_id(id: &str) -> ThingId {
    ThingId::new(id)
}

/// Returns true if the class may not be assigned by clients.
pub fn is_reserved_class(id: &ThingId) -> bool {
    classes::RESERVED.contains(&id.as_str())
}
