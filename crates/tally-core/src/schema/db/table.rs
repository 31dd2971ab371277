use super::{Column, ColumnId, ConstraintId, TypeId};

use std::fmt;

/// A database table (or other selectable relation)
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Uniquely identifies a table
    pub id: TableId,

    /// Schema (namespace) the table lives in. Relations outside any
    /// namespace are never exposed.
    pub namespace: Option<String>,

    /// Name of the table
    pub name: String,

    /// The table's columns
    pub columns: Vec<Column>,

    /// Constraints declared on this table
    pub constraints: Vec<ConstraintId>,

    /// The composite type of the table's rows
    pub row_type: Option<TypeId>,

    /// True when the table backs an enum (lookup table)
    pub is_enum: bool,

    /// False for relations that cannot be read with `SELECT`
    pub is_selectable: bool,

    pub description: Option<String>,
}

/// Uniquely identifies a table
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct TableId(pub usize);

impl Table {
    pub fn column(&self, id: impl Into<ColumnId>) -> &Column {
        &self.columns[id.into().index]
    }

    pub fn column_by_name(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    /// `namespace.name`, for diagnostics.
    pub fn qualified_name(&self) -> String {
        match &self.namespace {
            Some(namespace) => format!("{namespace}.{}", self.name),
            None => self.name.clone(),
        }
    }

    pub(crate) fn new(id: TableId, namespace: Option<String>, name: String) -> Self {
        Self {
            id,
            namespace,
            name,
            columns: vec![],
            constraints: vec![],
            row_type: None,
            is_enum: false,
            is_selectable: true,
            description: None,
        }
    }
}

impl fmt::Debug for TableId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "TableId({})", self.0)
    }
}
