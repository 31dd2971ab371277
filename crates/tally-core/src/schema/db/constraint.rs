use super::{ColumnId, TableId};

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub id: ConstraintId,

    /// Constraint name, unique within its table.
    pub name: String,

    pub kind: ConstraintKind,

    /// The table the constraint is declared on. For foreign keys this is the
    /// referencing ("many") side.
    pub table: TableId,

    /// Key columns on `table`, in declaration order.
    pub columns: Vec<ColumnId>,

    /// The referenced table, for foreign keys.
    pub foreign_table: Option<TableId>,

    /// Referenced key columns, positionally paired with `columns`.
    pub foreign_columns: Vec<ColumnId>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    PrimaryKey,
    Unique,
    ForeignKey,
}

#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct ConstraintId(pub usize);

impl Constraint {
    pub fn is_foreign_key(&self) -> bool {
        self.kind == ConstraintKind::ForeignKey
    }

    /// True for primary key and unique constraints.
    pub fn is_unique(&self) -> bool {
        matches!(
            self.kind,
            ConstraintKind::PrimaryKey | ConstraintKind::Unique
        )
    }

    /// Returns `true` if every row matching `columns` is unique because this
    /// constraint's key is a subset of them.
    pub fn covers(&self, columns: &[ColumnId]) -> bool {
        self.is_unique()
            && !self.columns.is_empty()
            && self.columns.iter().all(|column| columns.contains(column))
    }
}

impl fmt::Debug for ConstraintId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "ConstraintId({})", self.0)
    }
}
