use super::TypeId;

use std::fmt;

/// A server-side function. Functions whose first argument is a table's row
/// type may be exposed as computed columns of that table.
#[derive(Debug, Clone, PartialEq)]
pub struct Procedure {
    pub id: ProcedureId,

    pub namespace: String,

    pub name: String,

    pub arg_types: Vec<TypeId>,

    pub return_type: TypeId,

    /// `true` for `RETURNS SETOF ...` functions
    pub returns_set: bool,

    pub description: Option<String>,
}

#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct ProcedureId(pub usize);

impl fmt::Debug for ProcedureId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "ProcedureId({})", self.0)
    }
}
