use super::{
    Column, ColumnId, Constraint, ConstraintId, Procedure, ProcedureId, Table, TableId, Type,
    TypeId,
};

use crate::{Error, Result};

use indexmap::IndexMap;

/// Introspected database metadata.
#[derive(Debug, Default, Clone)]
pub struct Schema {
    pub tables: Vec<Table>,

    pub constraints: Vec<Constraint>,

    pub procedures: Vec<Procedure>,

    pub types: IndexMap<TypeId, Type>,
}

impl Schema {
    pub fn table(&self, id: impl Into<TableId>) -> &Table {
        self.tables.get(id.into().0).expect("invalid table ID")
    }

    pub fn try_table(&self, id: impl Into<TableId>) -> Option<&Table> {
        self.tables.get(id.into().0)
    }

    pub fn table_by_name(&self, namespace: &str, name: &str) -> Option<&Table> {
        self.tables
            .iter()
            .find(|table| table.namespace.as_deref() == Some(namespace) && table.name == name)
    }

    pub fn column(&self, id: impl Into<ColumnId>) -> &Column {
        self.try_column(id).expect("invalid column ID")
    }

    pub fn try_column(&self, id: impl Into<ColumnId>) -> Option<&Column> {
        let id = id.into();
        self.try_table(id.table)?.columns.get(id.index)
    }

    pub fn constraint(&self, id: ConstraintId) -> &Constraint {
        self.constraints.get(id.0).expect("invalid constraint ID")
    }

    pub fn procedure(&self, id: ProcedureId) -> &Procedure {
        self.procedures.get(id.0).expect("invalid procedure ID")
    }

    pub fn ty(&self, id: TypeId) -> Option<&Type> {
        self.types.get(&id)
    }

    /// Constraints declared on `table`, in declaration order.
    ///
    /// A table listing a constraint the schema does not hold is
    /// `invalid_schema`. An unknown table has no constraints.
    pub fn constraints_on(&self, table: TableId) -> Result<Vec<&Constraint>> {
        let Some(table) = self.try_table(table) else {
            return Ok(vec![]);
        };

        table
            .constraints
            .iter()
            .map(|id| {
                self.constraints.get(id.0).ok_or_else(|| {
                    Error::invalid_schema(format!(
                        "table `{}` lists unknown constraint {id:?}",
                        table.qualified_name()
                    ))
                })
            })
            .collect()
    }

    /// Foreign keys declared on other tables that reference `table`.
    pub fn foreign_constraints(&self, table: TableId) -> impl Iterator<Item = &Constraint> + '_ {
        self.constraints
            .iter()
            .filter(move |constraint| {
                constraint.is_foreign_key() && constraint.foreign_table == Some(table)
            })
    }
}
