use super::db::{
    Column, ColumnId, Constraint, ConstraintId, ConstraintKind, Procedure, ProcedureId, Schema,
    Table, TableId, Type, TypeCategory, TypeId,
};
use crate::{Error, Result};

/// First id handed out to types declared through the builder, clear of the
/// built-in type ids.
const FIRST_USER_TYPE: u32 = 100_000;

/// Assembles a metadata [`Schema`] the way an introspection pass would.
///
/// Built-in `pg_catalog` types are registered up front. Every table gets a
/// composite row type so that computed columns can refer to it.
#[derive(Debug)]
pub struct Builder {
    schema: Schema,

    next_type: u32,
}

impl Builder {
    pub fn new() -> Self {
        let mut schema = Schema::default();
        for ty in Type::builtins() {
            schema.types.insert(ty.id, ty);
        }

        Self {
            schema,
            next_type: FIRST_USER_TYPE,
        }
    }

    /// Declares a new type and returns its id.
    pub fn ty(&mut self, namespace: &str, name: &str, category: TypeCategory) -> TypeId {
        let id = TypeId(self.next_type);
        self.next_type += 1;
        self.schema
            .types
            .insert(id, Type::new(id, namespace, name, category));
        id
    }

    /// Declares a table and its row type.
    pub fn table(&mut self, namespace: &str, name: &str) -> TableId {
        let id = TableId(self.schema.tables.len());
        let row_type = self.ty(namespace, name, TypeCategory::Composite);

        let mut table = Table::new(id, Some(namespace.to_string()), name.to_string());
        table.row_type = Some(row_type);
        self.schema.tables.push(table);
        id
    }

    /// Mutable access to a declared table, for flags such as `is_enum`.
    pub fn table_mut(&mut self, id: TableId) -> &mut Table {
        self.schema
            .tables
            .get_mut(id.0)
            .expect("invalid table ID")
    }

    pub fn column(&mut self, table: TableId, name: &str, ty: TypeId) -> ColumnId {
        self.column_with_modifier(table, name, ty, None)
    }

    pub fn column_with_modifier(
        &mut self,
        table: TableId,
        name: &str,
        ty: TypeId,
        type_modifier: Option<i32>,
    ) -> ColumnId {
        let table = self.table_mut(table);
        let id = ColumnId {
            table: table.id,
            index: table.columns.len(),
        };
        table.columns.push(Column {
            id,
            name: name.to_string(),
            ty,
            type_modifier,
            nullable: true,
        });
        id
    }

    pub fn primary_key(
        &mut self,
        table: TableId,
        name: &str,
        columns: &[&str],
    ) -> Result<ConstraintId> {
        let columns = self.resolve_columns(table, columns)?;
        Ok(self.push_constraint(
            name,
            ConstraintKind::PrimaryKey,
            table,
            columns,
            None,
            vec![],
        ))
    }

    pub fn unique(
        &mut self,
        table: TableId,
        name: &str,
        columns: &[&str],
    ) -> Result<ConstraintId> {
        let columns = self.resolve_columns(table, columns)?;
        Ok(self.push_constraint(name, ConstraintKind::Unique, table, columns, None, vec![]))
    }

    /// Declares a foreign key from `table.columns` to
    /// `foreign_table.foreign_columns`.
    pub fn foreign_key(
        &mut self,
        table: TableId,
        name: &str,
        columns: &[&str],
        foreign_table: TableId,
        foreign_columns: &[&str],
    ) -> Result<ConstraintId> {
        if columns.len() != foreign_columns.len() {
            return Err(Error::invalid_schema(format!(
                "foreign key `{name}` pairs {} key columns with {} referenced columns",
                columns.len(),
                foreign_columns.len()
            )));
        }

        let columns = self.resolve_columns(table, columns)?;
        let foreign_columns = self.resolve_columns(foreign_table, foreign_columns)?;

        Ok(self.push_constraint(
            name,
            ConstraintKind::ForeignKey,
            table,
            columns,
            Some(foreign_table),
            foreign_columns,
        ))
    }

    /// Declares a function. Returns the procedure id.
    pub fn procedure(
        &mut self,
        namespace: &str,
        name: &str,
        arg_types: Vec<TypeId>,
        return_type: TypeId,
        returns_set: bool,
    ) -> ProcedureId {
        let id = ProcedureId(self.schema.procedures.len());
        self.schema.procedures.push(Procedure {
            id,
            namespace: namespace.to_string(),
            name: name.to_string(),
            arg_types,
            return_type,
            returns_set,
            description: None,
        });
        id
    }

    /// Declares a computed column `<table>_<name>(<table>)` in the table's
    /// namespace.
    pub fn computed_column(
        &mut self,
        table: TableId,
        name: &str,
        return_type: TypeId,
    ) -> ProcedureId {
        let table = &self.schema.tables[table.0];
        let namespace = table.namespace.clone().unwrap_or_default();
        let function = format!("{}_{name}", table.name);
        let arg_types = table.row_type.into_iter().collect();

        self.procedure(&namespace, &function, arg_types, return_type, false)
    }

    pub fn build(self) -> Schema {
        self.schema
    }

    fn resolve_columns(&self, table: TableId, names: &[&str]) -> Result<Vec<ColumnId>> {
        let Some(table) = self.schema.try_table(table) else {
            return Err(Error::invalid_schema(format!("no table with id {table:?}")));
        };

        names
            .iter()
            .map(|name| {
                table.column_by_name(name).map(|column| column.id).ok_or_else(|| {
                    Error::invalid_schema(format!(
                        "table `{}` has no column `{name}`",
                        table.qualified_name()
                    ))
                })
            })
            .collect()
    }

    fn push_constraint(
        &mut self,
        name: &str,
        kind: ConstraintKind,
        table: TableId,
        columns: Vec<ColumnId>,
        foreign_table: Option<TableId>,
        foreign_columns: Vec<ColumnId>,
    ) -> ConstraintId {
        let id = ConstraintId(self.schema.constraints.len());
        self.schema.constraints.push(Constraint {
            id,
            name: name.to_string(),
            kind,
            table,
            columns,
            foreign_table,
            foreign_columns,
        });
        self.table_mut(table).constraints.push(id);
        id
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}
