use crate::build::{Build, EnumValuesContext, Hook, Hooks};
use crate::registry::{extend, order_by_asc_desc, EnumValues, Scope};

use tally_core::schema::db::{Column, ColumnId, Constraint, Table};
use tally_core::schema::{Entity, Schema};
use tally_core::{Error, Result};
use tally_sql::{sql, Fragment, Ident, OrderIdentity, QueryBuilder, Symbol};
use tracing::{debug, instrument};

/// Extends every row-ordering enum with values that sort by aggregates over
/// the one-to-many relations pointing at the enum's table.
///
/// Each foreign key referencing the table yields `<RELATION>_COUNT_ASC/_DESC`
/// and, per aggregate spec and eligible column of the referencing table,
/// `<RELATION>_<SPEC>_<COLUMN>_ASC/_DESC`. Foreign keys whose columns are
/// unique on the referencing table are one-to-one and yield nothing.
pub fn order_by_aggregates(hooks: &mut Hooks) {
    hooks.hook(Hook::EnumValues(add_aggregate_orders));
}

#[instrument(name = "tally::order_by_aggregates", level = "debug", skip_all, fields(
    type_name = %cx.type_name
))]
fn add_aggregate_orders(
    values: EnumValues,
    build: &mut Build<'_>,
    cx: &EnumValuesContext,
) -> Result<EnumValues> {
    let Scope::RowSortEnum { table } = cx.scope else {
        return Ok(values);
    };

    let schema = build.schema;
    let Some(foreign_table) = schema.try_table(table) else {
        return Ok(values);
    };

    let mut memo = EnumValues::new();
    for constraint in schema.foreign_constraints(foreign_table.id) {
        memo = relation_orders(memo, build, foreign_table, constraint)?;
    }

    extend(
        values,
        memo,
        &format!(
            "Adding aggregate orders to '{}'",
            foreign_table.qualified_name()
        ),
    )
}

/// Ordering values for the relation `constraint` defines from its table to
/// `foreign_table`.
fn relation_orders(
    mut memo: EnumValues,
    build: &Build<'_>,
    foreign_table: &Table,
    constraint: &Constraint,
) -> Result<EnumValues> {
    if !build.is_readable(Entity::Constraint(constraint)) {
        debug!(constraint = %constraint.name, "constraint not readable");
        return Ok(memo);
    }

    let schema = build.schema;
    let Some(table) = schema.try_table(constraint.table) else {
        return Err(Error::invalid_schema(format!(
            "could not find the table referencing `{}` (constraint `{}`)",
            foreign_table.qualified_name(),
            constraint.name
        )));
    };

    let keys = key_columns(schema, &constraint.columns);
    let foreign_keys = key_columns(schema, &constraint.foreign_columns);
    let (Some(keys), Some(foreign_keys)) = (keys, foreign_keys) else {
        return Err(missing_key_columns(constraint));
    };
    if keys.is_empty() || keys.len() != foreign_keys.len() {
        return Err(missing_key_columns(constraint));
    }

    if keys
        .iter()
        .chain(&foreign_keys)
        .any(|column| !build.is_readable(Entity::Column(*column)))
    {
        debug!(constraint = %constraint.name, "key column not readable");
        return Ok(memo);
    }

    if schema
        .constraints_on(table.id)?
        .iter()
        .any(|unique| unique.covers(&constraint.columns))
    {
        debug!(constraint = %constraint.name, "relation is unique");
        return Ok(memo);
    }

    let pairs: Vec<_> = keys
        .iter()
        .zip(&foreign_keys)
        .map(|(key, foreign_key)| (key.name.clone(), foreign_key.name.clone()))
        .collect();

    if build.options.order_by_count {
        let relation = Relation::new(table, foreign_table, &pairs);
        let base = build.inflection.order_by_count_of_many_relation_by_keys(
            &keys,
            table,
            foreign_table,
            constraint,
        );

        memo = extend(
            memo,
            order_by_asc_desc(&base, relation.order_by(Fragment::raw("count(*)")), false, None),
            &format!(
                "Adding orderBy count to '{}' using constraint '{}'",
                foreign_table.qualified_name(),
                constraint.name
            ),
        )?;
    }

    if build.options.order_by_aggregates {
        for spec in build.catalog.iter() {
            for column in &table.columns {
                let entity = Entity::Column(column);
                if !build.is_readable(entity) {
                    continue;
                }

                let Some(ty) = schema.ty(column.ty) else {
                    continue;
                };

                if !spec.accepts(entity, ty) {
                    continue;
                }

                let relation = Relation::new(table, foreign_table, &pairs);
                let select = spec.wrap(sql![&relation.alias, ".", Ident::new(&column.name)]);
                let base = build
                    .inflection
                    .order_by_column_aggregate_of_many_relation_by_keys(
                        &keys,
                        table,
                        foreign_table,
                        constraint,
                        spec,
                        column,
                    );

                memo = extend(
                    memo,
                    order_by_asc_desc(&base, relation.order_by(select), false, None),
                    &format!(
                        "Adding orderBy {} of '{}' to '{}' using constraint '{}'",
                        spec.id,
                        column.name,
                        foreign_table.qualified_name(),
                        constraint.name
                    ),
                )?;
            }
        }
    }

    Ok(memo)
}

fn key_columns<'a>(schema: &'a Schema, ids: &[ColumnId]) -> Option<Vec<&'a Column>> {
    ids.iter().map(|id| schema.try_column(*id)).collect()
}

fn missing_key_columns(constraint: &Constraint) -> Error {
    Error::invalid_schema(format!(
        "could not find the key columns of constraint `{}`",
        constraint.name
    ))
}

/// The rows of a referencing table that belong to the outer query's
/// current row.
#[derive(Debug, Clone)]
struct Relation {
    table: Ident,

    /// Alias of the referencing table inside the subquery. Fresh for every
    /// ordering value.
    alias: Symbol,

    /// `(referencing column, referenced column)` pairs
    keys: Vec<(String, String)>,
}

impl Relation {
    fn new(table: &Table, foreign_table: &Table, keys: &[(String, String)]) -> Relation {
        Relation {
            table: Ident::from(table),
            alias: Symbol::new(foreign_table.qualified_name()),
            keys: keys.to_vec(),
        }
    }

    /// Orders by `(SELECT <select> FROM <table> AS <alias> WHERE ...)`,
    /// correlated with whatever alias the ordered query gives the
    /// referenced table.
    fn order_by(self, select: Fragment) -> OrderIdentity {
        OrderIdentity::func(move |query: &dyn QueryBuilder| self.subquery(&select, query))
    }

    fn subquery(&self, select: &Fragment, query: &dyn QueryBuilder) -> Fragment {
        let outer = query.table_alias();
        let conditions = self.keys.iter().map(|(key, foreign_key)| {
            sql![
                &self.alias,
                ".",
                Ident::new(key),
                " = ",
                &outer,
                ".",
                Ident::new(foreign_key)
            ]
        });

        sql![
            "(SELECT ",
            select,
            " FROM ",
            self.table.clone(),
            " AS ",
            &self.alias,
            " WHERE ",
            Fragment::join(conditions, " AND "),
            ")"
        ]
    }
}
