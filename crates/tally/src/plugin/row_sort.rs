use crate::build::{Build, Hook, Hooks};
use crate::registry::{
    extend, order_by_asc_desc, EnumType, EnumValue, EnumValues, OrderValue, Scope,
};

use tally_core::schema::db::{ConstraintKind, Table};
use tally_core::schema::Entity;
use tally_core::{Error, Result};
use tally_sql::{OrderIdentity, OrderSpec, OrderSpecs};
use tracing::{debug, instrument};

/// Registers the row-ordering enum of every readable table:
/// `NATURAL`, `<COLUMN>_ASC/_DESC` per readable column, and
/// `PRIMARY_KEY_ASC/_DESC` when the table has a readable primary key.
///
/// The enums are created with hooks, so plugins registered afterwards can
/// add values to them.
pub fn row_sort(hooks: &mut Hooks) {
    hooks.hook(Hook::Init(register_row_sort_enums));
}

#[instrument(name = "tally::row_sort", level = "debug", skip_all)]
fn register_row_sort_enums(build: &mut Build<'_>) -> Result<()> {
    let schema = build.schema;

    for table in &schema.tables {
        if table.namespace.is_none()
            || table.is_enum
            || !table.is_selectable
            || !build.is_readable(Entity::Table(table))
        {
            debug!(table = %table.qualified_name(), "no row ordering");
            continue;
        }

        let table_type = build.inflection.table_type(table);
        let mut ty = EnumType::new(
            build.inflection.order_by_type(&table_type),
            Scope::RowSortEnum { table: table.id },
        );
        ty.description = Some(format!("Methods to use when ordering `{table_type}`."));
        ty.values = column_orders(build, table)?;

        build.new_enum_with_hooks(ty)?;
    }

    Ok(())
}

fn column_orders(build: &Build<'_>, table: &Table) -> Result<EnumValues> {
    let mut values = EnumValues::new();
    values.insert(
        "NATURAL".to_string(),
        EnumValue::new(OrderValue {
            alias: None,
            specs: OrderSpecs::List(vec![]),
            unique: false,
        }),
    );

    for column in &table.columns {
        if !build.is_readable(Entity::Column(column)) {
            continue;
        }

        values = extend(
            values,
            order_by_asc_desc(
                &build.inflection.order_by_column(column),
                OrderIdentity::Column(column.name.clone()),
                false,
                None,
            ),
            &format!(
                "Adding order by '{}' to '{}'",
                column.name,
                table.qualified_name()
            ),
        )?;
    }

    let schema = build.schema;
    let primary_key = schema
        .constraints_on(table.id)?
        .into_iter()
        .find(|constraint| constraint.kind == ConstraintKind::PrimaryKey);

    if let Some(primary_key) = primary_key {
        let columns = primary_key
            .columns
            .iter()
            .map(|id| {
                schema.try_column(*id).ok_or_else(|| {
                    Error::invalid_schema(format!(
                        "could not find the key columns of constraint `{}`",
                        primary_key.name
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        if columns
            .iter()
            .all(|column| build.is_readable(Entity::Column(*column)))
        {
            let value = |ascending: bool| OrderValue {
                alias: None,
                specs: OrderSpecs::List(
                    columns
                        .iter()
                        .map(|column| {
                            OrderSpec::new(
                                OrderIdentity::Column(column.name.clone()),
                                ascending,
                                None,
                            )
                        })
                        .collect(),
                ),
                unique: true,
            };

            let mut primary_key_orders = EnumValues::new();
            primary_key_orders.insert("PRIMARY_KEY_ASC".into(), EnumValue::new(value(true)));
            primary_key_orders.insert("PRIMARY_KEY_DESC".into(), EnumValue::new(value(false)));

            values = extend(
                values,
                primary_key_orders,
                &format!("Adding primary key order to '{}'", table.qualified_name()),
            )?;
        }
    }

    Ok(values)
}
