use crate::build::{Build, FieldsContext, Hook, Hooks};
use crate::registry::{extend, Arg, Field, FieldScope, Fields, ObjectType, Scope};
use crate::resolve::{DataGenerator, Resolver};
use crate::types::TypeRef;
use crate::AggregateSpec;

use tally_core::schema::db::Table;
use tally_core::schema::Entity;
use tally_core::{Error, Result};
use tally_sql::Ident;
use tracing::{debug, instrument};

use std::sync::Arc;

/// Adds an `<Table>Aggregates` container type for every aggregable table,
/// with one field per aggregate spec that applies to at least one of the
/// table's columns or computed columns.
///
/// The container also exposes `keys: [JSON]`, so the `JSON` scalar must be
/// registered before the build starts.
pub fn aggregate_types(hooks: &mut Hooks) {
    hooks
        .hook(Hook::Init(register_containers))
        .hook(Hook::ObjectFields(add_aggregate_types))
        .hook(Hook::ObjectFields(add_aggregate_fields));
}

#[instrument(name = "tally::aggregate_types::containers", level = "debug", skip_all)]
fn register_containers(build: &mut Build<'_>) -> Result<()> {
    let schema = build.schema;

    for table in &schema.tables {
        if let Some(reason) = skip_reason(build, table) {
            debug!(table = %table.qualified_name(), reason, "no aggregates");
            continue;
        }

        let Some(json) = build.registry.scalar("JSON").map(|ty| ty.name.clone()) else {
            return Err(Error::invalid_schema("JSON scalar type is missing").context(
                format!("building aggregates for `{}`", table.qualified_name()),
            ));
        };

        let mut container = ObjectType::new(
            build.inflection.aggregate_container_type(table),
            Scope::AggregateContainer { table: table.id },
        );
        container.fields.insert(
            "keys".to_string(),
            Field::new("keys", TypeRef::named(json).list(), Resolver::Keys),
        );

        build.new_with_hooks(container, false)?;
    }

    Ok(())
}

fn skip_reason(build: &Build<'_>, table: &Table) -> Option<&'static str> {
    if table.namespace.is_none() {
        Some("no namespace")
    } else if !build.is_readable(Entity::Table(table)) {
        Some("not readable")
    } else if table.is_enum {
        Some("enum-backed")
    } else if !table.is_selectable {
        Some("not selectable")
    } else if !has_members(build, table) {
        Some("no columns or computed columns")
    } else {
        None
    }
}

fn has_members(build: &Build<'_>, table: &Table) -> bool {
    let has_column = table
        .columns
        .iter()
        .any(|column| build.is_readable(Entity::Column(column)));

    has_column
        || build.schema.procedures.iter().any(|procedure| {
            !procedure.returns_set
                && build.is_readable(Entity::Procedure(procedure))
                && build.computed_columns.details(table, procedure).is_some()
        })
}

#[instrument(name = "tally::aggregate_types::container_fields", level = "debug", skip_all, fields(
    type_name = %cx.type_name
))]
fn add_aggregate_types(
    fields: Fields,
    build: &mut Build<'_>,
    cx: &FieldsContext,
) -> Result<Fields> {
    let Scope::AggregateContainer { table } = cx.scope else {
        return Ok(fields);
    };

    let schema = build.schema;
    let catalog = build.catalog;
    let table = schema.table(table);

    let mut memo = Fields::new();

    for spec in catalog.iter() {
        let ty = ObjectType::new(
            build.inflection.aggregate_type(table, spec),
            Scope::AggregateType {
                table: table.id,
                spec: spec.clone(),
            },
        );

        let Some(type_name) = build.new_with_hooks(ty, true)? else {
            debug!(spec = %spec.id, "nothing to aggregate");
            continue;
        };

        let name = build.inflection.aggregates_field(spec);
        let field = Field::new(&name, TypeRef::named(type_name), Resolver::PassThrough)
            .description(format!(
                "{} aggregates across the matching connection (ignoring before/after/first/last/offset)",
                spec.human_label
            ))
            .scope(FieldScope::Aggregate {
                table: table.id,
                spec: spec.clone(),
            });

        memo = extend(
            memo,
            Fields::from([(name, field)]),
            &format!("Adding {} aggregates to '{}'", spec.id, table.qualified_name()),
        )?;
    }

    extend(
        fields,
        memo,
        &format!("Adding aggregate types to '{}'", table.qualified_name()),
    )
}

#[instrument(name = "tally::aggregate_types::aggregate_fields", level = "debug", skip_all, fields(
    type_name = %cx.type_name
))]
fn add_aggregate_fields(
    fields: Fields,
    build: &mut Build<'_>,
    cx: &FieldsContext,
) -> Result<Fields> {
    let Scope::AggregateType { table, spec } = &cx.scope else {
        return Ok(fields);
    };

    let table = build.schema.table(*table);

    let columns = column_fields(build, table, spec)?;
    let fields = extend(
        fields,
        columns,
        &format!("Adding {} column aggregates to '{}'", spec.id, table.qualified_name()),
    )?;

    let computed = computed_column_fields(build, table, spec)?;
    extend(
        fields,
        computed,
        &format!(
            "Adding {} computed column aggregates to '{}'",
            spec.id,
            table.qualified_name()
        ),
    )
}

fn column_fields(build: &Build<'_>, table: &Table, spec: &Arc<AggregateSpec>) -> Result<Fields> {
    let table_type = build.inflection.table_type(table);

    // The table's row ordering, when it has one, orders the rows fed into
    // the reduction.
    let order_by = Some(build.inflection.order_by_type(&table_type))
        .filter(|_| build.options.aggregate_order_by)
        .filter(|name| build.registry.enum_type(name).is_some());

    let mut memo = Fields::new();

    for column in &table.columns {
        let entity = Entity::Column(column);
        if !build.is_readable(entity) {
            continue;
        }

        let Some(ty) = build.schema.ty(column.ty) else {
            debug!(column = %column.name, "unknown column type");
            continue;
        };

        if !spec.accepts(entity, ty) {
            continue;
        }

        let (result_type, type_modifier) = spec.output_type(ty, column.type_modifier);
        let Some(output) = build.types.output_type(result_type, type_modifier) else {
            debug!(column = %column.name, spec = %spec.id, "no output type");
            continue;
        };

        let name = build.inflection.column(column);
        let mut field = Field::new(&name, nullability(spec, output), Resolver::SafeAlias)
            .description(format!(
                "{} of {name} across the matching connection",
                spec.human_label
            ))
            .data(DataGenerator::ColumnAggregate {
                spec: spec.clone(),
                column: column.name.clone(),
            })
            .scope(FieldScope::ColumnAggregate {
                column: column.id,
                ty: result_type,
                type_modifier,
            });

        if let Some(order_by) = &order_by {
            field = field.arg(
                "orderBy",
                Arg {
                    ty: TypeRef::named(order_by).non_null().list(),
                    description: Some(format!(
                        "The method to use when ordering `{table_type}` for aggregate {} (if sensible).",
                        spec.human_label
                    )),
                },
            );
        }

        memo = extend(
            memo,
            Fields::from([(name, field)]),
            &format!(
                "Adding {} of '{}' to '{}'",
                spec.id,
                column.name,
                table.qualified_name()
            ),
        )?;
    }

    Ok(memo)
}

fn computed_column_fields(
    build: &Build<'_>,
    table: &Table,
    spec: &Arc<AggregateSpec>,
) -> Result<Fields> {
    let mut memo = Fields::new();

    for procedure in &build.schema.procedures {
        if procedure.returns_set {
            continue;
        }

        let entity = Entity::Procedure(procedure);
        if !build.is_readable(entity) {
            continue;
        }

        let Some(ty) = build.schema.ty(procedure.return_type) else {
            continue;
        };

        if !spec.accepts(entity, ty) {
            continue;
        }

        let Some(details) = build.computed_columns.details(table, procedure) else {
            continue;
        };

        let (result_type, type_modifier) = spec.output_type(ty, None);
        let Some(output) = build.types.output_type(result_type, type_modifier) else {
            debug!(procedure = %procedure.name, spec = %spec.id, "no output type");
            continue;
        };

        let name = build
            .inflection
            .computed_column(&details.pseudo_column_name, procedure, table);

        let mut description = format!(
            "{} of this field across the matching connection.",
            spec.human_label
        );
        if let Some(own) = &procedure.description {
            description.push_str("\n\n---\n\n");
            description.push_str(own);
        }

        let field = Field::new(&name, nullability(spec, output), Resolver::SafeAlias)
            .description(description)
            .data(DataGenerator::ProcedureAggregate {
                spec: spec.clone(),
                procedure: Ident::qualified(&procedure.namespace, &procedure.name),
            })
            .scope(FieldScope::ComputedColumnAggregate {
                procedure: procedure.id,
            });

        memo = extend(
            memo,
            Fields::from([(name, field)]),
            &format!(
                "Adding {} of computed column '{}' to '{}'",
                spec.id,
                procedure.name,
                table.qualified_name()
            ),
        )?;
    }

    Ok(memo)
}

fn nullability(spec: &AggregateSpec, ty: TypeRef) -> TypeRef {
    if spec.is_non_null {
        ty.non_null()
    } else {
        ty
    }
}
