//! Planning a query for aggregate fields and reading the results back.

use pretty_assertions::assert_eq;
use serde_json::json;
use tally::alias::ResponsePath;
use tally::registry::{Field, OrderValue, Registry};
use tally::resolve::{ParsedField, ResolveInfo, Resolver};
use tally::{Catalog, SchemaBuilder};
use tally_core::schema::db::TypeId;
use tally_core::schema::Builder;
use tally_core::Schema;
use tally_sql::{Ident, Select, Serializer};

/// `app.orders(id int4, created_at timestamptz, amount numeric)` with the
/// computed column `app.orders_tax(app.orders)`.
fn make_orders() -> Schema {
    let mut b = Builder::new();
    let orders = b.table("app", "orders");
    b.column(orders, "id", TypeId::INT4);
    b.column(orders, "created_at", TypeId::TIMESTAMPTZ);
    b.column(orders, "amount", TypeId::NUMERIC);
    b.primary_key(orders, "orders_pkey", &["id"]).unwrap();
    b.computed_column(orders, "tax", TypeId::NUMERIC);
    b.build()
}

fn build(schema: &Schema) -> Registry {
    SchemaBuilder::new(schema, &Catalog::builtin())
        .standard_scalars()
        .plugins(tally::default_plugins())
        .build()
        .unwrap()
}

fn sum_field<'a>(registry: &'a Registry, name: &str) -> &'a Field {
    registry
        .object("OrderSumAggregates")
        .and_then(|ty| ty.field(name))
        .unwrap_or_else(|| panic!("no field `OrderSumAggregates.{name}`"))
}

fn order(registry: &Registry, name: &str) -> OrderValue {
    registry
        .enum_type("OrdersOrderBy")
        .and_then(|ty| ty.value(name))
        .cloned()
        .unwrap_or_else(|| panic!("no value `OrdersOrderBy.{name}`"))
}

/// `allOrders { aggregates { sum { ... } } }`
fn sum_path() -> ResponsePath {
    ResponsePath::root()
        .key("allOrders")
        .key("aggregates")
        .key("sum")
}

fn plan(field: &Field, occurrences: &[ParsedField]) -> String {
    let mut select = Select::new(Ident::qualified("app", "orders"));
    let data = field.data.as_ref().unwrap();
    for occurrence in occurrences {
        data.generate(occurrence, &mut select);
    }
    Serializer::postgresql().compile(&select.to_fragment()).0
}

#[test]
fn sibling_occurrences_with_their_own_order() {
    let schema = make_orders();
    let registry = build(&schema);
    let amount = sum_field(&registry, "amount");

    let by_date = ParsedField::new(sum_path().key("byDate"))
        .order_by(vec![order(&registry, "CREATED_AT_ASC")]);
    let by_amount = ParsedField::new(sum_path().key("byAmount"))
        .order_by(vec![order(&registry, "AMOUNT_DESC")]);

    assert_eq!(
        plan(amount, &[by_date.clone(), by_amount.clone()]),
        r#"SELECT coalesce(sum("__local_0__"."amount" ORDER BY "__local_0__"."created_at" ASC NULLS FIRST), 0) AS "@allOrders@aggregates@sum@byDate", coalesce(sum("__local_0__"."amount" ORDER BY "__local_0__"."amount" DESC NULLS LAST), 0) AS "@allOrders@aggregates@sum@byAmount" FROM "app"."orders" AS "__local_0__""#
    );

    let row = json!({
        "@allOrders@aggregates@sum@byDate": "12.50",
        "@allOrders@aggregates@sum@byAmount": "99.00",
    });

    assert_eq!(amount.resolver, Resolver::SafeAlias);
    let info = |field: &ParsedField| ResolveInfo::new(field.path.clone());
    assert_eq!(
        amount.resolver.resolve(&row, &info(&by_date)).unwrap(),
        &json!("12.50")
    );
    assert_eq!(
        amount.resolver.resolve(&row, &info(&by_amount)).unwrap(),
        &json!("99.00")
    );
}

#[test]
fn several_order_values_are_applied_in_order() {
    let schema = make_orders();
    let registry = build(&schema);
    let amount = sum_field(&registry, "amount");

    let field = ParsedField::new(sum_path().key("amount")).order_by(vec![
        order(&registry, "CREATED_AT_DESC"),
        order(&registry, "PRIMARY_KEY_ASC"),
    ]);

    assert_eq!(
        plan(amount, &[field]),
        r#"SELECT coalesce(sum("__local_0__"."amount" ORDER BY "__local_0__"."created_at" DESC NULLS LAST, "__local_0__"."id" ASC), 0) AS "@allOrders@aggregates@sum@amount" FROM "app"."orders" AS "__local_0__""#
    );
}

#[test]
fn natural_order_adds_no_clause() {
    let schema = make_orders();
    let registry = build(&schema);
    let amount = sum_field(&registry, "amount");

    let unordered = ParsedField::new(sum_path().key("amount"));
    let natural =
        ParsedField::new(sum_path().key("natural")).order_by(vec![order(&registry, "NATURAL")]);

    assert_eq!(
        plan(amount, &[unordered, natural]),
        r#"SELECT coalesce(sum("__local_0__"."amount"), 0) AS "@allOrders@aggregates@sum@amount", coalesce(sum("__local_0__"."amount"), 0) AS "@allOrders@aggregates@sum@natural" FROM "app"."orders" AS "__local_0__""#
    );
}

#[test]
fn computed_column_aggregate() {
    let schema = make_orders();
    let registry = build(&schema);
    let tax = sum_field(&registry, "tax");

    let field = ParsedField::new(sum_path().key("tax"));
    assert_eq!(
        plan(tax, &[field]),
        r#"SELECT coalesce(sum("app"."orders_tax"("__local_0__")), 0) AS "@allOrders@aggregates@sum@tax" FROM "app"."orders" AS "__local_0__""#
    );
}

#[test]
fn list_elements_share_one_projection() {
    let schema = make_orders();
    let registry = build(&schema);
    let amount = sum_field(&registry, "amount");

    let groups = ResponsePath::root().key("groupedOrders");
    let planned = ParsedField::new(groups.key("aggregates").key("sum").key("amount"));
    let mut select = Select::new(Ident::qualified("app", "orders"));
    amount.data.as_ref().unwrap().generate(&planned, &mut select);
    assert_eq!(
        select.selections()[0].1,
        "@groupedOrders@aggregates@sum@amount"
    );

    let rows = [json!({ planned.alias(): 1 }), json!({ planned.alias(): 2 })];
    for (index, row) in rows.iter().enumerate() {
        let info = ResolveInfo::new(
            groups
                .index(index)
                .key("aggregates")
                .key("sum")
                .key("amount"),
        );
        assert_eq!(
            amount.resolver.resolve(row, &info).unwrap(),
            &json!(index + 1)
        );
    }
}

#[test]
fn long_response_keys_are_hashed() {
    let schema = make_orders();
    let registry = build(&schema);
    let amount = sum_field(&registry, "amount");

    let field = ParsedField::new(sum_path().key("amountOrderedByTheDateOfCreationDescending"))
        .order_by(vec![order(&registry, "CREATED_AT_DESC")]);
    assert_eq!(field.alias(), "__605d46618e885f7fb73262901fb65bfd");

    let mut select = Select::new(Ident::qualified("app", "orders"));
    amount.data.as_ref().unwrap().generate(&field, &mut select);
    assert!(select.selection(&field.alias()).is_some());

    let row = json!({ field.alias(): "7" });
    let info = ResolveInfo::new(field.path.clone());
    assert_eq!(info.alias(), field.alias());
    assert_eq!(amount.resolver.resolve(&row, &info).unwrap(), &json!("7"));
}

#[test]
fn aggregate_type_fields_pass_through() {
    let schema = make_orders();
    let registry = build(&schema);
    let container = registry.object("OrderAggregates").unwrap();

    let row = json!({ "keys": ["2026"], "@allOrders@aggregates@sum@amount": "3" });
    let info = ResolveInfo::new(ResponsePath::root().key("allOrders").key("aggregates"));

    let sum = container.field("sum").unwrap();
    assert!(std::ptr::eq(
        sum.resolver.resolve(&row, &info).unwrap(),
        &row
    ));

    let keys = container.field("keys").unwrap();
    assert_eq!(keys.resolver.resolve(&row, &info).unwrap(), &json!(["2026"]));
}

#[test]
fn missing_projection_is_reported() {
    let schema = make_orders();
    let registry = build(&schema);
    let amount = sum_field(&registry, "amount");

    let info = ResolveInfo::new(sum_path().key("amount"));
    let err = amount.resolver.resolve(&json!({}), &info).unwrap_err();
    assert!(err.is_invalid_result());
}
