use pretty_assertions::assert_eq;
use tally_sql::{
    sql, Ident, OrderIdentity, OrderSpec, OrderSpecs, QueryBuilder, Select, Serializer,
};

fn render(select: &Select) -> String {
    Serializer::postgresql().compile(&select.to_fragment()).0
}

#[test]
fn projections_are_aliased() {
    let mut select = Select::new(Ident::qualified("app", "orders"));
    let amount = sql!["sum(", select.table_alias(), ".", Ident::new("amount"), ")"];
    select.select(amount, "@aggregates@sum@amount");

    assert_eq!(
        render(&select),
        r#"SELECT sum("__local_0__"."amount") AS "@aggregates@sum@amount" FROM "app"."orders" AS "__local_0__""#
    );
    assert!(select.selection("@aggregates@sum@amount").is_some());
    assert!(select.selection("@other").is_none());
}

#[test]
fn empty_projection_selects_all() {
    let select = Select::new(Ident::new("orders"));
    assert_eq!(
        render(&select),
        r#"SELECT * FROM "orders" AS "__local_0__""#
    );
}

#[test]
fn filters_are_conjoined() {
    let mut select = Select::new(Ident::new("orders"));
    let alias = select.table_alias();
    select.filter(sql![&alias, ".", Ident::new("status"), " = 'open'"]);
    select.filter(sql![&alias, ".", Ident::new("amount"), " > 0"]);

    assert_eq!(
        render(&select),
        r#"SELECT * FROM "orders" AS "__local_0__" WHERE ("__local_0__"."status" = 'open') AND ("__local_0__"."amount" > 0)"#
    );
}

#[test]
fn order_specs_in_list_order() {
    let mut select = Select::new(Ident::new("orders"));
    select.order_by(&OrderSpecs::List(vec![
        OrderSpec::new(OrderIdentity::Column("status".into()), true, None),
        OrderSpec::new(OrderIdentity::Column("amount".into()), false, Some(false)),
    ]));
    select.order_by(&OrderSpecs::Single(OrderSpec::new(
        OrderIdentity::func(|query: &dyn QueryBuilder| {
            sql!["length(", query.table_alias(), ".", Ident::new("note"), ")"]
        }),
        true,
        Some(true),
    )));

    assert_eq!(
        render(&select),
        r#"SELECT * FROM "orders" AS "__local_0__" ORDER BY "__local_0__"."status" ASC, "__local_0__"."amount" DESC NULLS LAST, length("__local_0__"."note") ASC NULLS FIRST"#
    );
}

#[test]
fn no_specs_no_clause() {
    let select = Select::new(Ident::new("orders"));
    assert!(OrderSpecs::order_by_clause(&OrderSpecs::List(vec![]), &select).is_none());
}
