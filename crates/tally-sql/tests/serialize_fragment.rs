use pretty_assertions::assert_eq;
use tally_sql::{sql, Fragment, Ident, Serializer, Symbol, Value};

#[test]
fn identifiers_are_quoted() {
    let fragment = sql![
        "SELECT ",
        Ident::new("amount"),
        " FROM ",
        Ident::qualified("app", "orders")
    ];
    let (sql, values) = Serializer::postgresql().compile(&fragment);

    assert_eq!(sql, r#"SELECT "amount" FROM "app"."orders""#);
    assert!(values.is_empty());
}

#[test]
fn embedded_quotes_are_doubled() {
    let fragment = sql![Ident::new(r#"we"ird"#)];
    let (sql, _) = Serializer::postgresql().compile(&fragment);

    assert_eq!(sql, r#""we""ird""#);
}

#[test]
fn symbols_named_by_first_appearance() {
    let outer = Symbol::new("app.customers");
    let inner = Symbol::new("app.orders");

    let fragment = sql![
        &inner,
        ".",
        Ident::new("customer_id"),
        " = ",
        &outer,
        ".",
        Ident::new("id"),
        " AND ",
        &inner,
        ".x"
    ];
    let (sql, _) = Serializer::postgresql().compile(&fragment);

    assert_eq!(
        sql,
        r#""__local_0__"."customer_id" = "__local_1__"."id" AND "__local_0__".x"#
    );
}

#[test]
fn same_hint_distinct_symbols() {
    let a = Symbol::new("app.orders");
    let b = Symbol::new("app.orders");
    let (sql, _) = Serializer::postgresql().compile(&sql![&a, ", ", &b]);

    assert_eq!(sql, r#""__local_0__", "__local_1__""#);
}

#[test]
fn values_are_bound() {
    let fragment = sql![
        "x = ",
        Value::from(42_i64),
        " AND y = ",
        Value::from("hi"),
        " AND z IS ",
        Value::Null
    ];

    let (sql, values) = Serializer::postgresql().compile(&fragment);
    assert_eq!(sql, "x = $1 AND y = $2 AND z IS NULL");
    assert_eq!(values, vec![Value::I64(42), Value::String("hi".into())]);

    let (sql, _) = Serializer::sqlite().compile(&fragment);
    assert_eq!(sql, "x = ?1 AND y = ?2 AND z IS NULL");
}

#[test]
fn join_with_separator() {
    let parts = ["a", "b", "c"].map(|name| Fragment::from(Ident::new(name)));
    let (sql, _) = Serializer::postgresql().compile(&Fragment::join(parts, ", "));

    assert_eq!(sql, r#""a", "b", "c""#);
    assert!(Fragment::join(Vec::new(), ", ").is_empty());
}

#[test]
fn serialization_is_deterministic() {
    let build = || {
        let alias = Symbol::new("t");
        sql!["count(", &alias, ".", Ident::new("id"), ")"]
    };

    let serializer = Serializer::postgresql();
    assert_eq!(
        serializer.compile(&build()).0,
        serializer.compile(&build()).0
    );
}
