//! Names for everything the plugins generate.
//!
//! Every generated name is a pure function of metadata and spec ids. Two
//! distinct inputs must never map to the same name within one schema; the
//! registry turns any collision into an error rather than overwriting.

use crate::AggregateSpec;

use heck::{ToLowerCamelCase, ToShoutySnakeCase, ToUpperCamelCase};
use tally_core::schema::db::{Column, Constraint, Procedure, Table};

pub trait Inflector {
    /// Name of the object type for one row of `table` (`Order`)
    fn table_type(&self, table: &Table) -> String;

    /// `OrderAggregates`
    fn aggregate_container_type(&self, table: &Table) -> String;

    /// `OrderSumAggregates`
    fn aggregate_type(&self, table: &Table, spec: &AggregateSpec) -> String;

    /// Field on the container exposing one aggregate type (`sum`)
    fn aggregates_field(&self, spec: &AggregateSpec) -> String;

    fn column(&self, column: &Column) -> String;

    fn computed_column(&self, pseudo_column_name: &str, procedure: &Procedure, table: &Table)
        -> String;

    /// Row-ordering enum for a table type (`OrdersOrderBy`)
    fn order_by_type(&self, table_type: &str) -> String;

    /// Base name of the ordering values for one column (`AMOUNT`)
    fn order_by_column(&self, column: &Column) -> String;

    /// `ordersByCustomerId`
    fn many_relation_by_keys(
        &self,
        keys: &[&Column],
        table: &Table,
        foreign_table: &Table,
        constraint: &Constraint,
    ) -> String;

    /// `ORDERS_BY_CUSTOMER_ID_COUNT`
    fn order_by_count_of_many_relation_by_keys(
        &self,
        keys: &[&Column],
        table: &Table,
        foreign_table: &Table,
        constraint: &Constraint,
    ) -> String {
        format!(
            "{}-count",
            self.many_relation_by_keys(keys, table, foreign_table, constraint)
        )
        .to_shouty_snake_case()
    }

    /// `ORDERS_BY_CUSTOMER_ID_SUM_AMOUNT`
    fn order_by_column_aggregate_of_many_relation_by_keys(
        &self,
        keys: &[&Column],
        table: &Table,
        foreign_table: &Table,
        constraint: &Constraint,
        spec: &AggregateSpec,
        column: &Column,
    ) -> String {
        format!(
            "{}-{}-{}",
            self.many_relation_by_keys(keys, table, foreign_table, constraint),
            spec.id,
            column.name
        )
        .to_shouty_snake_case()
    }
}

/// Default naming: singular upper camel case types, lower camel case
/// fields, shouty snake case enum values.
#[derive(Debug, Default, Clone, Copy)]
pub struct Inflection;

impl Inflection {
    pub fn pluralize(word: &str) -> String {
        pluralizer::pluralize(word, 2, false)
    }

    pub fn singularize(word: &str) -> String {
        pluralizer::pluralize(word, 1, false)
    }
}

impl Inflector for Inflection {
    fn table_type(&self, table: &Table) -> String {
        Self::singularize(&table.name).to_upper_camel_case()
    }

    fn aggregate_container_type(&self, table: &Table) -> String {
        format!("{}Aggregates", self.table_type(table))
    }

    fn aggregate_type(&self, table: &Table, spec: &AggregateSpec) -> String {
        format!(
            "{}{}Aggregates",
            self.table_type(table),
            spec.id.to_upper_camel_case()
        )
    }

    fn aggregates_field(&self, spec: &AggregateSpec) -> String {
        spec.id.to_lower_camel_case()
    }

    fn column(&self, column: &Column) -> String {
        column.name.to_lower_camel_case()
    }

    fn computed_column(&self, pseudo_column_name: &str, _: &Procedure, _: &Table) -> String {
        pseudo_column_name.to_lower_camel_case()
    }

    fn order_by_type(&self, table_type: &str) -> String {
        format!("{}OrderBy", Self::pluralize(table_type).to_upper_camel_case())
    }

    fn order_by_column(&self, column: &Column) -> String {
        column.name.to_shouty_snake_case()
    }

    fn many_relation_by_keys(
        &self,
        keys: &[&Column],
        table: &Table,
        _: &Table,
        _: &Constraint,
    ) -> String {
        let keys: Vec<_> = keys.iter().map(|key| self.column(key)).collect();
        format!(
            "{}-by-{}",
            Self::pluralize(&Self::singularize(&table.name)),
            keys.join("-and-")
        )
        .to_lower_camel_case()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tally_core::schema::db::TypeId;
    use tally_core::schema::Builder;

    fn fixture() -> (tally_core::Schema, Constraint) {
        let mut b = Builder::new();
        let customers = b.table("app", "customers");
        b.column(customers, "id", TypeId::INT4);
        let orders = b.table("app", "order_items");
        b.column(orders, "customer_id", TypeId::INT4);
        b.column(orders, "unit_price", TypeId::NUMERIC);
        let fkey = b
            .foreign_key(orders, "fkey", &["customer_id"], customers, &["id"])
            .unwrap();
        let schema = b.build();
        let constraint = schema.constraint(fkey).clone();
        (schema, constraint)
    }

    #[test]
    fn type_names() {
        let (schema, _) = fixture();
        let items = schema.table_by_name("app", "order_items").unwrap();
        let sum = AggregateSpec::new("sum", "Sum", |expr| expr);
        let distinct = AggregateSpec::new("distinctCount", "Distinct count", |expr| expr);

        assert_eq!(Inflection.table_type(items), "OrderItem");
        assert_eq!(Inflection.aggregate_container_type(items), "OrderItemAggregates");
        assert_eq!(Inflection.aggregate_type(items, &sum), "OrderItemSumAggregates");
        assert_eq!(
            Inflection.aggregate_type(items, &distinct),
            "OrderItemDistinctCountAggregates"
        );
        assert_eq!(Inflection.aggregates_field(&distinct), "distinctCount");
        assert_eq!(Inflection.order_by_type("OrderItem"), "OrderItemsOrderBy");
    }

    #[test]
    fn column_names() {
        let (schema, _) = fixture();
        let items = schema.table_by_name("app", "order_items").unwrap();
        let price = items.column_by_name("unit_price").unwrap();

        assert_eq!(Inflection.column(price), "unitPrice");
        assert_eq!(Inflection.order_by_column(price), "UNIT_PRICE");
    }

    #[test]
    fn relation_order_names() {
        let (schema, constraint) = fixture();
        let items = schema.table_by_name("app", "order_items").unwrap();
        let customers = schema.table_by_name("app", "customers").unwrap();
        let key = items.column_by_name("customer_id").unwrap();
        let price = items.column_by_name("unit_price").unwrap();
        let spec = AggregateSpec::new("distinctCount", "Distinct count", |expr| expr);

        assert_eq!(
            Inflection.many_relation_by_keys(&[key], items, customers, &constraint),
            "orderItemsByCustomerId"
        );
        assert_eq!(
            Inflection.order_by_count_of_many_relation_by_keys(
                &[key],
                items,
                customers,
                &constraint
            ),
            "ORDER_ITEMS_BY_CUSTOMER_ID_COUNT"
        );
        assert_eq!(
            Inflection.order_by_column_aggregate_of_many_relation_by_keys(
                &[key],
                items,
                customers,
                &constraint,
                &spec,
                price
            ),
            "ORDER_ITEMS_BY_CUSTOMER_ID_DISTINCT_COUNT_UNIT_PRICE"
        );
    }
}
