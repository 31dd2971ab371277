//! What generated fields do at request time.
//!
//! A [`DataGenerator`] runs while the request's query is planned and adds
//! the field's projection under its alias. The field's [`Resolver`] later
//! reads that value back from the parent row. Neither keeps any state of
//! its own: the query builder belongs to the request being planned and the
//! row belongs to the request being resolved.

use crate::alias::{safe_alias, ResponsePath};
use crate::registry::OrderValue;
use crate::AggregateSpec;

use serde_json::Value;
use tally_core::{Error, Result};
use tally_sql::{sql, Ident, OrderSpecs, QueryBuilder};

use std::sync::Arc;

static NO_KEYS: Value = Value::Array(Vec::new());

/// How a generated field produces its value from its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolver {
    /// The parent itself (the container's aggregate type fields)
    PassThrough,

    /// The parent's value under the field's alias
    SafeAlias,

    /// The parent's `keys`, or an empty list
    Keys,
}

/// The field occurrence being resolved.
///
/// Built once per occurrence and reused for every parent row, so reading a
/// value is a plain lookup.
#[derive(Debug, Clone)]
pub struct ResolveInfo {
    path: ResponsePath,

    alias: String,
}

/// A field occurrence as seen while planning the query.
#[derive(Debug, Clone)]
pub struct ParsedField {
    pub path: ResponsePath,

    pub args: FieldArgs,
}

/// Arguments of an aggregate field occurrence.
#[derive(Debug, Clone, Default)]
pub struct FieldArgs {
    /// Values of the `orderBy` argument, already mapped from enum names
    pub order_by: Option<Vec<OrderValue>>,
}

/// Adds an aggregate field's projection to the query being planned.
#[derive(Debug, Clone)]
pub enum DataGenerator {
    /// `wrap(<alias>."column" [ORDER BY ...])`
    ColumnAggregate {
        spec: Arc<AggregateSpec>,
        column: String,
    },

    /// `wrap("namespace"."procedure"(<alias>))`
    ProcedureAggregate {
        spec: Arc<AggregateSpec>,
        procedure: Ident,
    },
}

impl Resolver {
    pub fn resolve<'a>(&self, parent: &'a Value, info: &ResolveInfo) -> Result<&'a Value> {
        match self {
            Resolver::PassThrough => Ok(parent),
            Resolver::SafeAlias => {
                parent.get(info.alias()).ok_or_else(|| {
                    Error::invalid_result(format!(
                        "parent row has no value under alias `{}`",
                        info.alias()
                    ))
                })
            }
            Resolver::Keys => Ok(parent
                .get("keys")
                .filter(|keys| !keys.is_null())
                .unwrap_or(&NO_KEYS)),
        }
    }
}

impl ResolveInfo {
    pub fn new(path: ResponsePath) -> ResolveInfo {
        let alias = safe_alias(&path);
        ResolveInfo { path, alias }
    }

    pub fn path(&self) -> &ResponsePath {
        &self.path
    }

    /// The alias the field's projection was selected under.
    pub fn alias(&self) -> &str {
        &self.alias
    }
}

impl ParsedField {
    pub fn new(path: ResponsePath) -> ParsedField {
        ParsedField {
            path,
            args: FieldArgs::default(),
        }
    }

    pub fn order_by(mut self, values: Vec<OrderValue>) -> Self {
        self.args.order_by = Some(values);
        self
    }

    pub fn alias(&self) -> String {
        safe_alias(&self.path)
    }
}

impl DataGenerator {
    pub fn spec(&self) -> &Arc<AggregateSpec> {
        match self {
            DataGenerator::ColumnAggregate { spec, .. } => spec,
            DataGenerator::ProcedureAggregate { spec, .. } => spec,
        }
    }

    /// Adds the projection for `field` to `query`.
    pub fn generate(&self, field: &ParsedField, query: &mut dyn QueryBuilder) {
        let expr = match self {
            DataGenerator::ColumnAggregate { spec, column } => {
                let specs = field
                    .args
                    .order_by
                    .iter()
                    .flatten()
                    .flat_map(|value| value.specs.iter());
                let column = sql![query.table_alias(), ".", Ident::new(column)];

                let input = match OrderSpecs::order_by_clause(specs, &*query) {
                    Some(order_by) => sql![column, " ", order_by],
                    None => column,
                };
                spec.wrap(input)
            }
            DataGenerator::ProcedureAggregate { spec, procedure } => {
                spec.wrap(sql![procedure.clone(), "(", query.table_alias(), ")"])
            }
        };

        query.select(expr, &field.alias());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn info(path: &[&str]) -> ResolveInfo {
        let path = path
            .iter()
            .fold(ResponsePath::root(), |path, key| path.key(*key));
        ResolveInfo::new(path)
    }

    #[test]
    fn safe_alias_reads_own_value() {
        let parent = json!({ "@a@sum": 10, "@b@sum": 20 });

        let a = Resolver::SafeAlias.resolve(&parent, &info(&["a", "sum"])).unwrap();
        let b = Resolver::SafeAlias.resolve(&parent, &info(&["b", "sum"])).unwrap();
        assert_eq!(a, &json!(10));
        assert_eq!(b, &json!(20));
    }

    #[test]
    fn alias_is_derived_once() {
        let info = info(&["allOrders", "aggregates", "sum", "amount"]);
        assert_eq!(info.alias(), "@allOrders@aggregates@sum@amount");
        assert_eq!(info.alias(), safe_alias(info.path()));

        for total in [1, 2, 3] {
            let parent = json!({ "@allOrders@aggregates@sum@amount": total });
            let value = Resolver::SafeAlias.resolve(&parent, &info).unwrap();
            assert_eq!(value, &json!(total));
        }
    }

    #[test]
    fn missing_alias_is_invalid_result() {
        let parent = json!({});
        let err = Resolver::SafeAlias
            .resolve(&parent, &info(&["a", "sum"]))
            .unwrap_err();
        assert!(err.is_invalid_result());
        assert_eq!(
            err.to_string(),
            "invalid result: parent row has no value under alias `@a@sum`"
        );
    }

    #[test]
    fn keys_default_to_empty() {
        let with_keys = json!({ "keys": [1, "a"] });
        let null_keys = json!({ "keys": null });
        let no_keys = json!({});

        assert_eq!(
            Resolver::Keys.resolve(&with_keys, &info(&[])).unwrap(),
            &json!([1, "a"])
        );
        assert_eq!(Resolver::Keys.resolve(&null_keys, &info(&[])).unwrap(), &json!([]));
        assert_eq!(Resolver::Keys.resolve(&no_keys, &info(&[])).unwrap(), &json!([]));
    }

    #[test]
    fn pass_through() {
        let parent = json!({ "x": 1 });
        let resolved = Resolver::PassThrough.resolve(&parent, &info(&["sum"])).unwrap();
        assert!(std::ptr::eq(resolved, &parent));
    }
}
