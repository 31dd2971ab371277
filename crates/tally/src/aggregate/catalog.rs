use super::AggregateSpec;
use crate::Options;

use tally_core::schema::db::{Type, TypeCategory, TypeId};
use tally_core::{Error, Result};
use tally_sql::{sql, Fragment, Ident};

use std::sync::Arc;

/// The aggregate specs in effect for a schema build, in declaration order.
///
/// Declaration order decides the order of the generated aggregate types and
/// ordering values, so two catalogs with the same specs in the same order
/// yield the same schema.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    specs: Vec<Arc<AggregateSpec>>,
}

impl Catalog {
    pub fn new(specs: impl IntoIterator<Item = AggregateSpec>) -> Result<Catalog> {
        let mut catalog = Catalog::default();
        for spec in specs {
            catalog.push(spec)?;
        }
        Ok(catalog)
    }

    /// Every built-in aggregate.
    pub fn builtin() -> Catalog {
        Catalog {
            specs: builtins().into_iter().map(Arc::new).collect(),
        }
    }

    /// The built-ins selected by `options.aggregates` (all of them when
    /// unset), followed by the options' custom aggregates.
    pub fn from_options(options: &Options) -> Result<Catalog> {
        let available = builtins();

        let mut catalog = match &options.aggregates {
            None => Catalog::new(available)?,
            Some(ids) => {
                let mut catalog = Catalog::default();
                for id in ids {
                    let Some(spec) = available.iter().find(|spec| spec.id == *id) else {
                        return Err(Error::invalid_config(format!(
                            "unknown aggregate `{id}`"
                        )));
                    };
                    catalog.push(spec.clone())?;
                }
                catalog
            }
        };

        for custom in &options.custom_aggregates {
            catalog.push(custom.to_spec()?)?;
        }

        Ok(catalog)
    }

    /// Adds a spec. Spec ids must be unique within a catalog.
    pub fn push(&mut self, spec: AggregateSpec) -> Result<()> {
        if self.get(&spec.id).is_some() {
            return Err(Error::invalid_config(format!(
                "aggregate `{}` is declared more than once",
                spec.id
            )));
        }
        self.specs.push(Arc::new(spec));
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Arc<AggregateSpec>> {
        self.specs.iter().find(|spec| spec.id == id)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Arc<AggregateSpec>> + '_ {
        self.specs.iter()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

/// The built-in aggregates: `sum`, `distinctCount`, `min`, `max`,
/// `average`, and the four standard deviation and variance reductions.
pub fn builtins() -> Vec<AggregateSpec> {
    vec![
        AggregateSpec::new("sum", "Sum", |expr| sql!["coalesce(sum(", expr, "), 0)"])
            .suitable_when(Type::is_numeric)
            .map_type(sum_type)
            .non_null(true),
        AggregateSpec::new("distinctCount", "Distinct count", |expr| {
            sql!["count(distinct ", expr, ")"]
        })
        .map_type(|_, _| (TypeId::INT8, None))
        .non_null(true),
        AggregateSpec::new("min", "Minimum", |expr| sql!["min(", expr, ")"])
            .suitable_when(Type::is_numeric),
        AggregateSpec::new("max", "Maximum", |expr| sql!["max(", expr, ")"])
            .suitable_when(Type::is_numeric),
        statistic("average", "Mean average", |expr| sql!["avg(", expr, ")"]),
        statistic("stddevSample", "Sample standard deviation", |expr| {
            sql!["stddev_samp(", expr, ")"]
        }),
        statistic("stddevPopulation", "Population standard deviation", |expr| {
            sql!["stddev_pop(", expr, ")"]
        }),
        statistic("varianceSample", "Sample variance", |expr| {
            sql!["var_samp(", expr, ")"]
        }),
        statistic("variancePopulation", "Population variance", |expr| {
            sql!["var_pop(", expr, ")"]
        }),
    ]
}

/// A numeric reduction whose result is a float for float input and a
/// numeric otherwise.
fn statistic(
    id: &str,
    label: &str,
    wrap: impl Fn(Fragment) -> Fragment + Send + Sync + 'static,
) -> AggregateSpec {
    AggregateSpec::new(id, label, wrap)
        .suitable_when(Type::is_numeric)
        .map_type(|ty, _| match ty.id {
            TypeId::FLOAT4 | TypeId::FLOAT8 => (TypeId::FLOAT8, None),
            _ => (TypeId::NUMERIC, None),
        })
}

fn sum_type(ty: &Type, type_modifier: Option<i32>) -> (TypeId, Option<i32>) {
    match ty.id {
        TypeId::INT2 | TypeId::INT4 => (TypeId::INT8, None),
        TypeId::FLOAT4 | TypeId::FLOAT8 | TypeId::MONEY => (ty.id, type_modifier),
        _ => (TypeId::NUMERIC, None),
    }
}

/// A reduction implemented by a single SQL function, `"function"(expr)`.
/// `schema.function` names are quoted part by part.
pub(crate) fn function_spec(
    id: &str,
    label: &str,
    function: &str,
    categories: Vec<TypeCategory>,
) -> AggregateSpec {
    let function = Ident(function.split('.').map(str::to_string).collect());

    let spec = AggregateSpec::new(id, label, move |expr| {
        sql![function.clone(), "(", expr, ")"]
    });

    if categories.is_empty() {
        spec
    } else {
        spec.suitable_when(move |ty| categories.contains(&ty.category))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tally_sql::Serializer;

    fn ty(id: TypeId, category: TypeCategory) -> Type {
        Type::new(id, "pg_catalog", "t", category)
    }

    fn render(spec: &AggregateSpec) -> String {
        let expr = sql![Ident::new("amount")];
        Serializer::postgresql().compile(&spec.wrap(expr)).0
    }

    #[test]
    fn builtin_order_and_sql() {
        let catalog = Catalog::builtin();
        let rendered: Vec<_> = catalog
            .iter()
            .map(|spec| (spec.id.as_str(), render(spec)))
            .collect();

        assert_eq!(
            rendered,
            [
                ("sum", r#"coalesce(sum("amount"), 0)"#.to_string()),
                ("distinctCount", r#"count(distinct "amount")"#.to_string()),
                ("min", r#"min("amount")"#.to_string()),
                ("max", r#"max("amount")"#.to_string()),
                ("average", r#"avg("amount")"#.to_string()),
                ("stddevSample", r#"stddev_samp("amount")"#.to_string()),
                ("stddevPopulation", r#"stddev_pop("amount")"#.to_string()),
                ("varianceSample", r#"var_samp("amount")"#.to_string()),
                ("variancePopulation", r#"var_pop("amount")"#.to_string()),
            ]
        );
    }

    #[test]
    fn sum_widens_integers() {
        let catalog = Catalog::builtin();
        let sum = catalog.get("sum").unwrap();

        let int4 = ty(TypeId::INT4, TypeCategory::Numeric);
        let int8 = ty(TypeId::INT8, TypeCategory::Numeric);
        let float4 = ty(TypeId::FLOAT4, TypeCategory::Numeric);
        let numeric = ty(TypeId::NUMERIC, TypeCategory::Numeric);

        assert_eq!(sum.output_type(&int4, None), (TypeId::INT8, None));
        assert_eq!(sum.output_type(&int8, None), (TypeId::NUMERIC, None));
        assert_eq!(sum.output_type(&float4, None), (TypeId::FLOAT4, None));
        assert_eq!(sum.output_type(&numeric, Some(12)), (TypeId::NUMERIC, None));
        assert!(sum.is_non_null);
    }

    #[test]
    fn distinct_count_takes_any_type() {
        let catalog = Catalog::builtin();
        let spec = catalog.get("distinctCount").unwrap();
        let text = ty(TypeId::TEXT, TypeCategory::String);

        assert!(spec.is_suitable(&text));
        assert_eq!(spec.output_type(&text, None), (TypeId::INT8, None));
    }

    #[test]
    fn statistics_prefer_float8_for_floats() {
        let catalog = Catalog::builtin();
        let average = catalog.get("average").unwrap();

        let float4 = ty(TypeId::FLOAT4, TypeCategory::Numeric);
        let int4 = ty(TypeId::INT4, TypeCategory::Numeric);
        assert_eq!(average.output_type(&float4, None), (TypeId::FLOAT8, None));
        assert_eq!(average.output_type(&int4, None), (TypeId::NUMERIC, None));
        assert!(!average.is_non_null);
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let err = Catalog::new([
            AggregateSpec::new("sum", "Sum", |expr| expr),
            AggregateSpec::new("sum", "Sum again", |expr| expr),
        ])
        .unwrap_err();

        assert!(err.is_invalid_config());
    }

    #[test]
    fn function_spec_quotes_each_part() {
        let spec = function_spec("bitOr", "Bitwise or", "util.bit_or", vec![]);
        assert_eq!(render(&spec), r#""util"."bit_or"("amount")"#);
    }
}
