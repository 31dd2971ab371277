use crate::aggregate::{function_spec, AggregateSpec};

use serde::Deserialize;
use tally_core::schema::db::{TypeCategory, TypeId};
use tally_core::{Error, Result};

/// Settings for one schema build.
///
/// Every field has a default, so `{}` is a valid configuration that enables
/// all built-in aggregates and every kind of aggregate ordering.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    /// Ids of the built-in aggregates to enable, in order. All of them when
    /// absent.
    pub aggregates: Option<Vec<String>>,

    pub custom_aggregates: Vec<CustomAggregate>,

    /// Attach an `orderBy` argument to scalar aggregate fields
    pub aggregate_order_by: bool,

    /// Add `<RELATION>_COUNT_ASC/DESC` ordering values
    pub order_by_count: bool,

    /// Add per-aggregate ordering values
    pub order_by_aggregates: bool,
}

/// A reduction backed by a single SQL aggregate function.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomAggregate {
    pub id: String,

    pub label: String,

    /// Function name, optionally schema qualified (`util.bit_or`)
    pub function: String,

    /// `typcategory` codes of the accepted input types. Any type when empty.
    #[serde(default)]
    pub categories: Vec<char>,

    /// Type id of the result. The input type when absent.
    #[serde(default)]
    pub result_type: Option<u32>,

    #[serde(default)]
    pub non_null: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            aggregates: None,
            custom_aggregates: vec![],
            aggregate_order_by: true,
            order_by_count: true,
            order_by_aggregates: true,
        }
    }
}

impl Options {
    pub fn from_json(json: &str) -> Result<Options> {
        serde_json::from_str(json)
            .map_err(|err| Error::invalid_config(format!("malformed options: {err}")))
    }
}

impl CustomAggregate {
    pub fn to_spec(&self) -> Result<AggregateSpec> {
        if !is_name(&self.id) {
            return Err(Error::invalid_config(format!(
                "custom aggregate id `{}` is not a valid name",
                self.id
            )));
        }

        if self.function.split('.').any(|part| part.is_empty()) {
            return Err(Error::invalid_config(format!(
                "custom aggregate `{}` has an invalid function name `{}`",
                self.id, self.function
            )));
        }

        let categories = self
            .categories
            .iter()
            .copied()
            .map(TypeCategory::from_code)
            .collect();

        let spec = function_spec(&self.id, &self.label, &self.function, categories)
            .non_null(self.non_null);

        Ok(match self.result_type {
            Some(oid) => spec.map_type(move |_, _| (TypeId(oid), None)),
            None => spec,
        })
    }
}

fn is_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_object_enables_everything() {
        let options = Options::from_json("{}").unwrap();
        assert_eq!(options.aggregates, None);
        assert!(options.custom_aggregates.is_empty());
        assert!(options.aggregate_order_by);
        assert!(options.order_by_count);
        assert!(options.order_by_aggregates);
    }

    #[test]
    fn camel_case_keys() {
        let options = Options::from_json(
            r#"{
                "aggregates": ["sum", "max"],
                "orderByAggregates": false,
                "customAggregates": [
                    { "id": "bitOr", "label": "Bitwise or", "function": "bit_or",
                      "categories": ["N"], "resultType": 20, "nonNull": true }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(options.aggregates, Some(vec!["sum".into(), "max".into()]));
        assert!(!options.order_by_aggregates);
        assert!(options.order_by_count);

        let custom = &options.custom_aggregates[0];
        assert_eq!(custom.function, "bit_or");
        assert_eq!(custom.categories, ['N']);
        assert_eq!(custom.result_type, Some(20));
        assert!(custom.non_null);
    }

    #[test]
    fn malformed_json_is_invalid_config() {
        let err = Options::from_json(r#"{ "aggregates": "sum" }"#).unwrap_err();
        assert!(err.is_invalid_config());
    }

    #[test]
    fn custom_id_must_be_a_name() {
        let custom = CustomAggregate {
            id: "bit or".into(),
            label: "Bitwise or".into(),
            function: "bit_or".into(),
            categories: vec![],
            result_type: None,
            non_null: false,
        };
        assert!(custom.to_spec().unwrap_err().is_invalid_config());
    }
}
