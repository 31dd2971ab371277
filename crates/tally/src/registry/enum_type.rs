use super::Scope;

use indexmap::IndexMap;
use tally_sql::{OrderIdentity, OrderSpec, OrderSpecs};

pub type EnumValues = IndexMap<String, EnumValue>;

#[derive(Debug, Clone)]
pub struct EnumType {
    pub name: String,

    pub description: Option<String>,

    pub values: EnumValues,

    pub scope: Scope,
}

#[derive(Debug, Clone)]
pub struct EnumValue {
    pub description: Option<String>,

    pub value: OrderValue,
}

/// The internal value behind a row-ordering enum value.
#[derive(Debug, Clone)]
pub struct OrderValue {
    pub alias: Option<String>,

    pub specs: OrderSpecs,

    /// True when the ordering alone identifies a row, so it can serve as a
    /// tiebreaker
    pub unique: bool,
}

impl EnumType {
    pub fn new(name: impl Into<String>, scope: Scope) -> EnumType {
        EnumType {
            name: name.into(),
            description: None,
            values: EnumValues::new(),
            scope,
        }
    }

    pub fn value(&self, name: &str) -> Option<&OrderValue> {
        self.values.get(name).map(|value| &value.value)
    }
}

impl EnumValue {
    pub fn new(value: OrderValue) -> EnumValue {
        EnumValue {
            description: None,
            value,
        }
    }
}

/// The `<base>_ASC` and `<base>_DESC` values ordering by `identity`.
///
/// Without an explicit `nulls_first`, ascending puts nulls first and
/// descending puts them last.
pub fn order_by_asc_desc(
    base: &str,
    identity: OrderIdentity,
    unique: bool,
    nulls_first: Option<bool>,
) -> EnumValues {
    let value = |suffix: &str, ascending: bool| {
        let name = format!("{base}_{suffix}");
        let spec = OrderSpec::new(
            identity.clone(),
            ascending,
            Some(nulls_first.unwrap_or(ascending)),
        );
        let value = OrderValue {
            alias: Some(name.clone()),
            specs: OrderSpecs::Single(spec),
            unique,
        };
        (name, EnumValue::new(value))
    };

    [value("ASC", true), value("DESC", false)]
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nulls(values: &EnumValues, name: &str) -> Option<bool> {
        values[name].value.specs.iter().next().unwrap().nulls_first
    }

    #[test]
    fn default_null_placement() {
        let identity = OrderIdentity::Column("amount".into());
        let values = order_by_asc_desc("AMOUNT", identity, false, None);

        let names: Vec<_> = values.keys().map(String::as_str).collect();
        assert_eq!(names, ["AMOUNT_ASC", "AMOUNT_DESC"]);
        assert_eq!(nulls(&values, "AMOUNT_ASC"), Some(true));
        assert_eq!(nulls(&values, "AMOUNT_DESC"), Some(false));
        assert_eq!(values["AMOUNT_ASC"].value.alias.as_deref(), Some("AMOUNT_ASC"));
    }

    #[test]
    fn explicit_null_placement_wins() {
        let identity = OrderIdentity::Column("amount".into());

        let last = order_by_asc_desc("AMOUNT", identity.clone(), false, Some(false));
        assert_eq!(nulls(&last, "AMOUNT_ASC"), Some(false));
        assert_eq!(nulls(&last, "AMOUNT_DESC"), Some(false));

        let first = order_by_asc_desc("AMOUNT", identity, true, Some(true));
        assert_eq!(nulls(&first, "AMOUNT_DESC"), Some(true));
        assert!(first["AMOUNT_DESC"].value.unique);
    }
}
