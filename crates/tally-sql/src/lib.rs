pub mod serializer;
pub use serializer::{Params, Placeholder, Serializer};

pub mod stmt;
pub use stmt::{
    Fragment, Ident, OrderExprFn, OrderIdentity, OrderSpec, OrderSpecs, QueryBuilder, Select,
    Symbol, Value,
};

/// Builds a [`Fragment`] from a comma separated list of parts.
///
/// Literal parts must be `&'static str`; runtime names go through
/// [`Ident`] and runtime values through [`Value`].
///
/// ```
/// use tally_sql::{sql, Ident, Serializer};
///
/// let amount = Ident::new("amount");
/// let fragment = sql!["sum(", amount, ")"];
/// let (sql, values) = Serializer::postgresql().compile(&fragment);
/// assert_eq!(sql, r#"sum("amount")"#);
/// assert!(values.is_empty());
/// ```
#[macro_export]
macro_rules! sql {
    ($($part:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut fragment = $crate::Fragment::new();
        $( fragment.push($part); )*
        fragment
    }};
}
