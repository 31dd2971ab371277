use super::{Fragment, Ident, QueryBuilder};
use crate::sql;

use std::{fmt, sync::Arc};

/// Produces an ordering expression once the query it applies to is known.
pub type OrderExprFn = Arc<dyn Fn(&dyn QueryBuilder) -> Fragment + Send + Sync>;

/// What an [`OrderSpec`] sorts by.
#[derive(Clone)]
pub enum OrderIdentity {
    /// A column of the query's source table, qualified with the query's alias
    Column(String),

    /// A precomputed, already alias-bound expression
    Expr(Fragment),

    /// An expression computed against the query it is applied to
    Func(OrderExprFn),
}

#[derive(Debug, Clone)]
pub struct OrderSpec {
    pub identity: OrderIdentity,

    pub ascending: bool,

    /// Explicit null placement. `None` leaves it to the database.
    pub nulls_first: Option<bool>,
}

/// The ordering attached to one enum value: either one spec or several
/// applied in order.
#[derive(Debug, Clone)]
pub enum OrderSpecs {
    Single(OrderSpec),
    List(Vec<OrderSpec>),
}

impl OrderIdentity {
    pub fn func(f: impl Fn(&dyn QueryBuilder) -> Fragment + Send + Sync + 'static) -> Self {
        OrderIdentity::Func(Arc::new(f))
    }

    pub fn to_fragment(&self, query: &dyn QueryBuilder) -> Fragment {
        match self {
            OrderIdentity::Column(name) => sql![query.table_alias(), ".", Ident::new(name)],
            OrderIdentity::Expr(expr) => expr.clone(),
            OrderIdentity::Func(f) => f(query),
        }
    }
}

impl OrderSpec {
    pub fn new(identity: OrderIdentity, ascending: bool, nulls_first: Option<bool>) -> Self {
        Self {
            identity,
            ascending,
            nulls_first,
        }
    }

    /// `<expr> ASC|DESC [NULLS FIRST|NULLS LAST]`
    pub fn to_fragment(&self, query: &dyn QueryBuilder) -> Fragment {
        let direction = if self.ascending { " ASC" } else { " DESC" };
        let nulls = match self.nulls_first {
            Some(true) => " NULLS FIRST",
            Some(false) => " NULLS LAST",
            None => "",
        };

        sql![self.identity.to_fragment(query), direction, nulls]
    }
}

impl OrderSpecs {
    pub fn iter(&self) -> std::slice::Iter<'_, OrderSpec> {
        match self {
            OrderSpecs::Single(spec) => std::slice::from_ref(spec).iter(),
            OrderSpecs::List(specs) => specs.iter(),
        }
    }

    /// Builds `ORDER BY ...` for `specs`, or `None` when there is nothing to
    /// order by.
    pub fn order_by_clause<'a>(
        specs: impl IntoIterator<Item = &'a OrderSpec>,
        query: &dyn QueryBuilder,
    ) -> Option<Fragment> {
        let exprs: Vec<_> = specs
            .into_iter()
            .map(|spec| spec.to_fragment(query))
            .collect();

        if exprs.is_empty() {
            return None;
        }

        Some(sql!["ORDER BY ", Fragment::join(exprs, ", ")])
    }
}

impl<'a> IntoIterator for &'a OrderSpecs {
    type Item = &'a OrderSpec;
    type IntoIter = std::slice::Iter<'a, OrderSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for OrderIdentity {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderIdentity::Column(name) => fmt.debug_tuple("Column").field(name).finish(),
            OrderIdentity::Expr(expr) => fmt.debug_tuple("Expr").field(expr).finish(),
            OrderIdentity::Func(_) => fmt.write_str("Func(..)"),
        }
    }
}
