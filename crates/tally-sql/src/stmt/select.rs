use super::{Fragment, Ident, OrderSpec, OrderSpecs, QueryBuilder, Symbol};
use crate::sql;

/// A `SELECT` over a single aliased table.
///
/// This is the query-builder the aggregate data generators write into. It
/// only ever grows the projection list; filters and ordering are set by the
/// owner of the query.
#[derive(Debug, Clone)]
pub struct Select {
    table: Ident,

    alias: Symbol,

    selections: Vec<(Fragment, String)>,

    filter: Vec<Fragment>,

    order_by: Vec<OrderSpec>,
}

impl Select {
    pub fn new(table: impl Into<Ident>) -> Select {
        let table = table.into();
        let alias = Symbol::new(table.0.join("."));

        Select {
            table,
            alias,
            selections: vec![],
            filter: vec![],
            order_by: vec![],
        }
    }

    pub fn alias(&self) -> &Symbol {
        &self.alias
    }

    /// Output columns as `(expression, alias)` pairs, in the order they were
    /// added.
    pub fn selections(&self) -> &[(Fragment, String)] {
        &self.selections
    }

    pub fn selection(&self, alias: &str) -> Option<&Fragment> {
        self.selections
            .iter()
            .find(|(_, name)| name == alias)
            .map(|(expr, _)| expr)
    }

    /// Adds a `WHERE` condition. Conditions are combined with `AND`.
    pub fn filter(&mut self, condition: Fragment) {
        self.filter.push(condition);
    }

    /// Appends the specs of an ordering enum value.
    pub fn order_by(&mut self, specs: &OrderSpecs) {
        self.order_by.extend(specs.iter().cloned());
    }

    pub fn to_fragment(&self) -> Fragment {
        let projection = if self.selections.is_empty() {
            Fragment::raw("*")
        } else {
            Fragment::join(
                self.selections
                    .iter()
                    .map(|(expr, alias)| sql![expr, " AS ", Ident::new(alias)]),
                ", ",
            )
        };

        let mut ret = sql![
            "SELECT ",
            projection,
            " FROM ",
            self.table.clone(),
            " AS ",
            &self.alias
        ];

        if !self.filter.is_empty() {
            let conditions = self.filter.iter().map(|cond| sql!["(", cond, ")"]);
            ret.push(" WHERE ");
            ret.push(Fragment::join(conditions, " AND "));
        }

        if let Some(order_by) = OrderSpecs::order_by_clause(&self.order_by, self) {
            ret.push(" ");
            ret.push(order_by);
        }

        ret
    }
}

impl QueryBuilder for Select {
    fn table_alias(&self) -> Fragment {
        Fragment::from(&self.alias)
    }

    fn select(&mut self, expr: Fragment, alias: &str) {
        debug_assert!(
            self.selection(alias).is_none(),
            "duplicate output alias `{alias}`"
        );
        self.selections.push((expr, alias.to_string()));
    }
}
