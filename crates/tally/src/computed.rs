use tally_core::schema::db::{Procedure, Table};

/// How a computed column presents itself on its table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputedColumnDetails {
    pub pseudo_column_name: String,
}

/// Decides which procedures act as computed columns of a table.
pub trait ComputedColumns {
    fn details(&self, table: &Table, procedure: &Procedure) -> Option<ComputedColumnDetails>;
}

/// `<namespace>.<table>_<name>(<table row>, ...)` is the computed column
/// `<name>` of `<namespace>.<table>`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ComputedColumnConvention;

impl ComputedColumns for ComputedColumnConvention {
    fn details(&self, table: &Table, procedure: &Procedure) -> Option<ComputedColumnDetails> {
        if table.namespace.as_deref() != Some(procedure.namespace.as_str()) {
            return None;
        }

        if procedure.arg_types.first() != table.row_type.as_ref() {
            return None;
        }

        let pseudo_column_name = procedure
            .name
            .strip_prefix(table.name.as_str())?
            .strip_prefix('_')?;

        if pseudo_column_name.is_empty() {
            return None;
        }

        Some(ComputedColumnDetails {
            pseudo_column_name: pseudo_column_name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::schema::db::TypeId;
    use tally_core::schema::Builder;

    #[test]
    fn convention() {
        let mut b = Builder::new();
        let orders = b.table("app", "orders");
        let other = b.table("app", "customers");
        let other_row = b.table_mut(other).row_type.unwrap();

        let total = b.computed_column(orders, "total", TypeId::NUMERIC);
        let wrong_arg = b.procedure("app", "orders_bad", vec![other_row], TypeId::INT4, false);
        let wrong_ns = b.procedure("audit", "orders_total", vec![], TypeId::INT4, false);
        let no_suffix = b.procedure("app", "orders_", vec![], TypeId::INT4, false);
        let schema = b.build();
        let orders = schema.table(orders);

        let details = ComputedColumnConvention.details(orders, schema.procedure(total));
        assert_eq!(
            details,
            Some(ComputedColumnDetails {
                pseudo_column_name: "total".into()
            })
        );

        for id in [wrong_arg, wrong_ns, no_suffix] {
            assert_eq!(ComputedColumnConvention.details(orders, schema.procedure(id)), None);
        }
    }
}
