use crate::AggregateSpec;

use tally_core::schema::db::TableId;

use std::sync::Arc;

/// What a generated type was created for. Hooks use the scope to decide
/// whether a type is theirs to extend.
#[derive(Debug, Clone, Default)]
pub enum Scope {
    #[default]
    None,

    /// `<Table>Aggregates`
    AggregateContainer { table: TableId },

    /// `<Table><Spec>Aggregates`
    AggregateType {
        table: TableId,
        spec: Arc<AggregateSpec>,
    },

    /// The row-ordering enum of a table
    RowSortEnum { table: TableId },
}
