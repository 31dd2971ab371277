//! The plugins of a build. Each one is a [`Plugin`](crate::Plugin) that
//! registers its hooks.

mod aggregate_types;
pub use aggregate_types::aggregate_types;

mod order_by_aggregates;
pub use order_by_aggregates::order_by_aggregates;

mod row_sort;
pub use row_sort::row_sort;
