//! Aggregate fields and aggregate ordering for a schema derived from
//! database metadata.
//!
//! Two plugins hook into schema construction:
//!
//! * [`plugin::aggregate_types()`] gives every aggregable table an
//!   `<Table>Aggregates` container with one sub-type per aggregate spec
//!   (`sum`, `average`, ...), each exposing a field per eligible column.
//! * [`plugin::order_by_aggregates()`] extends every row-ordering enum with
//!   values that sort by `count(*)` or by an aggregate over each
//!   one-to-many relation pointing at the table.
//!
//! Aggregate fields add their projection to the query while it is planned
//! and read it back from the parent row under the alias derived by
//! [`alias::safe_alias`].

pub mod aggregate;
pub use aggregate::{AggregateSpec, Catalog};

pub mod alias;

pub mod build;
pub use build::{Build, Hook, Hooks, Plugin, SchemaBuilder};

pub mod computed;

pub mod inflection;
pub use inflection::{Inflection, Inflector};

mod options;
pub use options::{CustomAggregate, Options};

pub mod plugin;

pub mod registry;
pub use registry::Registry;

pub mod resolve;

pub mod types;

pub use tally_core::{Error, Result};

/// The plugins needed for a complete pass: the row-ordering enums, the
/// aggregate types, and the aggregate ordering values.
pub fn default_plugins() -> [Plugin; 3] {
    [
        plugin::row_sort,
        plugin::aggregate_types,
        plugin::order_by_aggregates,
    ]
}
