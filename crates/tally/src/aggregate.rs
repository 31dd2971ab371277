mod catalog;
pub use catalog::{builtins, Catalog};

mod spec;
pub use spec::{AggregateSpec, EntityFilter, SuitableType, TypeRemap, WrapFn};
pub(crate) use catalog::function_spec;
