mod fragment;
pub use fragment::Fragment;
pub(crate) use fragment::Node;

mod ident;
pub use ident::Ident;

mod order_by;
pub use order_by::{OrderExprFn, OrderIdentity, OrderSpec, OrderSpecs};

mod query_builder;
pub use query_builder::QueryBuilder;

mod select;
pub use select::Select;

mod symbol;
pub use symbol::Symbol;

mod value;
pub use value::Value;
