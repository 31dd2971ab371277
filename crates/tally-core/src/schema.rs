mod builder;
pub use builder::Builder;

pub mod db;
pub use db::Schema;

mod visibility;
pub use visibility::{AllReadable, Entity, ReadableIf, Visibility};
