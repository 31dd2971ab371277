use super::{Formatter, ToSql};

use crate::stmt::Value;

pub trait Params {
    fn push(&mut self, value: &Value) -> Placeholder;
}

/// 1-based position of a bound value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder(pub usize);

impl Params for Vec<Value> {
    fn push(&mut self, value: &Value) -> Placeholder {
        Vec::push(self, value.clone());
        Placeholder(self.len())
    }
}

impl ToSql for Placeholder {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let pos = self.0;

        if f.serializer.is_sqlite() {
            fmt!(f, "?", pos)
        } else {
            fmt!(f, "$", pos)
        }
    }
}
