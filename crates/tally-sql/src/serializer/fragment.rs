use super::{Formatter, Params, Period, Quoted, ToSql};

use crate::stmt::{Fragment, Ident, Node, Symbol, Value};

impl ToSql for &Fragment {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        for node in &self.nodes {
            node.to_sql(f);
        }
    }
}

impl ToSql for &Node {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            Node::Raw(sql) => fmt!(f, *sql),
            Node::Ident(ident) => fmt!(f, ident),
            Node::Symbol(symbol) => fmt!(f, symbol),
            Node::Value(value) => fmt!(f, value),
        }
    }
}

impl ToSql for &Ident {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let parts = Period(self.0.iter().map(Quoted));
        fmt!(f, parts);
    }
}

impl ToSql for &Symbol {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let name = format!("__local_{}__", f.symbol_index(self));
        fmt!(f, Quoted(name));
    }
}

impl ToSql for &Value {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            Value::Null => fmt!(f, "NULL"),
            Value::Bool(true) => fmt!(f, "TRUE"),
            Value::Bool(false) => fmt!(f, "FALSE"),
            _ => {
                let placeholder = f.params.push(self);
                fmt!(f, placeholder);
            }
        }
    }
}
