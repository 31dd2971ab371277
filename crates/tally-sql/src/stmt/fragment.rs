use super::{Ident, Symbol, Value};

/// A piece of SQL.
///
/// Fragments are built from static keywords, quoted identifiers, alias
/// symbols and bound values. There is no way to splice a runtime string in
/// as raw SQL: names go through [`Ident`] and data through [`Value`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fragment {
    pub(crate) nodes: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Node {
    Raw(&'static str),
    Ident(Ident),
    Symbol(Symbol),
    Value(Value),
}

impl Fragment {
    pub fn new() -> Fragment {
        Fragment::default()
    }

    pub fn raw(sql: &'static str) -> Fragment {
        Fragment {
            nodes: vec![Node::Raw(sql)],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Appends `part` to the fragment.
    pub fn push(&mut self, part: impl Into<Fragment>) -> &mut Self {
        self.nodes.extend(part.into().nodes);
        self
    }

    /// Joins fragments with `separator`.
    pub fn join(parts: impl IntoIterator<Item = Fragment>, separator: &'static str) -> Fragment {
        let mut ret = Fragment::new();
        for (i, part) in parts.into_iter().enumerate() {
            if i > 0 {
                ret.push(separator);
            }
            ret.push(part);
        }
        ret
    }

    /// Symbols referenced by the fragment, in order of first appearance.
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> + '_ {
        self.nodes.iter().filter_map(|node| match node {
            Node::Symbol(symbol) => Some(symbol),
            _ => None,
        })
    }
}

impl From<&'static str> for Fragment {
    fn from(value: &'static str) -> Self {
        Fragment::raw(value)
    }
}

impl From<&Fragment> for Fragment {
    fn from(value: &Fragment) -> Self {
        value.clone()
    }
}

impl From<Ident> for Fragment {
    fn from(value: Ident) -> Self {
        Fragment {
            nodes: vec![Node::Ident(value)],
        }
    }
}

impl From<Symbol> for Fragment {
    fn from(value: Symbol) -> Self {
        Fragment {
            nodes: vec![Node::Symbol(value)],
        }
    }
}

impl From<&Symbol> for Fragment {
    fn from(value: &Symbol) -> Self {
        Fragment::from(value.clone())
    }
}

impl From<Value> for Fragment {
    fn from(value: Value) -> Self {
        Fragment {
            nodes: vec![Node::Value(value)],
        }
    }
}

impl From<Option<Fragment>> for Fragment {
    fn from(value: Option<Fragment>) -> Self {
        value.unwrap_or_default()
    }
}
