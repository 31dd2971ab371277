use by_address::ByAddress;
use std::{fmt, sync::Arc};

/// An anonymous table alias.
///
/// Symbols compare by identity: two symbols created with the same hint are
/// still distinct. The serializer names each distinct symbol of a statement
/// `__local_<n>__` in order of first appearance, so generated aliases never
/// collide with one another.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Symbol(ByAddress<Arc<str>>);

impl Symbol {
    pub fn new(hint: impl AsRef<str>) -> Symbol {
        Symbol(ByAddress(Arc::from(hint.as_ref())))
    }

    /// The name the symbol was created with. Only used for debugging.
    pub fn hint(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "Symbol({})", self.hint())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_not_hint() {
        let a = Symbol::new("app.orders");
        let b = Symbol::new("app.orders");
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }
}
