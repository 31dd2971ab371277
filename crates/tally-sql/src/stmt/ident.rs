use tally_core::schema::db::Table;

/// A possibly qualified SQL identifier. Always emitted quoted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident(pub Vec<String>);

impl Ident {
    pub fn new(name: impl Into<String>) -> Ident {
        Ident(vec![name.into()])
    }

    pub fn qualified(namespace: impl Into<String>, name: impl Into<String>) -> Ident {
        Ident(vec![namespace.into(), name.into()])
    }
}

impl From<&str> for Ident {
    fn from(value: &str) -> Self {
        Ident::new(value)
    }
}

impl From<&Table> for Ident {
    fn from(table: &Table) -> Self {
        match &table.namespace {
            Some(namespace) => Ident::qualified(namespace, &table.name),
            None => Ident::new(&table.name),
        }
    }
}
