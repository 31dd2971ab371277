use super::Serializer;

#[derive(Debug)]
pub(super) enum Flavor {
    Postgresql,
    Sqlite,
}

impl Serializer {
    pub fn postgresql() -> Serializer {
        Serializer {
            flavor: Flavor::Postgresql,
        }
    }

    pub fn sqlite() -> Serializer {
        Serializer {
            flavor: Flavor::Sqlite,
        }
    }

    pub(super) fn is_sqlite(&self) -> bool {
        matches!(self.flavor, Flavor::Sqlite)
    }
}

impl Flavor {
    pub(super) fn quote_char(&self) -> char {
        match self {
            Flavor::Postgresql | Flavor::Sqlite => '"',
        }
    }
}
