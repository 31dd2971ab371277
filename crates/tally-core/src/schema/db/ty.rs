use std::fmt;

/// Identifies a database type. Mirrors the PostgreSQL type OID.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct TypeId(pub u32);

impl TypeId {
    pub const BOOL: TypeId = TypeId(16);
    pub const INT8: TypeId = TypeId(20);
    pub const INT2: TypeId = TypeId(21);
    pub const INT4: TypeId = TypeId(23);
    pub const TEXT: TypeId = TypeId(25);
    pub const JSON: TypeId = TypeId(114);
    pub const FLOAT4: TypeId = TypeId(700);
    pub const FLOAT8: TypeId = TypeId(701);
    pub const MONEY: TypeId = TypeId(790);
    pub const VARCHAR: TypeId = TypeId(1043);
    pub const DATE: TypeId = TypeId(1082);
    pub const TIMESTAMP: TypeId = TypeId(1114);
    pub const TIMESTAMPTZ: TypeId = TypeId(1184);
    pub const INTERVAL: TypeId = TypeId(1186);
    pub const NUMERIC: TypeId = TypeId(1700);
    pub const UUID: TypeId = TypeId(2950);
    pub const JSONB: TypeId = TypeId(3802);
}

impl fmt::Debug for TypeId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "TypeId({})", self.0)
    }
}

/// A database type as seen by introspection.
#[derive(Debug, Clone, PartialEq)]
pub struct Type {
    pub id: TypeId,

    pub namespace: String,

    pub name: String,

    /// Coarse classification, used by aggregates to decide whether a column
    /// can be reduced.
    pub category: TypeCategory,
}

/// Type categories, following `pg_type.typcategory`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TypeCategory {
    Array,
    Boolean,
    Composite,
    DateTime,
    Enum,
    Geometric,
    Network,
    Numeric,
    Pseudo,
    Range,
    String,
    Timespan,
    User,
    BitString,
    Unknown,
}

impl Type {
    pub fn new(
        id: TypeId,
        namespace: impl Into<String>,
        name: impl Into<String>,
        category: TypeCategory,
    ) -> Type {
        Type {
            id,
            namespace: namespace.into(),
            name: name.into(),
            category,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.category == TypeCategory::Numeric
    }

    pub fn is_enum(&self) -> bool {
        self.category == TypeCategory::Enum
    }

    /// The built-in `pg_catalog` types the default type mapping knows about.
    pub fn builtins() -> Vec<Type> {
        use TypeCategory::*;

        [
            (TypeId::BOOL, "bool", Boolean),
            (TypeId::INT8, "int8", Numeric),
            (TypeId::INT2, "int2", Numeric),
            (TypeId::INT4, "int4", Numeric),
            (TypeId::TEXT, "text", String),
            (TypeId::JSON, "json", User),
            (TypeId::FLOAT4, "float4", Numeric),
            (TypeId::FLOAT8, "float8", Numeric),
            (TypeId::MONEY, "money", Numeric),
            (TypeId::VARCHAR, "varchar", String),
            (TypeId::DATE, "date", DateTime),
            (TypeId::TIMESTAMP, "timestamp", DateTime),
            (TypeId::TIMESTAMPTZ, "timestamptz", DateTime),
            (TypeId::INTERVAL, "interval", Timespan),
            (TypeId::NUMERIC, "numeric", Numeric),
            (TypeId::UUID, "uuid", User),
            (TypeId::JSONB, "jsonb", User),
        ]
        .into_iter()
        .map(|(id, name, category)| Type::new(id, "pg_catalog", name, category))
        .collect()
    }
}

impl TypeCategory {
    /// Maps a `typcategory` code to a category.
    pub fn from_code(code: char) -> TypeCategory {
        use TypeCategory::*;

        match code {
            'A' => Array,
            'B' => Boolean,
            'C' => Composite,
            'D' => DateTime,
            'E' => Enum,
            'G' => Geometric,
            'I' => Network,
            'N' => Numeric,
            'P' => Pseudo,
            'R' => Range,
            'S' => String,
            'T' => Timespan,
            'U' => User,
            'V' => BitString,
            _ => Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_codes() {
        assert_eq!(TypeCategory::from_code('N'), TypeCategory::Numeric);
        assert_eq!(TypeCategory::from_code('E'), TypeCategory::Enum);
        assert_eq!(TypeCategory::from_code('?'), TypeCategory::Unknown);
    }

    #[test]
    fn builtins_are_unique() {
        let builtins = Type::builtins();
        let mut ids: Vec<_> = builtins.iter().map(|ty| ty.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), builtins.len());
    }
}
