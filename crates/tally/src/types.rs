use indexmap::IndexMap;
use tally_core::schema::db::TypeId;

use std::fmt;

/// Reference to an output type, possibly wrapped in list and non-null
/// modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Named(String),
    NonNull(Box<TypeRef>),
    List(Box<TypeRef>),
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> TypeRef {
        TypeRef::Named(name.into())
    }

    /// Wraps in non-null. Already non-null references are returned as is.
    pub fn non_null(self) -> TypeRef {
        match self {
            TypeRef::NonNull(_) => self,
            _ => TypeRef::NonNull(Box::new(self)),
        }
    }

    pub fn list(self) -> TypeRef {
        TypeRef::List(Box::new(self))
    }

    pub fn is_non_null(&self) -> bool {
        matches!(self, TypeRef::NonNull(_))
    }

    /// Name of the innermost named type.
    pub fn name(&self) -> &str {
        match self {
            TypeRef::Named(name) => name,
            TypeRef::NonNull(ty) | TypeRef::List(ty) => ty.name(),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Named(name) => f.write_str(name),
            TypeRef::NonNull(ty) => write!(f, "{ty}!"),
            TypeRef::List(ty) => write!(f, "[{ty}]"),
        }
    }
}

/// Maps a database type and modifier to an output type.
///
/// `None` means the type has no output representation; fields of that type
/// are skipped.
pub trait TypeResolver {
    fn output_type(&self, ty: TypeId, type_modifier: Option<i32>) -> Option<TypeRef>;
}

/// Output scalars for the well-known PostgreSQL types.
#[derive(Debug, Clone)]
pub struct PgTypeMapping {
    scalars: IndexMap<TypeId, String>,
}

impl PgTypeMapping {
    pub fn new() -> PgTypeMapping {
        let scalars = [
            (TypeId::BOOL, "Boolean"),
            (TypeId::INT2, "Int"),
            (TypeId::INT4, "Int"),
            (TypeId::INT8, "BigInt"),
            (TypeId::FLOAT4, "Float"),
            (TypeId::FLOAT8, "Float"),
            (TypeId::MONEY, "Float"),
            (TypeId::NUMERIC, "BigFloat"),
            (TypeId::TEXT, "String"),
            (TypeId::VARCHAR, "String"),
            (TypeId::JSON, "JSON"),
            (TypeId::JSONB, "JSON"),
            (TypeId::DATE, "Date"),
            (TypeId::TIMESTAMP, "Datetime"),
            (TypeId::TIMESTAMPTZ, "Datetime"),
            (TypeId::INTERVAL, "Interval"),
            (TypeId::UUID, "UUID"),
        ]
        .into_iter()
        .map(|(id, name)| (id, name.to_string()))
        .collect();

        PgTypeMapping { scalars }
    }

    /// Maps `ty` to the scalar `name`, replacing any existing mapping.
    pub fn with(mut self, ty: TypeId, name: impl Into<String>) -> Self {
        self.scalars.insert(ty, name.into());
        self
    }

    /// Scalar names used by the mapping, without duplicates.
    pub fn scalar_names(&self) -> impl Iterator<Item = &str> + '_ {
        let mut seen = Vec::<&str>::new();
        self.scalars.values().filter_map(move |name| {
            if seen.contains(&name.as_str()) {
                None
            } else {
                seen.push(name);
                Some(name.as_str())
            }
        })
    }
}

impl Default for PgTypeMapping {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeResolver for PgTypeMapping {
    fn output_type(&self, ty: TypeId, _type_modifier: Option<i32>) -> Option<TypeRef> {
        self.scalars.get(&ty).map(TypeRef::named)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_wrappers() {
        let ty = TypeRef::named("OrdersOrderBy").non_null().list();
        assert_eq!(ty.to_string(), "[OrdersOrderBy!]");
        assert_eq!(ty.name(), "OrdersOrderBy");
        assert!(!ty.is_non_null());
        assert!(TypeRef::named("BigInt").non_null().non_null().is_non_null());
        assert_eq!(TypeRef::named("BigInt").non_null().non_null().to_string(), "BigInt!");
    }

    #[test]
    fn known_and_unknown_types() {
        let mapping = PgTypeMapping::new();
        assert_eq!(
            mapping.output_type(TypeId::NUMERIC, Some(10)),
            Some(TypeRef::named("BigFloat"))
        );
        assert_eq!(mapping.output_type(TypeId(100_000), None), None);

        let mapping = mapping.with(TypeId(100_000), "Money");
        assert_eq!(
            mapping.output_type(TypeId(100_000), None),
            Some(TypeRef::named("Money"))
        );
    }

    #[test]
    fn scalar_names_are_unique() {
        let mapping = PgTypeMapping::new();
        let names: Vec<_> = mapping.scalar_names().collect();
        assert_eq!(names.iter().filter(|name| **name == "Int").count(), 1);
        assert!(names.contains(&"JSON"));
    }
}
