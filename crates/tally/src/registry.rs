mod enum_type;
pub use enum_type::{order_by_asc_desc, EnumType, EnumValue, EnumValues, OrderValue};

mod object;
pub use object::{Arg, Field, FieldScope, Fields, ObjectType, ScalarType};

mod scope;
pub use scope::Scope;

use indexmap::IndexMap;
use tally_core::{Error, Result};
use tracing::trace;

/// A named type in the generated schema.
#[derive(Debug, Clone)]
pub enum TypeDef {
    Scalar(ScalarType),
    Object(ObjectType),
    Enum(EnumType),
}

/// Generated types by name, in registration order.
///
/// One registry is created per schema build and handed to the caller when
/// the build finishes.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    types: IndexMap<String, TypeDef>,
}

impl TypeDef {
    pub fn name(&self) -> &str {
        match self {
            TypeDef::Scalar(ty) => &ty.name,
            TypeDef::Object(ty) => &ty.name,
            TypeDef::Enum(ty) => &ty.name,
        }
    }
}

impl Registry {
    pub fn new() -> Registry {
        Registry::default()
    }

    /// Adds a type. Registering a second type under an existing name is an
    /// error.
    pub fn register(&mut self, def: TypeDef) -> Result<()> {
        let name = def.name().to_string();
        if self.types.contains_key(&name) {
            return Err(Error::name_collision(name, "registering a type"));
        }
        trace!(type_name = %name, "registering type");
        self.types.insert(name, def);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&TypeDef> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn scalar(&self, name: &str) -> Option<&ScalarType> {
        match self.get(name)? {
            TypeDef::Scalar(ty) => Some(ty),
            _ => None,
        }
    }

    pub fn object(&self, name: &str) -> Option<&ObjectType> {
        match self.get(name)? {
            TypeDef::Object(ty) => Some(ty),
            _ => None,
        }
    }

    pub fn enum_type(&self, name: &str) -> Option<&EnumType> {
        match self.get(name)? {
            TypeDef::Enum(ty) => Some(ty),
            _ => None,
        }
    }

    /// Type names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.types.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeDef> + '_ {
        self.types.values()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Returns `base` followed by the entries of `extra`.
///
/// An entry of `extra` whose name is already present is a name collision;
/// `reason` says which extension was being applied.
pub fn extend<T>(
    mut base: IndexMap<String, T>,
    extra: IndexMap<String, T>,
    reason: &str,
) -> Result<IndexMap<String, T>> {
    trace!(reason, added = extra.len(), "extend");

    for (name, value) in extra {
        if base.contains_key(&name) {
            return Err(Error::name_collision(name, reason));
        }
        base.insert(name, value);
    }

    Ok(base)
}
