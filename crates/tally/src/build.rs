//! Runs plugins over one schema build.
//!
//! Plugins register hooks; the build fires them at fixed points. Init
//! hooks run once, in registration order. Fields hooks run every time an
//! object type is created through [`Build::new_with_hooks`], and values
//! hooks every time an enum is created through
//! [`Build::new_enum_with_hooks`]. Each fields or values hook receives the
//! collection built so far and returns the next one.

mod hooks;
pub use hooks::{
    EnumValuesContext, EnumValuesHook, FieldsContext, Hook, Hooks, InitHook, ObjectFieldsHook,
    Plugin,
};

mod schema_builder;
pub use schema_builder::SchemaBuilder;

use crate::computed::ComputedColumns;
use crate::inflection::Inflector;
use crate::registry::{EnumType, ObjectType, Registry, TypeDef};
use crate::types::TypeResolver;
use crate::{Catalog, Options};

use tally_core::schema::{Entity, Visibility};
use tally_core::{Result, Schema};
use tracing::debug;

/// State of one schema build, shared by every hook.
pub struct Build<'a> {
    pub schema: &'a Schema,

    pub catalog: &'a Catalog,

    pub options: &'a Options,

    pub inflection: &'a dyn Inflector,

    pub types: &'a dyn TypeResolver,

    pub visibility: &'a dyn Visibility,

    pub computed_columns: &'a dyn ComputedColumns,

    /// Types generated so far
    pub registry: Registry,

    hooks: Hooks,
}

impl Build<'_> {
    pub fn is_readable(&self, entity: Entity<'_>) -> bool {
        self.visibility.is_readable(entity)
    }

    /// Runs the fields hooks over `ty` and registers the result.
    ///
    /// With `skip_if_empty`, a type that ends up without fields is dropped
    /// and `None` is returned. Otherwise the registered name is returned.
    pub fn new_with_hooks(
        &mut self,
        mut ty: ObjectType,
        skip_if_empty: bool,
    ) -> Result<Option<String>> {
        let cx = FieldsContext {
            type_name: ty.name.clone(),
            scope: ty.scope.clone(),
        };

        for hook in self.hooks.object_fields.clone() {
            ty.fields = hook(ty.fields, self, &cx)?;
        }

        if skip_if_empty && ty.fields.is_empty() {
            debug!(type_name = %ty.name, "skipping type without fields");
            return Ok(None);
        }

        let name = ty.name.clone();
        self.registry.register(TypeDef::Object(ty))?;
        Ok(Some(name))
    }

    /// Runs the values hooks over `ty` and registers the result.
    pub fn new_enum_with_hooks(&mut self, mut ty: EnumType) -> Result<String> {
        let cx = EnumValuesContext {
            type_name: ty.name.clone(),
            scope: ty.scope.clone(),
        };

        for hook in self.hooks.enum_values.clone() {
            ty.values = hook(ty.values, self, &cx)?;
        }

        let name = ty.name.clone();
        self.registry.register(TypeDef::Enum(ty))?;
        Ok(name)
    }
}
