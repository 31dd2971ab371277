use super::{Build, Hook, Hooks, Plugin};
use crate::computed::{ComputedColumnConvention, ComputedColumns};
use crate::inflection::{Inflection, Inflector};
use crate::registry::{Registry, ScalarType, TypeDef};
use crate::types::{PgTypeMapping, TypeResolver};
use crate::{Catalog, Options};

use tally_core::schema::{AllReadable, Visibility};
use tally_core::{Result, Schema};
use tracing::{debug, instrument};

/// Configures and runs a schema build over introspected metadata.
///
/// Collaborators default to [`Inflection`], [`PgTypeMapping`],
/// [`AllReadable`] and [`ComputedColumnConvention`]. Each call to
/// [`build`](SchemaBuilder::build) starts from an empty registry, so one
/// builder can be run any number of times.
pub struct SchemaBuilder<'a> {
    schema: &'a Schema,

    catalog: &'a Catalog,

    options: Options,

    inflection: Box<dyn Inflector + 'a>,

    types: Box<dyn TypeResolver + 'a>,

    visibility: Box<dyn Visibility + 'a>,

    computed_columns: Box<dyn ComputedColumns + 'a>,

    hooks: Hooks,

    /// Types registered before any hook runs
    base_types: Vec<TypeDef>,
}

impl<'a> SchemaBuilder<'a> {
    pub fn new(schema: &'a Schema, catalog: &'a Catalog) -> Self {
        SchemaBuilder {
            schema,
            catalog,
            options: Options::default(),
            inflection: Box::new(Inflection),
            types: Box::new(PgTypeMapping::new()),
            visibility: Box::new(AllReadable),
            computed_columns: Box::new(ComputedColumnConvention),
            hooks: Hooks::default(),
            base_types: vec![],
        }
    }

    pub fn plugin(&mut self, plugin: Plugin) -> &mut Self {
        plugin(&mut self.hooks);
        self
    }

    pub fn plugins(&mut self, plugins: impl IntoIterator<Item = Plugin>) -> &mut Self {
        for plugin in plugins {
            self.plugin(plugin);
        }
        self
    }

    pub fn hook(&mut self, hook: Hook) -> &mut Self {
        self.hooks.hook(hook);
        self
    }

    pub fn options(&mut self, options: Options) -> &mut Self {
        self.options = options;
        self
    }

    pub fn inflection(&mut self, inflection: impl Inflector + 'a) -> &mut Self {
        self.inflection = Box::new(inflection);
        self
    }

    pub fn type_resolver(&mut self, types: impl TypeResolver + 'a) -> &mut Self {
        self.types = Box::new(types);
        self
    }

    pub fn visibility(&mut self, visibility: impl Visibility + 'a) -> &mut Self {
        self.visibility = Box::new(visibility);
        self
    }

    pub fn computed_columns(&mut self, computed_columns: impl ComputedColumns + 'a) -> &mut Self {
        self.computed_columns = Box::new(computed_columns);
        self
    }

    /// Registers `ty` before any hook runs.
    pub fn base_type(&mut self, ty: TypeDef) -> &mut Self {
        self.base_types.push(ty);
        self
    }

    /// Registers the scalars of the default type mapping, `JSON` included.
    pub fn standard_scalars(&mut self) -> &mut Self {
        for name in PgTypeMapping::new().scalar_names() {
            self.base_type(TypeDef::Scalar(ScalarType::new(name)));
        }
        self
    }

    #[instrument(name = "tally::build", level = "debug", skip(self), fields(
        tables = self.schema.tables.len(),
        aggregates = self.catalog.len()
    ))]
    pub fn build(&self) -> Result<Registry> {
        let mut build = Build {
            schema: self.schema,
            catalog: self.catalog,
            options: &self.options,
            inflection: &*self.inflection,
            types: &*self.types,
            visibility: &*self.visibility,
            computed_columns: &*self.computed_columns,
            registry: Registry::new(),
            hooks: self.hooks.clone(),
        };

        for ty in &self.base_types {
            build.registry.register(ty.clone())?;
        }

        for hook in self.hooks.init.clone() {
            hook(&mut build)?;
        }

        debug!(types = build.registry.len(), "schema built");
        Ok(build.registry)
    }
}
