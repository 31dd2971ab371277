use super::Scope;
use crate::resolve::{DataGenerator, Resolver};
use crate::types::TypeRef;
use crate::AggregateSpec;

use indexmap::IndexMap;
use tally_core::schema::db::{ColumnId, ProcedureId, TableId, TypeId};

use std::sync::Arc;

pub type Fields = IndexMap<String, Field>;

#[derive(Debug, Clone)]
pub struct ScalarType {
    pub name: String,

    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ObjectType {
    pub name: String,

    pub description: Option<String>,

    pub fields: Fields,

    pub scope: Scope,
}

#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,

    pub description: Option<String>,

    pub ty: TypeRef,

    pub args: IndexMap<String, Arg>,

    pub resolver: Resolver,

    /// Adds the field's projection while the query is planned. Only
    /// aggregate fields have one.
    pub data: Option<DataGenerator>,

    pub scope: FieldScope,
}

#[derive(Debug, Clone)]
pub struct Arg {
    pub ty: TypeRef,

    pub description: Option<String>,
}

/// What a generated field was created for.
#[derive(Debug, Clone, Default)]
pub enum FieldScope {
    #[default]
    None,

    /// A container field exposing one aggregate type
    Aggregate {
        table: TableId,
        spec: Arc<AggregateSpec>,
    },

    /// An aggregate over a column. `ty` and `type_modifier` are the
    /// reduction's result type.
    ColumnAggregate {
        column: ColumnId,
        ty: TypeId,
        type_modifier: Option<i32>,
    },

    /// An aggregate over a computed column
    ComputedColumnAggregate { procedure: ProcedureId },
}

impl ScalarType {
    pub fn new(name: impl Into<String>) -> ScalarType {
        ScalarType {
            name: name.into(),
            description: None,
        }
    }
}

impl ObjectType {
    pub fn new(name: impl Into<String>, scope: Scope) -> ObjectType {
        ObjectType {
            name: name.into(),
            description: None,
            fields: Fields::new(),
            scope,
        }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }
}

impl Field {
    pub fn new(name: impl Into<String>, ty: TypeRef, resolver: Resolver) -> Field {
        Field {
            name: name.into(),
            description: None,
            ty,
            args: IndexMap::new(),
            resolver,
            data: None,
            scope: FieldScope::None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn arg(mut self, name: impl Into<String>, arg: Arg) -> Self {
        self.args.insert(name.into(), arg);
        self
    }

    pub fn data(mut self, data: DataGenerator) -> Self {
        self.data = Some(data);
        self
    }

    pub fn scope(mut self, scope: FieldScope) -> Self {
        self.scope = scope;
        self
    }
}
