use tally_core::schema::db::{Type, TypeId};
use tally_core::schema::Entity;
use tally_sql::Fragment;

use std::{fmt, sync::Arc};

pub type SuitableType = Arc<dyn Fn(&Type) -> bool + Send + Sync>;
pub type EntityFilter = Arc<dyn Fn(Entity<'_>) -> bool + Send + Sync>;
pub type WrapFn = Arc<dyn Fn(Fragment) -> Fragment + Send + Sync>;
pub type TypeRemap = Arc<dyn Fn(&Type, Option<i32>) -> (TypeId, Option<i32>) + Send + Sync>;

/// One reduction kind (`sum`, `average`, ...) and the rules for where it
/// applies.
///
/// Specs are loaded once before synthesis and only read afterwards; the
/// synthesizers hold them behind `Arc` so that generated fields and
/// ordering values can keep a handle on the spec they were built from.
#[derive(Clone)]
pub struct AggregateSpec {
    /// Stable identifier, used to derive type, field and enum value names
    pub id: String,

    /// Capitalized label used at the start of descriptions ("Sum",
    /// "Distinct count")
    pub human_label: String,

    pub is_suitable_type: SuitableType,

    /// Optional veto on individual columns and procedures
    pub should_apply_to_entity: Option<EntityFilter>,

    /// Wraps a column reference in the reduction's SQL form
    pub sql_aggregate_wrap: WrapFn,

    /// Maps the input type and modifier to the reduction's result type.
    /// `None` keeps the input type.
    pub type_and_modifier: Option<TypeRemap>,

    /// True when the reduction never yields null
    pub is_non_null: bool,
}

impl AggregateSpec {
    /// A spec that applies to every type and keeps the input type.
    pub fn new(
        id: impl Into<String>,
        human_label: impl Into<String>,
        wrap: impl Fn(Fragment) -> Fragment + Send + Sync + 'static,
    ) -> AggregateSpec {
        AggregateSpec {
            id: id.into(),
            human_label: human_label.into(),
            is_suitable_type: Arc::new(|_| true),
            should_apply_to_entity: None,
            sql_aggregate_wrap: Arc::new(wrap),
            type_and_modifier: None,
            is_non_null: false,
        }
    }

    pub fn suitable_when(mut self, f: impl Fn(&Type) -> bool + Send + Sync + 'static) -> Self {
        self.is_suitable_type = Arc::new(f);
        self
    }

    pub fn apply_to(mut self, f: impl Fn(Entity<'_>) -> bool + Send + Sync + 'static) -> Self {
        self.should_apply_to_entity = Some(Arc::new(f));
        self
    }

    pub fn map_type(
        mut self,
        f: impl Fn(&Type, Option<i32>) -> (TypeId, Option<i32>) + Send + Sync + 'static,
    ) -> Self {
        self.type_and_modifier = Some(Arc::new(f));
        self
    }

    pub fn non_null(mut self, is_non_null: bool) -> Self {
        self.is_non_null = is_non_null;
        self
    }

    /// True unless the spec's entity filter vetoes `entity`.
    pub fn applies_to(&self, entity: Entity<'_>) -> bool {
        self.should_apply_to_entity
            .as_ref()
            .is_none_or(|filter| filter(entity))
    }

    pub fn is_suitable(&self, ty: &Type) -> bool {
        (self.is_suitable_type)(ty)
    }

    /// Veto and type checks together, in that order.
    pub fn accepts(&self, entity: Entity<'_>, ty: &Type) -> bool {
        self.applies_to(entity) && self.is_suitable(ty)
    }

    pub fn wrap(&self, expr: Fragment) -> Fragment {
        (self.sql_aggregate_wrap)(expr)
    }

    /// The type and modifier of the reduction's result for an input of
    /// type `ty`.
    pub fn output_type(&self, ty: &Type, type_modifier: Option<i32>) -> (TypeId, Option<i32>) {
        match &self.type_and_modifier {
            Some(remap) => remap(ty, type_modifier),
            None => (ty.id, type_modifier),
        }
    }
}

impl fmt::Debug for AggregateSpec {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("AggregateSpec")
            .field("id", &self.id)
            .field("human_label", &self.human_label)
            .field("is_non_null", &self.is_non_null)
            .finish_non_exhaustive()
    }
}
