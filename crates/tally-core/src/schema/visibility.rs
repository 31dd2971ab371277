use super::db::{Column, Constraint, Procedure, Table};

/// A metadata entity that can be hidden from the generated schema.
#[derive(Debug, Clone, Copy)]
pub enum Entity<'a> {
    Table(&'a Table),
    Column(&'a Column),
    Constraint(&'a Constraint),
    Procedure(&'a Procedure),
}

/// Decides whether an entity may be read through the generated schema.
///
/// This is the only access-control question synthesis asks; whatever policy
/// answers it lives outside this crate.
pub trait Visibility {
    fn is_readable(&self, entity: Entity<'_>) -> bool;
}

/// Every entity is readable.
#[derive(Debug, Default, Clone, Copy)]
pub struct AllReadable;

impl Visibility for AllReadable {
    fn is_readable(&self, _entity: Entity<'_>) -> bool {
        true
    }
}

/// Visibility decided by a predicate.
#[derive(Debug, Clone, Copy)]
pub struct ReadableIf<F>(pub F);

impl<F> Visibility for ReadableIf<F>
where
    F: Fn(Entity<'_>) -> bool,
{
    fn is_readable(&self, entity: Entity<'_>) -> bool {
        (self.0)(entity)
    }
}

impl Entity<'_> {
    pub fn name(&self) -> &str {
        match self {
            Entity::Table(table) => &table.name,
            Entity::Column(column) => &column.name,
            Entity::Constraint(constraint) => &constraint.name,
            Entity::Procedure(procedure) => &procedure.name,
        }
    }
}
