mod column;
pub use column::{Column, ColumnId};

mod constraint;
pub use constraint::{Constraint, ConstraintId, ConstraintKind};

mod procedure;
pub use procedure::{Procedure, ProcedureId};

mod schema;
pub use schema::Schema;

mod table;
pub use table::{Table, TableId};

mod ty;
pub use ty::{Type, TypeCategory, TypeId};
