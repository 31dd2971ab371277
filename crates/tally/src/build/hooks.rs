use super::Build;
use crate::registry::{EnumValues, Fields, Scope};

use tally_core::Result;

use std::fmt;

pub type InitHook = fn(&mut Build<'_>) -> Result<()>;

pub type ObjectFieldsHook = fn(Fields, &mut Build<'_>, &FieldsContext) -> Result<Fields>;

pub type EnumValuesHook =
    fn(EnumValues, &mut Build<'_>, &EnumValuesContext) -> Result<EnumValues>;

/// Registers a plugin's hooks.
pub type Plugin = fn(&mut Hooks);

/// An extension point and the function to run there.
#[derive(Clone, Copy)]
pub enum Hook {
    /// Runs once when the build starts
    Init(InitHook),

    /// Runs for every object type created with hooks
    ObjectFields(ObjectFieldsHook),

    /// Runs for every enum type created with hooks
    EnumValues(EnumValuesHook),
}

/// Hooks registered by the plugins of one build, in registration order.
#[derive(Clone, Default)]
pub struct Hooks {
    pub(super) init: Vec<InitHook>,
    pub(super) object_fields: Vec<ObjectFieldsHook>,
    pub(super) enum_values: Vec<EnumValuesHook>,
}

/// The object type whose fields are being built.
#[derive(Debug, Clone)]
pub struct FieldsContext {
    pub type_name: String,

    pub scope: Scope,
}

/// The enum type whose values are being built.
#[derive(Debug, Clone)]
pub struct EnumValuesContext {
    pub type_name: String,

    pub scope: Scope,
}

impl Hooks {
    pub fn hook(&mut self, hook: Hook) -> &mut Self {
        match hook {
            Hook::Init(f) => self.init.push(f),
            Hook::ObjectFields(f) => self.object_fields.push(f),
            Hook::EnumValues(f) => self.enum_values.push(f),
        }
        self
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Hooks")
            .field("init", &self.init.len())
            .field("object_fields", &self.object_fields.len())
            .field("enum_values", &self.enum_values.len())
            .finish()
    }
}
