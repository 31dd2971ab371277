use super::Error;

/// Error when a generated schema member would replace an existing one.
///
/// Generated types, fields and enum values are only ever added. When a name
/// is already taken the extension is rejected rather than silently
/// overwriting the previous entry.
#[derive(Debug)]
pub(super) struct NameCollision {
    name: Box<str>,
    reason: Box<str>,
}

impl std::error::Error for NameCollision {}

impl core::fmt::Display for NameCollision {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "a schema member named `{}` already exists ({})",
            self.name, self.reason
        )
    }
}

impl Error {
    /// Creates a name collision error. `reason` describes the extension that
    /// attempted to add the duplicate.
    pub fn name_collision(name: impl Into<String>, reason: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::NameCollision(NameCollision {
            name: name.into().into(),
            reason: reason.into().into(),
        }))
    }

    /// Returns `true` if this error or one of its causes is a name collision error.
    pub fn is_name_collision(&self) -> bool {
        self.has_kind(|kind| matches!(kind, super::ErrorKind::NameCollision(_)))
    }
}
