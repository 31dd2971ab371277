use super::Error;

/// Error when the introspected metadata bundle is inconsistent.
///
/// This occurs when:
/// - A shared scalar the generated types depend on (such as `JSON`) is not registered
/// - A foreign key references a table that is not part of the metadata
/// - A foreign key references key columns that cannot be found
///
/// These errors abort the whole synthesis pass.
#[derive(Debug)]
pub(super) struct InvalidSchema {
    message: Box<str>,
}

impl std::error::Error for InvalidSchema {}

impl core::fmt::Display for InvalidSchema {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid schema: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid schema error.
    pub fn invalid_schema(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidSchema(InvalidSchema {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error or one of its causes is an invalid schema error.
    pub fn is_invalid_schema(&self) -> bool {
        self.has_kind(|kind| matches!(kind, super::ErrorKind::InvalidSchema(_)))
    }
}
