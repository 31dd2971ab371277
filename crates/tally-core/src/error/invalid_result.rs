use super::Error;

/// Error when a parent result row does not have the shape the generated
/// schema promised.
///
/// Every aggregate field adds its projection while the query is planned, so a
/// missing alias on the parent row is a defect in the host, not bad input.
#[derive(Debug)]
pub(super) struct InvalidResult {
    message: Box<str>,
}

impl std::error::Error for InvalidResult {}

impl core::fmt::Display for InvalidResult {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid result: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid result error.
    pub fn invalid_result(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidResult(InvalidResult {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error or one of its causes is an invalid result error.
    pub fn is_invalid_result(&self) -> bool {
        self.has_kind(|kind| matches!(kind, super::ErrorKind::InvalidResult(_)))
    }
}
