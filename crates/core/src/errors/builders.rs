//! Builder methods for creating errors with context

use super::types::Error;

impl Error {
    /// Create a close error for a named resource
    ///
    /// An empty `resource` displays the message alone.
    #[must_use]
    pub fn close(resource: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Close {
            resource: resource.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a close error carrying the underlying cause
    #[must_use]
    pub fn close_with_source(
        resource: impl Into<String>,
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Error::Close {
            resource: resource.into(),
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create an I/O error tagged with the operation that failed
    #[must_use]
    pub fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        Error::Io {
            operation: operation.into(),
            source,
        }
    }
}
