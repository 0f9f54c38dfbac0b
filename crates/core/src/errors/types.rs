//! Core error type definitions

/// Result type alias for close operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error reported by a closer.
///
/// The aggregation logic treats this as opaque; the variants exist so that the
/// embedding application can tell what went wrong.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A resource refused or failed to release
    Close {
        resource: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O failure while flushing, syncing or shutting down a handle
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// Another error with a message attached by `ResultExt`
    Context {
        message: String,
        #[source]
        source: Box<Error>,
    },

    /// Errors raised through `anyhow` by caller-supplied close logic
    Internal { message: String },
}
