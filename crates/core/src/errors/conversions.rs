//! Conversion implementations for error types

use super::types::Error;

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::Io {
            operation: "unknown".to_string(),
            source: error,
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(error: anyhow::Error) -> Self {
        Error::Internal {
            message: format!("{error:#}"),
        }
    }
}
