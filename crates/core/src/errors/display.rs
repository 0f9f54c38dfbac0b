//! Display implementations for error types

use super::types::Error;
use std::fmt;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Close {
                resource, message, ..
            } => {
                if resource.is_empty() {
                    write!(f, "{message}")
                } else {
                    write!(f, "failed to close {resource}: {message}")
                }
            }
            Error::Io { operation, source } => {
                write!(f, "I/O error during {operation}: {source}")
            }
            Error::Context { message, source } => write!(f, "{message}: {source}"),
            Error::Internal { message } => write!(f, "internal error: {message}"),
        }
    }
}
