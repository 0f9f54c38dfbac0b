//! Core error types for the `ioclose` workspace.
//!
//! Every closer in the workspace reports failure through the single [`Error`]
//! enum defined here. The closing machinery never inspects it; it only decides
//! which error reaches the caller.
//!
//! ## Key Components
//!
//! - **`errors`**: Defines the `Error` enum, the `Result` alias and the
//!   `ResultExt` trait for attaching context to fallible close operations.

pub mod errors;

pub use self::errors::{Error, Result, ResultExt};
