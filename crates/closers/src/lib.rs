//! Close several resources together.
//!
//! Programs that hold several handles at once (files, sockets, prepared
//! statements) need to release all of them at scope exit, even when one of
//! them fails to close. This crate provides:
//!
//! - **`closer`**: the [`Closer`] trait, the [`CloserFn`] adapter for bare
//!   functions, and [`close_all`] for closing a fixed set of values in order.
//! - **`closers`**: the [`Closers`] aggregator, which records closers as they
//!   are acquired and closes them in reverse order.
//! - **`io`**: `Closer` implementations for standard library I/O handles.
//!
//! In both `close_all` and `Closers::close` every closer is attempted and the
//! first error encountered is returned; later errors are dropped.

pub mod closer;
pub mod closers;
pub mod io;

pub use closer::{close_all, closer_fn, Closer, CloserFn};
pub use closers::Closers;
pub use ioclose_core::{Error, Result, ResultExt};
