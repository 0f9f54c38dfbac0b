//! Aggregate closers and release them in reverse order.
//!
//! Resources are usually registered in the order they are acquired. Closing
//! walks the list backwards so that a resource is released before the ones it
//! may depend on.

use crate::closer::Closer;
use ioclose_core::{Error, Result};
use std::fmt;
use tracing::{debug, trace, warn};

type Callback<'a> = Box<dyn FnOnce() -> Result<()> + 'a>;

/// An ordered list of pending close operations.
///
/// Every registered operation runs exactly once per close pass, even if an
/// earlier one failed, and the first error is reported. After a pass the list
/// is empty and can be filled again. Operations still pending when the
/// aggregator is dropped are closed at that point.
///
/// Not synchronized: share it across threads only behind a lock.
///
/// ```
/// use ioclose::{Closers, Error};
/// use std::cell::RefCell;
///
/// let order = RefCell::new(Vec::new());
/// let mut closers = Closers::new();
/// closers.push_fn(|| {
///     order.borrow_mut().push("connection");
///     Ok(())
/// });
/// closers.push_fn(|| {
///     order.borrow_mut().push("statement");
///     Err(Error::close("statement", "cursor still open"))
/// });
///
/// let err = closers.close().unwrap_err();
/// assert_eq!(err.to_string(), "failed to close statement: cursor still open");
/// assert_eq!(*order.borrow(), ["statement", "connection"]);
/// assert!(closers.is_empty());
/// ```
pub struct Closers<'a> {
    pending: Vec<Callback<'a>>,
}

impl<'a> Closers<'a> {
    /// Create an empty aggregator
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    /// Create an empty aggregator with room for `capacity` closers
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pending: Vec::with_capacity(capacity),
        }
    }

    /// Number of pending close operations
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Record one closer. Absent closers are skipped.
    pub fn push<C>(&mut self, mut closer: C) -> &mut Self
    where
        C: Closer + 'a,
    {
        if closer.is_absent() {
            trace!("skipping absent closer");
            return self;
        }
        self.pending.push(Box::new(move || closer.close()));
        trace!(pending = self.pending.len(), "recorded closer");
        self
    }

    /// Record every closer yielded by `closers`, in order.
    pub fn append<I>(&mut self, closers: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Closer + 'a,
    {
        for closer in closers {
            self.push(closer);
        }
        self
    }

    /// Record one bare close function
    pub fn push_fn<F>(&mut self, f: F) -> &mut Self
    where
        F: FnOnce() -> Result<()> + 'a,
    {
        self.pending.push(Box::new(f));
        trace!(pending = self.pending.len(), "recorded close function");
        self
    }

    /// Record every present function yielded by `fns`, in order. `None`
    /// entries are skipped.
    pub fn append_fn<I, F>(&mut self, fns: I) -> &mut Self
    where
        I: IntoIterator<Item = Option<F>>,
        F: FnOnce() -> Result<()> + 'a,
    {
        for f in fns {
            match f {
                Some(f) => {
                    self.push_fn(f);
                }
                None => trace!("skipping absent close function"),
            }
        }
        self
    }

    /// Run every pending operation, last registered first, and return the
    /// first error.
    ///
    /// The aggregator is empty afterwards, so a second call is a no-op.
    pub fn close(&mut self) -> Result<()> {
        let pending = std::mem::take(&mut self.pending);
        if pending.is_empty() {
            return Ok(());
        }

        debug!(count = pending.len(), "closing resources");
        let mut first_error = None;
        let mut failures = 0usize;

        for callback in pending.into_iter().rev() {
            if let Err(error) = callback() {
                failures += 1;
                debug!(%error, "close operation failed");
                if first_error.is_none() {
                    first_error = Some(error);
                }
            }
        }

        debug!(failures, "close pass complete");
        match first_error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    /// Close and merge the outcome into `slot`.
    ///
    /// The close error is stored only if `slot` is still empty; an error that
    /// is already there is never overwritten.
    pub fn close_deferred(&mut self, slot: &mut Option<Error>) {
        if let Err(error) = self.close() {
            if slot.is_none() {
                *slot = Some(error);
            } else {
                debug!(%error, "dropping close error, an earlier error is kept");
            }
        }
    }

    /// Close and merge the outcome with `result`.
    ///
    /// An `Err` in `result` wins over any close error. Otherwise a close error
    /// replaces the value.
    pub fn finish<T>(mut self, result: Result<T>) -> Result<T> {
        let closed = self.close();
        match result {
            Ok(value) => closed.map(|()| value),
            Err(error) => {
                if let Err(close_error) = closed {
                    debug!(error = %close_error, "dropping close error, an earlier error is kept");
                }
                Err(error)
            }
        }
    }

    /// Forget pending operations without running them.
    ///
    /// Owned closers are still dropped, so their own `Drop` impls run.
    pub fn dismiss(&mut self) {
        if !self.pending.is_empty() {
            debug!(count = self.pending.len(), "dismissing pending closers");
            self.pending.clear();
        }
    }
}

impl Default for Closers<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Closers<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Closers")
            .field("pending", &self.pending.len())
            .finish()
    }
}

impl Drop for Closers<'_> {
    fn drop(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        if let Err(error) = self.close() {
            warn!(%error, "failed to close resources on drop");
        }
    }
}
