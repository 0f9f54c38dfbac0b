//! The close capability and helpers that work on individual closers

use ioclose_core::Result;
use std::fmt;
use tracing::{debug, trace};

/// A resource that can be released, reporting whether that succeeded.
pub trait Closer {
    /// Release the resource.
    fn close(&mut self) -> Result<()>;

    /// Whether this value stands in for a missing closer.
    ///
    /// Absent closers are skipped by [`close_all`] and are never recorded by
    /// [`Closers`](crate::Closers).
    fn is_absent(&self) -> bool {
        false
    }
}

impl<C: Closer + ?Sized> Closer for &mut C {
    fn close(&mut self) -> Result<()> {
        (**self).close()
    }

    fn is_absent(&self) -> bool {
        (**self).is_absent()
    }
}

impl<C: Closer + ?Sized> Closer for Box<C> {
    fn close(&mut self) -> Result<()> {
        (**self).close()
    }

    fn is_absent(&self) -> bool {
        (**self).is_absent()
    }
}

/// `None` is an absent closer; closing it succeeds without doing anything.
impl<C: Closer> Closer for Option<C> {
    fn close(&mut self) -> Result<()> {
        match self {
            Some(closer) => closer.close(),
            None => Ok(()),
        }
    }

    fn is_absent(&self) -> bool {
        self.as_ref().map_or(true, Closer::is_absent)
    }
}

/// Adapter turning a bare function into a [`Closer`].
///
/// An empty `CloserFn` closes successfully and does nothing.
pub struct CloserFn<F>(Option<F>);

impl<F> CloserFn<F>
where
    F: FnMut() -> Result<()>,
{
    /// Wrap `f` so it runs on every call to `close`
    pub fn new(f: F) -> Self {
        Self(Some(f))
    }
}

impl<F> CloserFn<F> {
    /// A closer with no function behind it
    pub fn empty() -> Self {
        Self(None)
    }

    /// Take back the wrapped function
    pub fn into_inner(self) -> Option<F> {
        self.0
    }
}

impl<F> From<Option<F>> for CloserFn<F> {
    fn from(f: Option<F>) -> Self {
        Self(f)
    }
}

impl<F> fmt::Debug for CloserFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloserFn")
            .field("present", &self.0.is_some())
            .finish()
    }
}

impl<F> Closer for CloserFn<F>
where
    F: FnMut() -> Result<()>,
{
    fn close(&mut self) -> Result<()> {
        match self.0.as_mut() {
            Some(f) => f(),
            None => Ok(()),
        }
    }

    fn is_absent(&self) -> bool {
        self.0.is_none()
    }
}

/// Shorthand for [`CloserFn::new`]
pub fn closer_fn<F>(f: F) -> CloserFn<F>
where
    F: FnMut() -> Result<()>,
{
    CloserFn::new(f)
}

/// Close every closer in the order given and return the first error.
///
/// Absent entries are skipped. A failure does not stop the remaining closers
/// from being closed; errors after the first are dropped.
///
/// ```
/// use ioclose::{close_all, closer_fn, Closer, Error};
///
/// let statements: Vec<Box<dyn Closer>> = vec![
///     Box::new(closer_fn(|| Ok(()))),
///     Box::new(closer_fn(|| Err(Error::close("insert", "still executing")))),
///     Box::new(closer_fn(|| Ok(()))),
/// ];
/// let err = close_all(statements).unwrap_err();
/// assert_eq!(err.to_string(), "failed to close insert: still executing");
/// ```
pub fn close_all<I>(closers: I) -> Result<()>
where
    I: IntoIterator,
    I::Item: Closer,
{
    let mut first_error = None;

    for (index, mut closer) in closers.into_iter().enumerate() {
        if closer.is_absent() {
            trace!(index, "skipping absent closer");
            continue;
        }
        if let Err(error) = closer.close() {
            debug!(index, %error, "closer failed");
            if first_error.is_none() {
                first_error = Some(error);
            }
        }
    }

    match first_error {
        Some(error) => Err(error),
        None => Ok(()),
    }
}
