//! The contract between the registry and a size-observation primitive.

use std::fmt;
use std::rc::Rc;

use dpi::LogicalSize;

use crate::error::NotSupportedError;

/// One record in a change batch: an element whose box size changed, together
/// with its new content size in logical (CSS pixel) space.
#[derive(Clone, Debug, PartialEq)]
pub struct SizeChange<E> {
    /// The element the record concerns.
    pub element: E,
    /// The element's new content size.
    pub size: LogicalSize<f64>,
}

/// Shared fan-out routine injected into every subscription.
///
/// The registry creates one dispatcher at construction and hands a clone of
/// it to the source for every element it starts observing. A source delivers
/// change batches by calling [`dispatch`](Self::dispatch); the registry then
/// invokes the affected listeners.
pub struct Dispatcher<E> {
    deliver: Rc<dyn Fn(&[SizeChange<E>])>,
}

impl<E> Dispatcher<E> {
    pub(crate) fn new(deliver: impl Fn(&[SizeChange<E>]) + 'static) -> Self {
        Self { deliver: Rc::new(deliver) }
    }

    /// Deliver one batch of change records to the registry.
    pub fn dispatch(&self, changes: &[SizeChange<E>]) {
        (self.deliver)(changes)
    }
}

impl<E> Clone for Dispatcher<E> {
    fn clone(&self) -> Self {
        Self { deliver: Rc::clone(&self.deliver) }
    }
}

impl<E> fmt::Debug for Dispatcher<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher").finish_non_exhaustive()
    }
}

/// A size-observation primitive.
///
/// Implementations wrap whatever mechanism the host environment provides for
/// detecting geometry changes. The registry asks for one subscription per
/// observed element and drops the returned handle to cancel it.
pub trait ObservationSource<E> {
    /// Subscription guard for one element. Dropping it must synchronously
    /// stop delivery for that subscription.
    type Handle;

    /// Probe whether the environment can observe sizes at all.
    ///
    /// Consulted at the top of every public registry operation; when the
    /// probe fails the operation degrades to a no-op.
    fn check(&self) -> Result<(), NotSupportedError>;

    /// Start observing `element`, delivering change batches to `dispatcher`.
    fn observe(&self, element: &E, dispatcher: Dispatcher<E>) -> Self::Handle;
}
