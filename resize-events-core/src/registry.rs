//! Per-element listener registry.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, trace, warn};

use crate::listener::ResizeListener;
use crate::source::{Dispatcher, ObservationSource, SizeChange};

struct Entry<E, H> {
    element: E,
    listeners: Vec<ResizeListener>,
    // Subscription guard; dropped together with the entry.
    _handle: H,
}

type Entries<E, H> = Rc<RefCell<Vec<Entry<E, H>>>>;

/// Per-element resize listener registry.
///
/// Attaches one subscription from the [`ObservationSource`] per observed
/// element and fans incoming change batches out to that element's listeners
/// in registration order. A subscription is created lazily on the first
/// registration for an element and torn down when its last listener is
/// removed.
///
/// The registry is single-threaded; all mutation happens on the thread the
/// host environment delivers change batches on.
pub struct ResizeListeners<E, S: ObservationSource<E>> {
    source: S,
    dispatcher: Dispatcher<E>,
    entries: Entries<E, S::Handle>,
}

impl<E, S> ResizeListeners<E, S>
where
    E: Clone + PartialEq + 'static,
    S: ObservationSource<E>,
    S::Handle: 'static,
{
    /// Create a registry delivering through `source`.
    pub fn new(source: S) -> Self {
        let entries: Entries<E, S::Handle> = Rc::new(RefCell::new(Vec::new()));
        let dispatcher = Self::dispatcher(&entries);
        Self { source, dispatcher, entries }
    }

    /// Register `listener` to run whenever `element`'s box size changes.
    ///
    /// The first registration for an element creates its subscription.
    /// Duplicate registrations are kept: the same listener registered twice
    /// runs twice per change and must be unregistered twice.
    ///
    /// In an environment without resize observation this is a no-op.
    pub fn register(&self, element: &E, listener: &ResizeListener) {
        if self.source.check().is_err() {
            warn!("resize observation unsupported, ignoring listener registration");
            return;
        }

        let known = self.entries.borrow().iter().any(|entry| entry.element == *element);
        if !known {
            let handle = self.source.observe(element, self.dispatcher.clone());
            self.entries.borrow_mut().push(Entry {
                element: element.clone(),
                listeners: Vec::new(),
                _handle: handle,
            });
            debug!("started observing element");
        }

        let mut entries = self.entries.borrow_mut();
        if let Some(entry) = entries.iter_mut().find(|entry| entry.element == *element) {
            entry.listeners.push(listener.clone());
            trace!("registered resize listener ({} total)", entry.listeners.len());
        }
    }

    /// Remove a previously registered `listener` from `element`.
    ///
    /// Matches by listener identity and removes the first occurrence only.
    /// Unregistering the last listener for an element synchronously tears its
    /// subscription down; a later registration starts a fresh one. Unknown
    /// elements and unknown listeners are ignored.
    pub fn unregister(&self, element: &E, listener: &ResizeListener) {
        if self.source.check().is_err() {
            warn!("resize observation unsupported, ignoring listener removal");
            return;
        }

        let mut entries = self.entries.borrow_mut();
        let Some(index) = entries.iter().position(|entry| entry.element == *element) else {
            return;
        };

        let listeners = &mut entries[index].listeners;
        let Some(found) = listeners.iter().position(|registered| registered == listener) else {
            return;
        };
        listeners.remove(found);
        trace!("unregistered resize listener ({} remaining)", listeners.len());

        if listeners.is_empty() {
            // Dropping the entry drops the subscription handle.
            entries.remove(index);
            debug!("stopped observing element");
        }
    }

    /// The number of listeners currently registered for `element`.
    pub fn listener_count(&self, element: &E) -> usize {
        self.entries
            .borrow()
            .iter()
            .find(|entry| entry.element == *element)
            .map_or(0, |entry| entry.listeners.len())
    }

    fn dispatcher(entries: &Entries<E, S::Handle>) -> Dispatcher<E> {
        let entries = Rc::downgrade(entries);
        Dispatcher::new(move |changes: &[SizeChange<E>]| {
            let Some(entries) = entries.upgrade() else {
                return;
            };

            for change in changes {
                // Snapshot the list so a listener may mutate the registry;
                // re-entrant changes take effect from the next batch on.
                let listeners = entries
                    .borrow()
                    .iter()
                    .find(|entry| entry.element == change.element)
                    .map(|entry| entry.listeners.clone());

                match listeners {
                    Some(listeners) => {
                        trace!("dispatching resize to {} listener(s)", listeners.len());
                        for listener in &listeners {
                            listener.call();
                        }
                    },
                    // A primitive may still deliver a batch queued before
                    // teardown.
                    None => trace!("dropping change record for unobserved element"),
                }
            }
        })
    }
}
