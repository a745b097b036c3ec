//! # Web
//!
//! The Web backend binds the registry from [`resize_events_core`] to the
//! browser's [`ResizeObserver`] with [`wasm-bindgen`][wasm_bindgen]. One
//! observer is created per observed [`Element`]; its notification batches are
//! converted into change records and fed to the registry's dispatcher.
//!
//! Besides the [`DomObservationSource`] building block, the crate exposes a
//! process-wide registry behind [`add_resize_listener`] and
//! [`remove_resize_listener`]:
//!
//! ```no_run
//! # fn scope(element: &web_sys::Element) {
//! use resize_events_core::listener::ResizeListener;
//! use resize_events_web::{add_resize_listener, remove_resize_listener};
//!
//! let listener = ResizeListener::new(|| tracing::debug!("element was resized"));
//! add_resize_listener(element, &listener);
//! // ... later; any clone of the handle works as the removal token.
//! remove_resize_listener(element, &listener);
//! # }
//! ```
//!
//! Both entry points detect whether a browsing context is available and
//! become no-ops when it is not, so the crate is safe to link and call in
//! non-interactive evaluation contexts (server-side rendering, worker
//! threads).
//!
//! [`ResizeObserver`]: https://developer.mozilla.org/en-US/docs/Web/API/ResizeObserver
//! [wasm_bindgen]: https://docs.rs/wasm-bindgen

mod observer;

use resize_events_core::listener::ResizeListener;
use resize_events_core::registry::ResizeListeners;
use web_sys::Element;

pub use self::observer::{BoxModel, DomObservationSource, ObserverAttributes, ResizeObserverHandle};

thread_local! {
    static LISTENERS: ResizeListeners<Element, DomObservationSource> =
        ResizeListeners::new(DomObservationSource::default());
}

/// Register `listener` to run whenever `element`'s box size changes.
///
/// Uses one process-wide registry with default [`ObserverAttributes`].
/// Registering the same listener twice keeps both occurrences. Outside a
/// browsing context this is a no-op.
pub fn add_resize_listener(element: &Element, listener: &ResizeListener) {
    LISTENERS.with(|listeners| listeners.register(element, listener));
}

/// Remove a listener previously registered with [`add_resize_listener`].
///
/// Removes the first matching occurrence; the underlying observer is
/// disconnected when the element's last listener goes away. Unknown elements
/// and listeners are ignored. Outside a browsing context this is a no-op.
pub fn remove_resize_listener(element: &Element, listener: &ResizeListener) {
    LISTENERS.with(|listeners| listeners.unregister(element, listener));
}
