//! Per-element resize notification fan-out.
//!
//! This crate lets arbitrary observed elements emit a callback whenever their
//! box size changes. It is a thin adapter over a size-observation primitive:
//! one shared subscription is attached per element, and incoming change
//! batches are fanned out to the element's registered listeners in
//! registration order. Subscriptions are created lazily on the first
//! registration and torn down when the last listener for an element is
//! removed.
//!
//! The platform-independent registry lives in [`resize_events_core`] and is
//! re-exported here. On Web targets the [`ResizeObserver`]-backed
//! implementation from `resize-events-web` is re-exported as well, along with
//! the global `add_resize_listener` / `remove_resize_listener` entry points.
//! In environments without a presentation surface those entry points are
//! silent no-ops, so the crate is safe to evaluate outside a browsing
//! context.
//!
//! [`ResizeObserver`]: https://developer.mozilla.org/en-US/docs/Web/API/ResizeObserver

pub use resize_events_core::error::NotSupportedError;
pub use resize_events_core::listener::ResizeListener;
pub use resize_events_core::registry::ResizeListeners;
pub use resize_events_core::source::{Dispatcher, ObservationSource, SizeChange};

#[cfg(web_platform)]
pub use resize_events_web::{
    add_resize_listener, remove_resize_listener, BoxModel, DomObservationSource,
    ObserverAttributes, ResizeObserverHandle,
};
