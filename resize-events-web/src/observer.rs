use dpi::LogicalSize;
use js_sys::{Array, Object};
use resize_events_core::error::NotSupportedError;
use resize_events_core::source::{Dispatcher, ObservationSource, SizeChange};
use tracing::warn;
use wasm_bindgen::prelude::{wasm_bindgen, Closure};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Element, ResizeObserver, ResizeObserverBoxOptions, ResizeObserverEntry, ResizeObserverOptions,
};

/// Which box of an observed element triggers notifications.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum BoxModel {
    /// The CSS content box, excluding borders and padding. The primitive's
    /// default.
    #[default]
    ContentBox,
    /// The CSS border box, including borders and padding.
    BorderBox,
    /// The content box in device pixels.
    ///
    /// Falls back to [`ContentBox`](Self::ContentBox) in browsers without
    /// `device-pixel-content-box` support.
    DevicePixelContentBox,
}

/// Attributes used when building observer subscriptions.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ObserverAttributes {
    box_model: BoxModel,
}

impl ObserverAttributes {
    /// Selects which box geometry changes are reported for.
    ///
    /// The default is [`BoxModel::ContentBox`].
    #[inline]
    pub fn with_box_model(mut self, box_model: BoxModel) -> Self {
        self.box_model = box_model;
        self
    }
}

/// [`ObservationSource`] over the browser's `ResizeObserver`.
#[derive(Clone, Debug, Default)]
pub struct DomObservationSource {
    attributes: ObserverAttributes,
}

impl DomObservationSource {
    /// Create a source building observers with the given attributes.
    pub fn new(attributes: ObserverAttributes) -> Self {
        Self { attributes }
    }
}

impl ObservationSource<Element> for DomObservationSource {
    type Handle = ResizeObserverHandle;

    fn check(&self) -> Result<(), NotSupportedError> {
        if has_browsing_context() {
            Ok(())
        } else {
            Err(NotSupportedError::new())
        }
    }

    fn observe(&self, element: &Element, dispatcher: Dispatcher<Element>) -> ResizeObserverHandle {
        ResizeObserverHandle::new(element, self.attributes.box_model, dispatcher)
    }
}

/// Subscription guard around one `ResizeObserver`; disconnects on drop.
pub struct ResizeObserverHandle {
    observer: ResizeObserver,
    _closure: Closure<dyn FnMut(Array)>,
}

impl ResizeObserverHandle {
    fn new(element: &Element, box_model: BoxModel, dispatcher: Dispatcher<Element>) -> Self {
        let closure = Closure::new(move |entries: Array| {
            let changes: Vec<_> = entries.iter().filter_map(process_entry).collect();
            dispatcher.dispatch(&changes);
        });
        let observer = ResizeObserver::new(closure.as_ref().unchecked_ref())
            .expect("Failed to create `ResizeObserver`");

        match box_model {
            BoxModel::ContentBox => observer.observe(element),
            BoxModel::BorderBox => {
                observer
                    .observe_with_options(element, &box_options(ResizeObserverBoxOptions::BorderBox));
            },
            // Safari doesn't support `devicePixelContentBoxSize`
            BoxModel::DevicePixelContentBox if has_device_pixel_support() => {
                observer.observe_with_options(
                    element,
                    &box_options(ResizeObserverBoxOptions::DevicePixelContentBox),
                );
            },
            BoxModel::DevicePixelContentBox => observer.observe(element),
        }

        Self { observer, _closure: closure }
    }
}

impl Drop for ResizeObserverHandle {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

fn box_options(r#box: ResizeObserverBoxOptions) -> ResizeObserverOptions {
    let options = ResizeObserverOptions::new();
    options.set_box(r#box);
    options
}

fn process_entry(entry: JsValue) -> Option<SizeChange<Element>> {
    if !entry.has_type::<ResizeObserverEntry>() {
        warn!("skipping malformed entry in resize observer batch");
        return None;
    }
    let entry: ResizeObserverEntry = entry.unchecked_into();

    // `contentRect` is in CSS pixels regardless of the observed box.
    let rect = entry.content_rect();
    Some(SizeChange {
        element: entry.target(),
        size: LogicalSize::new(rect.width(), rect.height()),
    })
}

fn has_browsing_context() -> bool {
    thread_local! {
        static BROWSING_CONTEXT: bool = {
            #[wasm_bindgen]
            extern "C" {
                type Global;

                #[wasm_bindgen(method, getter, js_name = Window)]
                fn window(this: &Global) -> JsValue;
            }

            let global: Global = js_sys::global().unchecked_into();
            !global.window().is_undefined()
        };
    }

    BROWSING_CONTEXT.with(|context| *context)
}

fn has_device_pixel_support() -> bool {
    thread_local! {
        static DEVICE_PIXEL_SUPPORT: bool = {
            #[wasm_bindgen]
            extern "C" {
                type ResizeObserverEntryExt;

                #[wasm_bindgen(js_class = ResizeObserverEntry, static_method_of = ResizeObserverEntryExt, getter)]
                fn prototype() -> Object;
            }

            let prototype = ResizeObserverEntryExt::prototype();
            let descriptor = Object::get_own_property_descriptor(
                &prototype,
                &JsValue::from_str("devicePixelContentBoxSize"),
            );
            !descriptor.is_undefined()
        };
    }

    DEVICE_PIXEL_SUPPORT.with(|support| *support)
}
