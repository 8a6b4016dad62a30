// One-shot fade-in for `.fade-in` elements as they scroll into view.
use js_sys::Array;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};

use crate::error::ViewerError;

pub const FADE_SELECTOR: &str = ".fade-in";
pub const REVEALED_CLASS: &str = "visible";

/// Keeps the observer and its callback alive; drop or `disconnect` to stop.
pub struct Reveal {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl Reveal {
    pub fn install(document: &Document, threshold: f64) -> Result<Self, ViewerError> {
        let on_intersect = move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if entry.is_intersecting() {
                    let target: Element = entry.target();
                    let _ = target.class_list().add_1(REVEALED_CLASS);
                    observer.unobserve(&target);
                }
            }
        };
        let callback =
            Closure::wrap(Box::new(on_intersect) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(threshold));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;

        let nodes = document.query_selector_all(FADE_SELECTOR)?;
        let mut watched = 0;
        for i in 0..nodes.length() {
            if let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                observer.observe(&el);
                watched += 1;
            }
        }
        crate::util::clog(&format!("reveal: observing {watched} elements"));

        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    pub fn disconnect(&self) {
        self.observer.disconnect();
    }
}

impl Drop for Reveal {
    fn drop(&mut self) {
        self.disconnect();
    }
}
