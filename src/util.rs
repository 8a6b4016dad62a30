use std::cell::Cell;

use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, HtmlImageElement, HtmlObjectElement};

use crate::model::{MediaKind, MediaSource};
use crate::state::{MediaMetrics, Size};

thread_local! {
    static DEBUG: Cell<bool> = const { Cell::new(false) };
}

pub fn set_debug(enabled: bool) {
    DEBUG.with(|d| d.set(enabled));
}

pub fn clog(msg: &str) {
    if DEBUG.with(|d| d.get()) {
        gloo::console::log!(msg);
    }
}

/// Attribute values read off a `[data-viewer]` trigger and its descendants.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TriggerAttrs {
    pub src: Option<String>,
    pub svg: Option<String>,
    pub alt: Option<String>,
    pub img_src: Option<String>,
    pub img_alt: Option<String>,
    pub object_data: Option<String>,
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.is_empty())
}

impl TriggerAttrs {
    pub fn read(el: &Element) -> Self {
        let img = el
            .query_selector("img")
            .ok()
            .flatten()
            .and_then(|e| e.dyn_into::<HtmlImageElement>().ok());
        let object = el
            .query_selector("object")
            .ok()
            .flatten()
            .and_then(|e| e.dyn_into::<HtmlObjectElement>().ok());
        Self {
            src: el.get_attribute("data-viewer-src"),
            svg: el.get_attribute("data-viewer-svg"),
            alt: el.get_attribute("data-viewer-alt"),
            img_src: img.as_ref().map(|i| i.src()),
            img_alt: img.as_ref().map(|i| i.alt()),
            object_data: object.map(|o| o.data()),
        }
    }

    /// Explicit attributes win over descendant media; a vector source wins over raster.
    pub fn resolve(self) -> MediaSource {
        let alt = non_empty(self.alt)
            .or_else(|| non_empty(self.img_alt))
            .unwrap_or_default();
        if let Some(svg) = non_empty(self.svg) {
            return MediaSource {
                src: svg,
                alt,
                kind: MediaKind::Vector,
            };
        }
        let src = non_empty(self.src)
            .or_else(|| non_empty(self.img_src))
            .or_else(|| non_empty(self.object_data))
            .unwrap_or_default();
        MediaSource {
            src,
            alt,
            kind: MediaKind::Raster,
        }
    }
}

pub fn client_size(el: &Element) -> Size {
    Size::new(el.client_width() as f64, el.client_height() as f64)
}

/// Reads every size the fit fallback chain may need from the first child of
/// the content mount; `None` when nothing is mounted.
pub fn measure_media(content: &Element) -> Option<MediaMetrics> {
    let el = content.first_element_child()?;
    let natural = el
        .dyn_ref::<HtmlImageElement>()
        .map(|img| Size::new(img.natural_width() as f64, img.natural_height() as f64))
        .unwrap_or_default();
    let rect = el.get_bounding_client_rect();
    Some(MediaMetrics {
        natural,
        scroll: Size::new(el.scroll_width() as f64, el.scroll_height() as f64),
        rendered: Size::new(rect.width(), rect.height()),
        client: client_size(&el),
    })
}

/// Client coordinates relative to the element's top-left corner.
pub fn local_point(el: &Element, client_x: i32, client_y: i32) -> (f64, f64) {
    let rect = el.get_bounding_client_rect();
    (client_x as f64 - rect.left(), client_y as f64 - rect.top())
}

pub fn set_page_scroll_locked(locked: bool) {
    let body: Option<HtmlElement> = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body());
    if let Some(body) = body {
        let style = body.style();
        let _ = if locked {
            style.set_property("overflow", "hidden")
        } else {
            style.set_property("overflow", "")
        };
    }
}
