use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("no global `window`")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("overlay root `#{0}` not found")]
    MissingOverlayRoot(String),
    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for ViewerError {
    fn from(value: JsValue) -> Self {
        let msg = value
            .as_string()
            .or_else(|| js_sys::JSON::stringify(&value).ok().map(String::from))
            .unwrap_or_else(|| format!("{value:?}"));
        ViewerError::Js(msg)
    }
}
