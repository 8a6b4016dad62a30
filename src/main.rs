mod components;
mod config;
mod error;
mod model;
mod reveal;
mod state;
mod util;

use components::app::{App, AppProps};
use config::ViewerConfig;
use error::ViewerError;

pub const OVERLAY_ROOT_ID: &str = "viewer-overlay";

fn boot() -> Result<(), ViewerError> {
    let window = web_sys::window().ok_or(ViewerError::NoWindow)?;
    let document = window.document().ok_or(ViewerError::NoDocument)?;
    let root = document
        .get_element_by_id(OVERLAY_ROOT_ID)
        .ok_or_else(|| ViewerError::MissingOverlayRoot(OVERLAY_ROOT_ID.to_string()))?;
    let config = ViewerConfig::from_root(&root);
    util::set_debug(config.debug);
    util::clog(&format!("viewer: mounting with {config:?}"));
    yew::Renderer::<App>::with_root_and_props(root.clone(), AppProps { root, config }).render();
    Ok(())
}

fn main() {
    console_error_panic_hook::set_once();
    match boot() {
        Ok(()) => {}
        // pages without an overlay simply don't get the viewer
        Err(ViewerError::MissingOverlayRoot(_)) => {}
        Err(err) => gloo::console::warn!(format!("viewer disabled: {err}")),
    }
}
