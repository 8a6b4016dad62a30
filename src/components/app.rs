use super::viewer_overlay::ViewerOverlay;
use crate::config::ViewerConfig;
use crate::reveal::Reveal;
use web_sys::Element;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct AppProps {
    pub root: Element,
    pub config: ViewerConfig,
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    // Page-wide fade-in; lives as long as the app, independent of the overlay
    {
        let threshold = props.config.reveal_threshold;
        use_effect_with((), move |_| {
            let reveal = web_sys::window()
                .and_then(|w| w.document())
                .map(|doc| Reveal::install(&doc, threshold));
            let reveal = match reveal {
                Some(Ok(r)) => Some(r),
                Some(Err(err)) => {
                    gloo::console::warn!(format!("viewer: fade-in disabled: {err}"));
                    None
                }
                None => None,
            };
            move || drop(reveal)
        });
    }

    html! { <ViewerOverlay root={props.root.clone()} config={props.config} /> }
}
