use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ZoomIndicatorProps {
    pub label: String,
    pub visible: bool,
}

#[function_component(ZoomIndicator)]
pub fn zoom_indicator(props: &ZoomIndicatorProps) -> Html {
    html! {<div class={classes!("viewer-zoom-info", props.visible.then_some("visible"))}>
        { props.label.clone() }
    </div>}
}
