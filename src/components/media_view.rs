use crate::model::{MediaKind, MediaSource};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct MediaViewProps {
    pub media: MediaSource,
    pub on_load: Callback<()>,
}

// Renders the element directly (no wrapper) so it is the content mount's first child.
#[function_component(MediaView)]
pub fn media_view(props: &MediaViewProps) -> Html {
    let onload = {
        let cb = props.on_load.clone();
        Callback::from(move |_: Event| cb.emit(()))
    };
    match props.media.kind {
        MediaKind::Vector => html! {
            <object
                type="image/svg+xml"
                data={props.media.src.clone()}
                style="width:100%; height:auto;"
                {onload}
            ></object>
        },
        MediaKind::Raster => html! {
            <img
                src={props.media.src.clone()}
                alt={props.media.alt.clone()}
                draggable="false"
                {onload}
            />
        },
    }
}
