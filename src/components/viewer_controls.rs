use crate::model::Command;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ViewerControlsProps {
    pub on_command: Callback<Command>,
}

#[function_component(ViewerControls)]
pub fn viewer_controls(props: &ViewerControlsProps) -> Html {
    let button = |class: &'static str, title: &'static str, label: &'static str, cmd: Command| {
        let cb = props.on_command.clone();
        let onclick = Callback::from(move |_: MouseEvent| cb.emit(cmd));
        html! { <button type="button" class={class} title={title} {onclick}>{ label }</button> }
    };
    html! {<div class="viewer-controls">
        { button("btn-zout", "Zoom out (-)", "−", Command::ZoomOut) }
        { button("btn-zin", "Zoom in (+)", "+", Command::ZoomIn) }
        { button("btn-fit", "Fit to view (0)", "Fit", Command::Fit) }
        { button("btn-one", "Actual size (1)", "1:1", Command::Native) }
        { button("btn-close", "Close (Esc)", "✕", Command::Close) }
    </div>}
}
