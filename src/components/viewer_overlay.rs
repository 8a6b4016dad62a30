use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{
    AddEventListenerOptions, Element, HtmlElement, KeyboardEvent, MouseEvent, PointerEvent,
    WheelEvent,
};
use yew::prelude::*;

use super::media_view::MediaView;
use super::viewer_controls::ViewerControls;
use super::zoom_indicator::ZoomIndicator;
use crate::config::ViewerConfig;
use crate::model::{Command, MediaKind, ViewerAction, ViewerState};
use crate::state::{MediaMetrics, Size};
use crate::util::{
    TriggerAttrs, clog, client_size, local_point, measure_media, set_page_scroll_locked,
};

pub const TRIGGER_SELECTOR: &str = "[data-viewer]";
const ACTIVE_CLASS: &str = "active";

#[derive(Properties, PartialEq, Clone)]
pub struct ViewerOverlayProps {
    /// Page-level overlay root; receives the `active` class while open.
    pub root: Element,
    pub config: ViewerConfig,
}

/// The container and content mount, measured on demand by handlers.
#[derive(Clone, PartialEq)]
struct Stage {
    container: NodeRef,
    content: NodeRef,
}

impl Stage {
    fn container_size(&self) -> Size {
        self.container
            .cast::<Element>()
            .map(|c| client_size(&c))
            .unwrap_or_default()
    }

    fn metrics(&self) -> Option<MediaMetrics> {
        self.content.cast::<Element>().and_then(|c| measure_media(&c))
    }

    fn local(&self, client_x: i32, client_y: i32) -> (f64, f64) {
        match self.container.cast::<Element>() {
            Some(c) => local_point(&c, client_x, client_y),
            None => (client_x as f64, client_y as f64),
        }
    }

    fn command(&self, cmd: Command) -> ViewerAction {
        let container = self.container_size();
        match cmd {
            Command::Close => ViewerAction::Close,
            Command::Fit => ViewerAction::Fit {
                container,
                metrics: self.metrics(),
            },
            Command::ZoomIn => ViewerAction::ZoomIn { container },
            Command::ZoomOut => ViewerAction::ZoomOut { container },
            Command::Native => ViewerAction::ResetNative {
                container,
                metrics: self.metrics(),
            },
        }
    }
}

#[function_component(ViewerOverlay)]
pub fn viewer_overlay(props: &ViewerOverlayProps) -> Html {
    let config = props.config;
    let state = use_reducer(|| ViewerState::new(config));
    let container_ref = use_node_ref();
    let content_ref = use_node_ref();
    let stage = Stage {
        container: container_ref,
        content: content_ref,
    };
    let indicator_visible = use_state(|| false);
    let hide_timer = use_mut_ref(|| None::<Timeout>);
    let refit_timer = use_mut_ref(|| None::<Timeout>);
    let was_open = use_mut_ref(|| false);

    // Open/close side effects on the page
    {
        let root = props.root.clone();
        let refit_timer = refit_timer.clone();
        let was_open = was_open.clone();
        use_effect_with(state.is_open(), move |open| {
            let open = *open;
            if *was_open.borrow() != open {
                *was_open.borrow_mut() = open;
                let classes = root.class_list();
                if open {
                    let _ = classes.add_1(ACTIVE_CLASS);
                } else {
                    let _ = classes.remove_1(ACTIVE_CLASS);
                    refit_timer.borrow_mut().take();
                }
                set_page_scroll_locked(open);
                clog(if open { "viewer: opened" } else { "viewer: closed" });
            }
            || ()
        });
    }

    // Zoom indicator: show on every applied transform, hide after a quiet period.
    {
        let visible = indicator_visible.clone();
        let hide_timer = hide_timer.clone();
        let hide_ms = config.indicator_hide_ms;
        use_effect_with(state.version, move |version| {
            if *version > 0 {
                visible.set(true);
                let visible = visible.clone();
                // replacing the handle drops, and so cancels, the pending hide
                *hide_timer.borrow_mut() =
                    Some(Timeout::new(hide_ms, move || visible.set(false)));
            }
            || ()
        });
    }

    // Document listeners: keyboard shortcuts and `[data-viewer]` triggers
    {
        let dispatch = state.dispatcher();
        let stage = stage.clone();
        use_effect_with((), move |_| {
            let document = web_sys::window().and_then(|w| w.document());
            let keydown_cb = {
                let dispatch = dispatch.clone();
                let stage = stage.clone();
                Closure::wrap(Box::new(move |e: KeyboardEvent| {
                    // the reducer drops commands while closed
                    if let Some(cmd) = Command::from_key(&e.key()) {
                        dispatch.dispatch(stage.command(cmd));
                    }
                }) as Box<dyn FnMut(_)>)
            };
            let mut triggers: Vec<(Element, Closure<dyn FnMut(MouseEvent)>)> = Vec::new();
            if let Some(doc) = &document {
                let _ = doc.add_event_listener_with_callback(
                    "keydown",
                    keydown_cb.as_ref().unchecked_ref(),
                );
                if let Ok(nodes) = doc.query_selector_all(TRIGGER_SELECTOR) {
                    for i in 0..nodes.length() {
                        let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok())
                        else {
                            continue;
                        };
                        let click_cb = {
                            let dispatch = dispatch.clone();
                            let trigger = el.clone();
                            Closure::wrap(Box::new(move |_e: MouseEvent| {
                                let media = TriggerAttrs::read(&trigger).resolve();
                                clog(&format!("viewer: open {} ({:?})", media.src, media.kind));
                                dispatch.dispatch(ViewerAction::Open(media));
                            }) as Box<dyn FnMut(_)>)
                        };
                        let _ = el.add_event_listener_with_callback(
                            "click",
                            click_cb.as_ref().unchecked_ref(),
                        );
                        triggers.push((el, click_cb));
                    }
                }
                clog(&format!("viewer: {} triggers bound", triggers.len()));
            }
            // Cleanup
            move || {
                if let Some(doc) = &document {
                    let _ = doc.remove_event_listener_with_callback(
                        "keydown",
                        keydown_cb.as_ref().unchecked_ref(),
                    );
                }
                for (el, cb) in &triggers {
                    let _ = el.remove_event_listener_with_callback(
                        "click",
                        cb.as_ref().unchecked_ref(),
                    );
                }
            }
        });
    }

    // Wheel zoom; registered by hand because it must be non-passive to stop page scroll.
    {
        let dispatch = state.dispatcher();
        let container_ref = stage.container.clone();
        use_effect_with((), move |_| {
            let container = container_ref.cast::<HtmlElement>();
            let wheel_cb = {
                let container = container.clone();
                Closure::wrap(Box::new(move |e: WheelEvent| {
                    e.prevent_default();
                    let (x, y) = match &container {
                        Some(c) => local_point(c, e.client_x(), e.client_y()),
                        None => (0.0, 0.0),
                    };
                    dispatch.dispatch(ViewerAction::Wheel {
                        x,
                        y,
                        delta_y: e.delta_y(),
                    });
                }) as Box<dyn FnMut(_)>)
            };
            if let Some(c) = &container {
                let opts = AddEventListenerOptions::new();
                opts.set_passive(false);
                let _ = c.add_event_listener_with_callback_and_add_event_listener_options(
                    "wheel",
                    wheel_cb.as_ref().unchecked_ref(),
                    &opts,
                );
            }
            move || {
                if let Some(c) = &container {
                    let _ = c.remove_event_listener_with_callback(
                        "wheel",
                        wheel_cb.as_ref().unchecked_ref(),
                    );
                }
            }
        });
    }

    // Pan
    let onpointerdown = {
        let dispatch = state.dispatcher();
        let container = stage.container.clone();
        Callback::from(move |e: PointerEvent| {
            if e.button() != 0 {
                return;
            }
            if let Some(c) = container.cast::<Element>() {
                let _ = c.set_pointer_capture(e.pointer_id());
            }
            dispatch.dispatch(ViewerAction::PointerDown {
                x: e.client_x() as f64,
                y: e.client_y() as f64,
            });
        })
    };
    let onpointermove = {
        let dispatch = state.dispatcher();
        Callback::from(move |e: PointerEvent| {
            dispatch.dispatch(ViewerAction::PointerMove {
                x: e.client_x() as f64,
                y: e.client_y() as f64,
            });
        })
    };
    let end_drag = {
        let dispatch = state.dispatcher();
        Callback::from(move |_: PointerEvent| dispatch.dispatch(ViewerAction::PointerUp))
    };

    let ondblclick = {
        let dispatch = state.dispatcher();
        let stage = stage.clone();
        Callback::from(move |e: MouseEvent| {
            let (x, y) = stage.local(e.client_x(), e.client_y());
            dispatch.dispatch(ViewerAction::DoubleClick {
                x,
                y,
                container: stage.container_size(),
                metrics: stage.metrics(),
            });
        })
    };

    let on_command = {
        let dispatch = state.dispatcher();
        let stage = stage.clone();
        Callback::from(move |cmd: Command| dispatch.dispatch(stage.command(cmd)))
    };

    // Raster media fits on load; inline SVG settles its size a moment later.
    let on_media_load = {
        let dispatch = state.dispatcher();
        let stage = stage.clone();
        let refit_timer = refit_timer.clone();
        let session = state.session;
        let kind = state.media.as_ref().map(|m| m.kind);
        let delay = config.svg_refit_delay_ms;
        Callback::from(move |_: ()| {
            let fit = {
                let dispatch = dispatch.clone();
                let stage = stage.clone();
                move || {
                    if let Some(metrics) = stage.metrics() {
                        let container = stage.container_size();
                        clog(&format!("viewer: fit session {session} metrics {metrics:?}"));
                        dispatch.dispatch(ViewerAction::MediaLoaded {
                            session,
                            container,
                            metrics,
                        });
                    }
                }
            };
            match kind {
                Some(MediaKind::Vector) => {
                    *refit_timer.borrow_mut() = Some(Timeout::new(delay, fit));
                }
                _ => fit(),
            }
        })
    };

    let media = match &state.media {
        Some(media) => html! {
            <MediaView
                key={state.session.to_string()}
                media={media.clone()}
                on_load={on_media_load}
            />
        },
        None => html! {},
    };

    let content_style = format!("transform-origin:0 0; transform:{};", state.view.css());

    html! {<>
        <ViewerControls {on_command} />
        <div class="viewer-title">{ state.title().to_string() }</div>
        <div
            class={classes!("viewer-container", state.drag.is_dragging().then_some("dragging"))}
            ref={stage.container.clone()}
            {onpointerdown}
            {onpointermove}
            onpointerup={end_drag.clone()}
            onpointercancel={end_drag.clone()}
            onlostpointercapture={end_drag}
            {ondblclick}
        >
            <div
                class={classes!("viewer-content", (!state.animated).then_some("no-transition"))}
                ref={stage.content.clone()}
                style={content_style}
            >
                { media }
            </div>
        </div>
        <ZoomIndicator label={state.view.zoom_label()} visible={*indicator_visible} />
    </>}
}
