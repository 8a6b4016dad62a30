//! Overlay session state and the actions that drive it.
//! DOM measurements are taken by the component and carried in the action, so
//! everything here stays pure.

use std::rc::Rc;
use yew::Reducible;

use crate::config::ViewerConfig;
use crate::state::{DragState, MediaMetrics, Size, ViewTransform};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaKind {
    Raster,
    /// Embedded as `<object>` so it stays crisp at high zoom.
    Vector,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaSource {
    pub src: String,
    pub alt: String,
    pub kind: MediaKind,
}

/// Discrete commands shared by the control buttons and the keyboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Close,
    Fit,
    ZoomIn,
    ZoomOut,
    Native,
}

impl Command {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Escape" => Some(Command::Close),
            "+" | "=" => Some(Command::ZoomIn),
            "-" => Some(Command::ZoomOut),
            "0" => Some(Command::Fit),
            "1" => Some(Command::Native),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewerAction {
    Open(MediaSource),
    Close,
    /// Media finished loading for the given session.
    MediaLoaded { session: u32, container: Size, metrics: MediaMetrics },
    /// `metrics` is `None` when nothing is mounted; fitting is then a no-op.
    Fit { container: Size, metrics: Option<MediaMetrics> },
    ZoomIn { container: Size },
    ZoomOut { container: Size },
    ResetNative { container: Size, metrics: Option<MediaMetrics> },
    Wheel { x: f64, y: f64, delta_y: f64 },
    DoubleClick { x: f64, y: f64, container: Size, metrics: Option<MediaMetrics> },
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewerState {
    pub config: ViewerConfig,
    pub view: ViewTransform,
    pub drag: DragState,
    pub media: Option<MediaSource>,
    /// Bumped on every open; keys the mounted media element.
    pub session: u32,
    /// Bumped every time a transform is applied.
    pub version: u32,
    pub animated: bool,
}

impl ViewerState {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            view: ViewTransform::default(),
            drag: DragState::Idle,
            media: None,
            session: 0,
            version: 0,
            animated: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.media.is_some()
    }

    pub fn title(&self) -> &str {
        self.media.as_ref().map(|m| m.alt.as_str()).unwrap_or("")
    }

    fn apply(&mut self, animated: bool) {
        self.animated = animated;
        self.version = self.version.wrapping_add(1);
    }

    fn fit(&mut self, container: Size, metrics: MediaMetrics) -> bool {
        let media = metrics.extent(self.view.scale, container);
        let limits = self.config.limits();
        if !self.view.fit(container, media, self.config.fit_margin, limits) {
            return false;
        }
        self.apply(true);
        true
    }

    fn zoom_center(&mut self, container: Size, factor: f64) {
        let limits = self.config.limits();
        self.view
            .zoom_at(container.width / 2.0, container.height / 2.0, factor, limits);
        self.apply(true);
    }
}

impl Reducible for ViewerState {
    type Action = ViewerAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use ViewerAction::*;
        // Everything but Open is meaningless while the overlay is closed,
        // which also scopes the keyboard shortcuts to the open overlay.
        if !self.is_open() && !matches!(action, Open(_)) {
            return self;
        }
        let mut new = (*self).clone();
        match action {
            Open(media) => {
                new.view = ViewTransform::default();
                new.drag = DragState::Idle;
                new.animated = false;
                new.session = new.session.wrapping_add(1);
                new.media = Some(media);
            }
            Close => {
                new.media = None;
                new.drag = DragState::Idle;
            }
            MediaLoaded {
                session,
                container,
                metrics,
            } => {
                if session != new.session || !new.fit(container, metrics) {
                    return self;
                }
            }
            Fit { container, metrics } => match metrics {
                Some(metrics) if new.fit(container, metrics) => {}
                _ => return self,
            },
            ZoomIn { container } => {
                let factor = new.config.button_zoom_factor;
                new.zoom_center(container, factor);
            }
            ZoomOut { container } => {
                let factor = 1.0 / new.config.button_zoom_factor;
                new.zoom_center(container, factor);
            }
            ResetNative { container, metrics } => {
                let media = metrics
                    .unwrap_or_default()
                    .extent(new.view.scale, container);
                new.view.reset_to_native(container, media);
                new.apply(true);
            }
            Wheel { x, y, delta_y } => {
                let w = new.config.wheel_zoom_factor;
                let factor = if delta_y < 0.0 { w } else { 1.0 / w };
                let limits = new.config.limits();
                new.view.zoom_at(x, y, factor, limits);
                new.apply(false);
            }
            DoubleClick {
                x,
                y,
                container,
                metrics,
            } => {
                let cfg = new.config;
                let target = new.view.double_click_target(
                    cfg.double_click_threshold,
                    cfg.double_click_factor,
                    cfg.limits(),
                );
                if target == 1.0 {
                    match metrics {
                        Some(metrics) if new.fit(container, metrics) => {}
                        _ => return self,
                    }
                } else {
                    new.view.zoom_to(x, y, target, cfg.limits());
                    new.apply(true);
                }
            }
            PointerDown { x, y } => new.drag.begin(x, y),
            PointerMove { x, y } => match new.drag.move_to(x, y) {
                Some((dx, dy)) => {
                    new.view.pan_by(dx, dy);
                    new.apply(false);
                }
                None => return self,
            },
            PointerUp => {
                if !new.drag.release() {
                    return self;
                }
            }
        }
        new.into()
    }
}
