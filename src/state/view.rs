// View transform for the overlay content: translate then uniform scale,
// origin at the container's top-left corner.

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomLimits {
    pub min: f64,
    pub max: f64,
}

impl ZoomLimits {
    pub fn clamp(&self, scale: f64) -> f64 {
        scale.clamp(self.min, self.max)
    }
}

/// Raw size readings taken from the mounted media element. Any of them may be
/// zero (not laid out yet, SVG still loading) so `extent` walks a fallback chain.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MediaMetrics {
    pub natural: Size,
    pub scroll: Size,
    pub rendered: Size,
    pub client: Size,
}

fn usable(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

fn first_usable(candidates: &[f64]) -> Option<f64> {
    candidates.iter().copied().find(|v| usable(*v))
}

impl MediaMetrics {
    /// Unscaled media size. `rendered` is the on-screen box so it is divided by
    /// the scale currently applied; the container size is the last resort.
    pub fn extent(&self, scale: f64, container: Size) -> Size {
        let unscale = |v: f64| if scale > 0.0 { v / scale } else { 0.0 };
        let width = first_usable(&[
            self.natural.width,
            self.scroll.width,
            unscale(self.rendered.width),
            self.client.width,
            container.width,
        ])
        .unwrap_or(1.0);
        let height = first_usable(&[
            self.natural.height,
            self.scroll.height,
            unscale(self.rendered.height),
            self.client.height,
            container.height,
        ])
        .unwrap_or(1.0);
        Size { width, height }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
        }
    }
}

impl ViewTransform {
    /// Scales by `factor` keeping the container point `(focal_x, focal_y)` fixed.
    pub fn zoom_at(&mut self, focal_x: f64, focal_y: f64, factor: f64, limits: ZoomLimits) {
        self.zoom_to(focal_x, focal_y, self.scale * factor, limits);
    }

    pub fn zoom_to(&mut self, focal_x: f64, focal_y: f64, target: f64, limits: ZoomLimits) {
        let ns = limits.clamp(target);
        let ratio = ns / self.scale;
        self.translate_x = focal_x - (focal_x - self.translate_x) * ratio;
        self.translate_y = focal_y - (focal_y - self.translate_y) * ratio;
        self.scale = ns;
    }

    /// Fits `media` inside `margin` of the container without upscaling and centres it.
    /// Media too large to fit above `limits.min` is centred at the minimum scale.
    /// Returns `false`, leaving the view untouched, when the container has no usable size.
    pub fn fit(&mut self, container: Size, media: Size, margin: f64, limits: ZoomLimits) -> bool {
        if !(usable(container.width) && usable(container.height)) {
            return false;
        }
        let scale = (container.width * margin / media.width)
            .min(container.height * margin / media.height)
            .min(1.0);
        self.scale = limits.clamp(scale);
        self.center(container, media);
        true
    }

    pub fn reset_to_native(&mut self, container: Size, media: Size) {
        self.scale = 1.0;
        self.center(container, media);
    }

    fn center(&mut self, container: Size, media: Size) {
        self.translate_x = (container.width - media.width * self.scale) / 2.0;
        self.translate_y = (container.height - media.height * self.scale) / 2.0;
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.translate_x += dx;
        self.translate_y += dy;
    }

    /// Scale a double-click should move to; `1.0` means "fit instead".
    pub fn double_click_target(&self, threshold: f64, factor: f64, limits: ZoomLimits) -> f64 {
        if self.scale < threshold {
            (self.scale * factor).min(limits.max)
        } else {
            1.0
        }
    }

    pub fn css(&self) -> String {
        format!(
            "translate({}px,{}px) scale({})",
            self.translate_x, self.translate_y, self.scale
        )
    }

    pub fn zoom_label(&self) -> String {
        format!("{}%", (self.scale * 100.0).round() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMITS: ZoomLimits = ZoomLimits { min: 0.2, max: 8.0 };

    // Container point -> unscaled content point.
    fn to_content(view: &ViewTransform, x: f64, y: f64) -> (f64, f64) {
        (
            (x - view.translate_x) / view.scale,
            (y - view.translate_y) / view.scale,
        )
    }

    fn assert_close(actual: f64, expected: f64) {
        let delta = (actual - expected).abs();
        assert!(
            delta <= 1e-9,
            "expected {:.9} got {:.9} (delta {:.9})",
            expected,
            actual,
            delta
        );
    }

    #[test]
    fn fit_example_matches_hand_computation() {
        let mut view = ViewTransform::default();
        assert!(view.fit(Size::new(800.0, 600.0), Size::new(2000.0, 1000.0), 0.95, LIMITS));
        assert_close(view.scale, 0.38);
        assert_close(view.translate_x, 20.0);
        assert_close(view.translate_y, 110.0);
    }

    #[test]
    fn fit_never_upscales_small_media() {
        let mut view = ViewTransform::default();
        let container = Size::new(1200.0, 900.0);
        let media = Size::new(300.0, 200.0);
        assert!(view.fit(container, media, 0.95, LIMITS));
        assert_eq!(view.scale, 1.0);
        assert_close(view.translate_x, (1200.0 - 300.0) / 2.0);
        assert_close(view.translate_y, (900.0 - 200.0) / 2.0);
    }

    #[test]
    fn fit_centres_for_many_shapes() {
        for (cw, ch, nw, nh) in [
            (800.0, 600.0, 640.0, 4000.0),
            (320.0, 640.0, 5000.0, 50.0),
            (1920.0, 1080.0, 1919.0, 1081.0),
        ] {
            let mut view = ViewTransform {
                scale: 3.0,
                translate_x: -500.0,
                translate_y: 77.0,
            };
            assert!(view.fit(Size::new(cw, ch), Size::new(nw, nh), 0.95, LIMITS));
            assert!(view.scale <= 1.0);
            assert_close(view.translate_x, (cw - nw * view.scale) / 2.0);
            assert_close(view.translate_y, (ch - nh * view.scale) / 2.0);
        }
    }

    #[test]
    fn fit_of_huge_media_stops_at_min_scale() {
        let mut view = ViewTransform::default();
        let container = Size::new(800.0, 600.0);
        let media = Size::new(20000.0, 10000.0);
        assert!(view.fit(container, media, 0.95, LIMITS));
        assert_eq!(view.scale, 0.2);
        assert_close(view.translate_x, (800.0 - 20000.0 * 0.2) / 2.0);
        assert_close(view.translate_y, (600.0 - 10000.0 * 0.2) / 2.0);

        view.zoom_at(400.0, 300.0, 1.15, LIMITS);
        assert_close(view.scale, 0.2 * 1.15);
    }

    #[test]
    fn fit_into_collapsed_container_is_noop() {
        for container in [
            Size::new(0.0, 0.0),
            Size::new(800.0, 0.0),
            Size::new(f64::NAN, 600.0),
        ] {
            let mut view = ViewTransform {
                scale: 1.5,
                translate_x: 4.0,
                translate_y: -6.0,
            };
            let before = view;
            assert!(!view.fit(container, Size::new(200.0, 100.0), 0.95, LIMITS));
            assert_eq!(view, before);
            view.zoom_at(10.0, 10.0, 1.15, LIMITS);
            assert!(view.translate_x.is_finite() && view.translate_y.is_finite());
        }
    }

    #[test]
    fn zoom_at_stays_within_limits() {
        for start in [0.2, 0.5, 1.0, 3.0, 7.9, 8.0] {
            for factor in [0.01, 1.0 / 1.3, 1.0 / 1.15, 1.15, 1.3, 2.5, 100.0] {
                let mut view = ViewTransform {
                    scale: start,
                    ..Default::default()
                };
                view.zoom_at(100.0, 50.0, factor, LIMITS);
                assert!(
                    (0.2..=8.0).contains(&view.scale),
                    "start {start} factor {factor} gave {}",
                    view.scale
                );
            }
        }
    }

    #[test]
    fn zoom_at_keeps_focal_point_fixed() {
        let mut view = ViewTransform {
            scale: 0.75,
            translate_x: 13.0,
            translate_y: -42.0,
        };
        let (fx, fy) = (321.0, 187.5);
        let before = to_content(&view, fx, fy);
        view.zoom_at(fx, fy, 1.15, LIMITS);
        let after = to_content(&view, fx, fy);
        assert_close(after.0, before.0);
        assert_close(after.1, before.1);
    }

    #[test]
    fn clamped_zoom_still_anchors() {
        let mut view = ViewTransform {
            scale: 7.0,
            translate_x: 10.0,
            translate_y: 20.0,
        };
        let before = to_content(&view, 400.0, 300.0);
        view.zoom_at(400.0, 300.0, 1.3, LIMITS);
        assert_eq!(view.scale, 8.0);
        let after = to_content(&view, 400.0, 300.0);
        assert_close(after.0, before.0);
        assert_close(after.1, before.1);
    }

    #[test]
    fn double_click_target_zooms_below_threshold() {
        let view = ViewTransform::default();
        assert_close(view.double_click_target(1.5, 2.5, LIMITS), 2.5);
        let near_max = ViewTransform {
            scale: 1.4,
            ..Default::default()
        };
        assert_close(near_max.double_click_target(1.5, 10.0, LIMITS), 8.0);
    }

    #[test]
    fn double_click_target_resets_at_threshold() {
        let view = ViewTransform {
            scale: 1.5,
            ..Default::default()
        };
        assert_eq!(view.double_click_target(1.5, 2.5, LIMITS), 1.0);
    }

    #[test]
    fn reset_to_native_centres_at_unit_scale() {
        let mut view = ViewTransform {
            scale: 4.0,
            translate_x: 9.0,
            translate_y: 9.0,
        };
        view.reset_to_native(Size::new(800.0, 600.0), Size::new(1000.0, 400.0));
        assert_eq!(view.scale, 1.0);
        assert_close(view.translate_x, -100.0);
        assert_close(view.translate_y, 100.0);
    }

    #[test]
    fn extent_prefers_natural_size() {
        let metrics = MediaMetrics {
            natural: Size::new(640.0, 480.0),
            scroll: Size::new(10.0, 10.0),
            rendered: Size::new(20.0, 20.0),
            client: Size::new(30.0, 30.0),
        };
        assert_eq!(metrics.extent(2.0, Size::new(800.0, 600.0)), Size::new(640.0, 480.0));
    }

    #[test]
    fn extent_walks_fallback_chain() {
        let container = Size::new(800.0, 600.0);
        let scroll_only = MediaMetrics {
            scroll: Size::new(300.0, 150.0),
            ..Default::default()
        };
        assert_eq!(scroll_only.extent(1.0, container), Size::new(300.0, 150.0));

        let rendered_only = MediaMetrics {
            rendered: Size::new(400.0, 100.0),
            ..Default::default()
        };
        assert_eq!(rendered_only.extent(2.0, container), Size::new(200.0, 50.0));

        let client_only = MediaMetrics {
            client: Size::new(90.0, 0.0),
            ..Default::default()
        };
        assert_eq!(client_only.extent(1.0, container), Size::new(90.0, 600.0));

        assert_eq!(MediaMetrics::default().extent(1.0, container), container);
    }

    #[test]
    fn extent_is_never_zero() {
        let extent = MediaMetrics::default().extent(1.0, Size::default());
        assert!(extent.width > 0.0 && extent.height > 0.0);
    }

    #[test]
    fn css_and_label() {
        let view = ViewTransform {
            scale: 0.38,
            translate_x: 20.0,
            translate_y: 110.5,
        };
        assert_eq!(view.css(), "translate(20px,110.5px) scale(0.38)");
        assert_eq!(view.zoom_label(), "38%");
        assert_eq!(ViewTransform::default().zoom_label(), "100%");
    }
}
