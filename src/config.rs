//! Viewer tunables.
//!
//! Every field has a default; the overlay root may override any subset through
//! a `data-config` JSON attribute, e.g.
//! `<div id="viewer-overlay" data-config='{"max_scale": 12}'>`.

use serde::Deserialize;
use web_sys::Element;

use crate::state::ZoomLimits;

pub const CONFIG_ATTR: &str = "data-config";

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    /// Share of the container the media may cover after a fit.
    pub fit_margin: f64,
    pub button_zoom_factor: f64,
    pub wheel_zoom_factor: f64,
    /// Double-click zooms in below this scale and fits at or above it.
    pub double_click_threshold: f64,
    pub double_click_factor: f64,
    pub indicator_hide_ms: u32,
    /// Inline SVG reports its size a little after `load`.
    pub svg_refit_delay_ms: u32,
    pub reveal_threshold: f64,
    pub debug: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.2,
            max_scale: 8.0,
            fit_margin: 0.95,
            button_zoom_factor: 1.3,
            wheel_zoom_factor: 1.15,
            double_click_threshold: 1.5,
            double_click_factor: 2.5,
            indicator_hide_ms: 1200,
            svg_refit_delay_ms: 50,
            reveal_threshold: 0.08,
            debug: false,
        }
    }
}

impl ViewerConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<ViewerConfig>(raw).map(ViewerConfig::sanitized)
    }

    /// Reads the overlay root's `data-config`; a bad value logs and yields defaults.
    pub fn from_root(root: &Element) -> Self {
        match root.get_attribute(CONFIG_ATTR) {
            Some(raw) if !raw.trim().is_empty() => match Self::from_json(&raw) {
                Ok(cfg) => cfg,
                Err(err) => {
                    gloo::console::warn!(format!("viewer: ignoring invalid {CONFIG_ATTR}: {err}"));
                    Self::default()
                }
            },
            _ => Self::default(),
        }
    }

    /// Replaces values that would break the transform math with their defaults.
    pub fn sanitized(mut self) -> Self {
        let d = Self::default();
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.min_scale) {
            self.min_scale = d.min_scale;
        }
        if !positive(self.max_scale) || self.max_scale < self.min_scale {
            self.max_scale = d.max_scale.max(self.min_scale);
        }
        if !(positive(self.fit_margin) && self.fit_margin <= 1.0) {
            self.fit_margin = d.fit_margin;
        }
        for (value, fallback) in [
            (&mut self.button_zoom_factor, d.button_zoom_factor),
            (&mut self.wheel_zoom_factor, d.wheel_zoom_factor),
            (&mut self.double_click_factor, d.double_click_factor),
        ] {
            if !(value.is_finite() && *value > 1.0) {
                *value = fallback;
            }
        }
        if !positive(self.double_click_threshold) {
            self.double_click_threshold = d.double_click_threshold;
        }
        if !(self.reveal_threshold.is_finite() && (0.0..=1.0).contains(&self.reveal_threshold)) {
            self.reveal_threshold = d.reveal_threshold;
        }
        self
    }

    pub fn limits(&self) -> ZoomLimits {
        ZoomLimits {
            min: self.min_scale,
            max: self.max_scale,
        }
    }
}
