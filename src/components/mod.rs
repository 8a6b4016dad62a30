pub mod app;
pub mod media_view;
pub mod viewer_controls;
pub mod viewer_overlay;
pub mod zoom_indicator;
