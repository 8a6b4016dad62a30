pub mod drag;
pub mod view;

pub use drag::DragState;
pub use view::{MediaMetrics, Size, ViewTransform, ZoomLimits};
