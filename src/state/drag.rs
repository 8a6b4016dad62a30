// Pointer drag tracking for panning; 1:1 deltas, no inertia.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        last_x: f64,
        last_y: f64,
    },
}

impl DragState {
    pub fn begin(&mut self, x: f64, y: f64) {
        *self = DragState::Dragging {
            last_x: x,
            last_y: y,
        };
    }

    /// Delta since the previous pointer position, or `None` while idle.
    pub fn move_to(&mut self, x: f64, y: f64) -> Option<(f64, f64)> {
        match self {
            DragState::Idle => None,
            DragState::Dragging { last_x, last_y } => {
                let delta = (x - *last_x, y - *last_y);
                *last_x = x;
                *last_y = y;
                Some(delta)
            }
        }
    }

    /// Returns whether a drag was in progress.
    pub fn release(&mut self) -> bool {
        std::mem::take(self).is_dragging()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }
}
