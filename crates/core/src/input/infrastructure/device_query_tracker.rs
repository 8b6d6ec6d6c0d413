use device_query::{DeviceQuery, DeviceState};

use crate::input::domain::cursor_tracker::CursorTracker;

/// Pointer position via device_query, which reads global coordinates
/// without needing a window or event loop.
pub struct DeviceQueryCursorTracker {
    device_state: DeviceState,
}

impl DeviceQueryCursorTracker {
    pub fn new() -> Self {
        Self {
            device_state: DeviceState::new(),
        }
    }
}

impl Default for DeviceQueryCursorTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl CursorTracker for DeviceQueryCursorTracker {
    fn position(&self) -> (i32, i32) {
        self.device_state.get_mouse().coords
    }
}
