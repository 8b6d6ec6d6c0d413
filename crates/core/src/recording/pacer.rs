use std::thread;
use std::time::{Duration, Instant};

use crate::error::RecordingError;

/// Enforces the target inter-frame interval.
///
/// After an iteration's work, `pace` sleeps whatever remains of the frame
/// budget, measured from the iteration's start. When the work already
/// overran the budget it returns immediately: the achieved rate degrades
/// under load, but the pacer itself never drops or duplicates frames.
#[derive(Clone, Copy, Debug)]
pub struct FramePacer {
    interval: Duration,
}

impl FramePacer {
    pub fn new(fps: f64) -> Result<Self, RecordingError> {
        if !(fps.is_finite() && fps > 0.0) {
            return Err(RecordingError::Config(format!(
                "fps must be a positive number, got {fps}"
            )));
        }
        Ok(Self {
            interval: Duration::from_secs_f64(1.0 / fps),
        })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Sleeps for the rest of the frame budget measured from `tick_start`.
    pub fn pace(&self, tick_start: Instant) {
        if let Some(remaining) = self.interval.checked_sub(tick_start.elapsed()) {
            thread::sleep(remaining);
        }
    }
}
