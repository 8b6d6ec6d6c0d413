use std::path::PathBuf;

use crate::error::RecordingError;
use crate::shared::constants::{
    DEFAULT_CURSOR_PATH, DEFAULT_CURSOR_SIZE, DEFAULT_FPS, DEFAULT_MONITOR, DEFAULT_OUTPUT_PATH,
};

/// Immutable settings for one recording session, built once before the
/// loop starts.
#[derive(Clone, Debug)]
pub struct RecordingConfig {
    /// 1-based monitor index in platform enumeration order.
    pub monitor: usize,
    pub fps: f64,
    pub cursor_path: PathBuf,
    pub output_path: PathBuf,
    /// Side length in pixels the cursor image is resized to.
    pub cursor_size: u32,
    pub cursor_enabled: bool,
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            monitor: DEFAULT_MONITOR,
            fps: DEFAULT_FPS,
            cursor_path: PathBuf::from(DEFAULT_CURSOR_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            cursor_size: DEFAULT_CURSOR_SIZE,
            cursor_enabled: true,
        }
    }
}

impl RecordingConfig {
    /// Rejects values the recording loop cannot run with. Called before
    /// any capture or sink resource is opened.
    pub fn validate(&self) -> Result<(), RecordingError> {
        if !(self.fps.is_finite() && self.fps > 0.0) {
            return Err(RecordingError::Config(format!(
                "fps must be a positive number, got {}",
                self.fps
            )));
        }
        if self.monitor == 0 {
            return Err(RecordingError::Config(
                "monitor index is 1-based; 0 is not a monitor".into(),
            ));
        }
        if self.cursor_size == 0 {
            return Err(RecordingError::Config(
                "cursor size must be at least 1 pixel".into(),
            ));
        }
        Ok(())
    }
}
