pub const DEFAULT_MONITOR: usize = 1;
pub const DEFAULT_FPS: f64 = 30.0;
pub const DEFAULT_CURSOR_PATH: &str = "cursor.png";
pub const DEFAULT_OUTPUT_PATH: &str = "screen_record.mp4";
pub const DEFAULT_CURSOR_SIZE: u32 = 32;

/// Poll interval for the stop-key listener thread (~60 Hz).
pub const KEY_POLL_INTERVAL_MS: u64 = 16;

/// The preview window opens at 1/4 of the capture resolution.
pub const PREVIEW_SCALE_DIVISOR: u32 = 4;
