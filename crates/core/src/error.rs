use thiserror::Error;

use crate::overlay::infrastructure::image_cursor_loader::CursorLoadError;

/// Phase-tagged errors for a recording session.
///
/// Every variant's display string names the phase that failed, so the CLI
/// can report a human-readable cause without a backtrace. All variants are
/// fatal to the session except where the recording loop documents
/// otherwise (preview failures are logged and presentation stops).
#[derive(Error, Debug)]
pub enum RecordingError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("cursor asset: {0}")]
    AssetLoad(#[from] CursorLoadError),

    #[error("screen capture: {0}")]
    Capture(String),

    #[error("video sink: {0}")]
    Sink(String),

    #[error("preview surface: {0}")]
    Preview(String),
}
