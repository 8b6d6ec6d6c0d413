use crate::shared::frame::Frame;

/// Shows composed frames to the user while recording.
///
/// Presentation is best-effort: implementations report errors, but the
/// recording loop treats them as non-fatal and simply stops presenting.
pub trait PreviewSurface {
    fn present(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>>;

    fn close(&mut self);
}

/// Preview that discards every frame, for headless recording and tests.
pub struct NullPreviewSurface;

impl PreviewSurface for NullPreviewSurface {
    fn present(&mut self, _frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        Ok(())
    }

    fn close(&mut self) {}
}
