use std::path::Path;

use crate::shared::frame::Frame;
use crate::shared::video_metadata::VideoMetadata;

/// Abstracts video encoding so the recording loop can write output
/// without depending on a specific codec library.
pub trait VideoWriter {
    /// Opens the sink. The container comes from the path's extension;
    /// every written frame must match the metadata dimensions.
    fn open(
        &mut self,
        path: &Path,
        metadata: &VideoMetadata,
    ) -> Result<(), Box<dyn std::error::Error>>;

    fn write(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>>;

    /// Flushes the encoder and finalizes the container. The output file
    /// is only playable after close returns.
    fn close(&mut self) -> Result<(), Box<dyn std::error::Error>>;
}
