use xcap::Monitor;

use crate::capture::domain::frame_source::{FrameSource, MonitorGeometry};
use crate::shared::frame::Frame;

/// Monitor capture backed by xcap.
///
/// `open` performs a probe capture so the reported geometry reflects the
/// true captured pixel size (HiDPI monitors report logical dimensions
/// through some platform APIs) and so platform failures surface at
/// startup. The probe frame is served as the first capture rather than
/// thrown away.
pub struct XcapFrameSource {
    monitor: Option<Monitor>,
    geometry: Option<MonitorGeometry>,
    probe: Option<Frame>,
    next_index: usize,
}

impl XcapFrameSource {
    pub fn new() -> Self {
        Self {
            monitor: None,
            geometry: None,
            probe: None,
            next_index: 0,
        }
    }
}

impl Default for XcapFrameSource {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSource for XcapFrameSource {
    fn open(
        &mut self,
        monitor_index: usize,
    ) -> Result<MonitorGeometry, Box<dyn std::error::Error>> {
        let monitors = Monitor::all()?;
        let available = monitors.len();
        let monitor = monitor_index
            .checked_sub(1)
            .and_then(|i| monitors.into_iter().nth(i))
            .ok_or_else(|| {
                format!("monitor index {monitor_index} out of range (available: 1 to {available})")
            })?;

        let image = monitor.capture_image()?;
        let geometry = MonitorGeometry {
            x: monitor.x()?,
            y: monitor.y()?,
            width: image.width(),
            height: image.height(),
        };

        log::debug!(
            "opened monitor {} at ({}, {}), {}x{} px",
            monitor_index,
            geometry.x,
            geometry.y,
            geometry.width,
            geometry.height
        );

        self.probe = Some(rgba_to_frame(image, 0));
        self.next_index = 1;
        self.geometry = Some(geometry);
        self.monitor = Some(monitor);
        Ok(geometry)
    }

    fn capture(&mut self) -> Result<Frame, Box<dyn std::error::Error>> {
        let (monitor, geometry) = match (self.monitor.as_ref(), self.geometry) {
            (Some(m), Some(g)) => (m, g),
            _ => return Err("frame source not opened".into()),
        };

        if let Some(frame) = self.probe.take() {
            return Ok(frame);
        }

        let image = monitor.capture_image()?;
        if (image.width(), image.height()) != (geometry.width, geometry.height) {
            return Err(format!(
                "captured size changed from {}x{} to {}x{}",
                geometry.width,
                geometry.height,
                image.width(),
                image.height()
            )
            .into());
        }

        let frame = rgba_to_frame(image, self.next_index);
        self.next_index += 1;
        Ok(frame)
    }

    fn close(&mut self) {
        self.monitor = None;
        self.geometry = None;
        self.probe = None;
    }
}

/// Drops the alpha channel xcap always provides; the sink and compositor
/// expect plain RGB.
fn rgba_to_frame(image: image::RgbaImage, index: usize) -> Frame {
    let (width, height) = image.dimensions();
    let rgba = image.into_raw();
    let mut data = Vec::with_capacity(rgba.len() / 4 * 3);
    for px in rgba.chunks_exact(4) {
        data.extend_from_slice(&px[..3]);
    }
    Frame::new(data, width, height, index)
}
