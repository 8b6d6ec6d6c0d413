use minifb::{ScaleMode, Window, WindowOptions};

use crate::preview::domain::preview_surface::PreviewSurface;
use crate::shared::constants::PREVIEW_SCALE_DIVISOR;
use crate::shared::frame::Frame;

/// Preview window backed by minifb.
///
/// The window is created on the first presented frame, sized to a quarter
/// of the capture resolution; minifb stretches the full-resolution buffer
/// to fit. A window the user closes disables presentation for the rest of
/// the recording — only the stop key ends the session.
pub struct MinifbPreview {
    title: String,
    window: Option<Window>,
    buffer: Vec<u32>,
    disabled: bool,
}

impl MinifbPreview {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            window: None,
            buffer: Vec::new(),
            disabled: false,
        }
    }
}

impl PreviewSurface for MinifbPreview {
    fn present(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        if self.disabled {
            return Ok(());
        }

        if self.window.is_none() {
            let width = (frame.width() / PREVIEW_SCALE_DIVISOR).max(1) as usize;
            let height = (frame.height() / PREVIEW_SCALE_DIVISOR).max(1) as usize;
            let options = WindowOptions {
                resize: true,
                scale_mode: ScaleMode::Stretch,
                ..WindowOptions::default()
            };
            let window = Window::new(&self.title, width, height, options)
                .map_err(|e| Box::<dyn std::error::Error>::from(e.to_string()))?;
            self.window = Some(window);
        }

        let Some(window) = self.window.as_mut() else {
            return Ok(());
        };

        if !window.is_open() {
            log::warn!("preview window closed; recording continues without preview");
            self.window = None;
            self.disabled = true;
            return Ok(());
        }

        pack_rgb(frame, &mut self.buffer);
        window
            .update_with_buffer(&self.buffer, frame.width() as usize, frame.height() as usize)
            .map_err(|e| Box::<dyn std::error::Error>::from(e.to_string()))?;
        Ok(())
    }

    fn close(&mut self) {
        self.window = None;
    }
}

/// Packs RGB bytes into minifb's 0RGB u32 layout, reusing the buffer.
fn pack_rgb(frame: &Frame, buffer: &mut Vec<u32>) {
    buffer.clear();
    buffer.extend(
        frame
            .data()
            .chunks_exact(3)
            .map(|px| (u32::from(px[0]) << 16) | (u32::from(px[1]) << 8) | u32::from(px[2])),
    );
}
