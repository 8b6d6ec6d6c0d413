use std::time::{Duration, Instant};

use crate::capture::domain::frame_source::{FrameSource, MonitorGeometry};
use crate::error::RecordingError;
use crate::input::domain::cursor_tracker::CursorTracker;
use crate::input::domain::stop_signal::StopSignal;
use crate::overlay::domain::cursor_compositor::CursorCompositor;
use crate::preview::domain::preview_surface::PreviewSurface;
use crate::recording::config::RecordingConfig;
use crate::recording::pacer::FramePacer;
use crate::shared::video_metadata::VideoMetadata;
use crate::video::domain::video_writer::VideoWriter;

/// What a completed recording produced.
#[derive(Clone, Debug)]
pub struct RecordingSummary {
    pub frames: usize,
    pub elapsed: Duration,
    pub width: u32,
    pub height: u32,
}

/// Orchestrates capture → composite → write → preview until the stop
/// signal fires.
///
/// Wires domain components together. This is a single-use struct:
/// `execute` consumes the owned components, so calling it twice will
/// fail. All per-iteration work runs on the calling thread; the only
/// concurrent party is whoever triggers the stop signal, which the loop
/// reads once per iteration.
pub struct RecordScreenUseCase {
    source: Option<Box<dyn FrameSource>>,
    sink: Option<Box<dyn VideoWriter>>,
    preview: Option<Box<dyn PreviewSurface>>,
    tracker: Option<Box<dyn CursorTracker>>,
    compositor: Option<CursorCompositor>,
    stop: StopSignal,
}

impl RecordScreenUseCase {
    pub fn new(
        source: Box<dyn FrameSource>,
        sink: Box<dyn VideoWriter>,
        preview: Box<dyn PreviewSurface>,
        tracker: Box<dyn CursorTracker>,
        compositor: Option<CursorCompositor>,
        stop: StopSignal,
    ) -> Self {
        Self {
            source: Some(source),
            sink: Some(sink),
            preview: Some(preview),
            tracker: Some(tracker),
            compositor,
            stop,
        }
    }

    /// Runs a full recording session and returns what it produced.
    ///
    /// Startup failures close whatever was already opened and report the
    /// failing phase; once the sink is open, the finalize path (flush
    /// sink, close preview, release source) runs on every exit, error
    /// exits included.
    pub fn execute(
        &mut self,
        config: &RecordingConfig,
    ) -> Result<RecordingSummary, RecordingError> {
        config.validate()?;
        let pacer = FramePacer::new(config.fps)?;

        let mut source = self.source.take().ok_or_else(already_executed)?;
        let mut sink = self.sink.take().ok_or_else(already_executed)?;
        let mut preview = self.preview.take().ok_or_else(already_executed)?;
        let tracker = self.tracker.take().ok_or_else(already_executed)?;
        let compositor = self.compositor.take();

        let geometry = source
            .open(config.monitor)
            .map_err(|e| RecordingError::Capture(e.to_string()))?;
        let metadata = VideoMetadata {
            width: geometry.width,
            height: geometry.height,
            fps: config.fps,
        };

        if let Err(e) = sink.open(&config.output_path, &metadata) {
            source.close();
            return Err(RecordingError::Sink(e.to_string()));
        }

        log::info!(
            "recording {}x{} at {} fps to {}",
            geometry.width,
            geometry.height,
            config.fps,
            config.output_path.display()
        );

        let started = Instant::now();
        let loop_result = run_loop(
            &pacer,
            &self.stop,
            geometry,
            &mut *source,
            &mut *sink,
            &mut *preview,
            &*tracker,
            compositor.as_ref(),
        );
        let elapsed = started.elapsed();

        // Finalize on every exit path so a mid-loop error still leaves
        // the sink flushed and the capture handle released.
        let close_result = sink.close();
        preview.close();
        source.close();

        let frames = loop_result?;
        close_result.map_err(|e| RecordingError::Sink(e.to_string()))?;

        log::info!("recorded {frames} frames in {:.1}s", elapsed.as_secs_f64());

        Ok(RecordingSummary {
            frames,
            elapsed,
            width: geometry.width,
            height: geometry.height,
        })
    }
}

#[allow(clippy::too_many_arguments)]
fn run_loop(
    pacer: &FramePacer,
    stop: &StopSignal,
    geometry: MonitorGeometry,
    source: &mut dyn FrameSource,
    sink: &mut dyn VideoWriter,
    preview: &mut dyn PreviewSurface,
    tracker: &dyn CursorTracker,
    compositor: Option<&CursorCompositor>,
) -> Result<usize, RecordingError> {
    let mut frames = 0usize;
    let mut preview_alive = true;

    while !stop.is_triggered() {
        let tick_start = Instant::now();

        let mut frame = source
            .capture()
            .map_err(|e| RecordingError::Capture(e.to_string()))?;

        if let Some(compositor) = compositor {
            let (cx, cy) = tracker.position();
            compositor.composite(&mut frame, cx - geometry.x, cy - geometry.y);
        }

        sink.write(&frame)
            .map_err(|e| RecordingError::Sink(e.to_string()))?;

        if preview_alive {
            if let Err(e) = preview.present(&frame) {
                log::warn!(
                    "{}; continuing without preview",
                    RecordingError::Preview(e.to_string())
                );
                preview_alive = false;
            }
        }

        frames += 1;
        pacer.pace(tick_start);
    }

    Ok(frames)
}

fn already_executed() -> RecordingError {
    RecordingError::Config("recording session already consumed".into())
}
