use std::path::PathBuf;
use std::process;

use clap::Parser;

use cursorcast_core::capture::infrastructure::xcap_frame_source::XcapFrameSource;
use cursorcast_core::error::RecordingError;
use cursorcast_core::input::domain::stop_signal::StopSignal;
use cursorcast_core::input::infrastructure::device_query_tracker::DeviceQueryCursorTracker;
use cursorcast_core::input::infrastructure::stop_key_listener::StopKeyListener;
use cursorcast_core::overlay::domain::cursor_compositor::CursorCompositor;
use cursorcast_core::overlay::infrastructure::image_cursor_loader;
use cursorcast_core::preview::infrastructure::minifb_preview::MinifbPreview;
use cursorcast_core::recording::config::RecordingConfig;
use cursorcast_core::recording::record_screen_use_case::RecordScreenUseCase;
use cursorcast_core::shared::constants::DEFAULT_CURSOR_PATH;
use cursorcast_core::video::infrastructure::ffmpeg_writer::FfmpegWriter;

/// Screen recorder with a custom cursor overlay.
#[derive(Parser)]
#[command(name = "cursorcast")]
struct Cli {
    /// Monitor index to record (1 = primary).
    #[arg(short, long, default_value_t = 1)]
    monitor: usize,

    /// Frames per second for the output video.
    #[arg(short, long, default_value_t = 30.0)]
    fps: f64,

    /// Cursor image to overlay (must have an alpha channel).
    #[arg(short, long, default_value = "cursor.png")]
    cursor: PathBuf,

    /// Output video file; the extension picks the container (.mp4, .avi).
    #[arg(short, long, default_value = "screen_record.mp4")]
    output: PathBuf,

    /// Width and height in pixels the cursor is resized to.
    #[arg(short = 's', long, default_value_t = 32)]
    cursor_size: u32,

    /// Record without the cursor overlay.
    #[arg(long)]
    no_cursor: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = RecordingConfig {
        monitor: cli.monitor,
        fps: cli.fps,
        cursor_path: cli.cursor,
        output_path: cli.output,
        cursor_size: cli.cursor_size,
        cursor_enabled: !cli.no_cursor,
    };
    config.validate()?;

    let compositor = build_compositor(&config)?;

    let stop = StopSignal::new();
    let _listener = StopKeyListener::spawn(stop.clone());

    let mut use_case = RecordScreenUseCase::new(
        Box::new(XcapFrameSource::new()),
        Box::new(FfmpegWriter::new()),
        Box::new(MinifbPreview::new("cursorcast")),
        Box::new(DeviceQueryCursorTracker::new()),
        compositor,
        stop,
    );

    println!(
        "Recording monitor {} to {} at {} fps. Press F5 to stop.",
        config.monitor,
        config.output_path.display(),
        config.fps
    );

    let summary = use_case.execute(&config)?;

    log::info!(
        "saved {} frames ({:.1}s of video)",
        summary.frames,
        summary.frames as f64 / config.fps
    );
    println!("Video saved to {}", config.output_path.display());
    Ok(())
}

/// Builds the overlay compositor, or `None` when recording cursor-less.
///
/// A missing file at the default cursor path disables the overlay with a
/// warning instead of failing, so the tool works out of the box without a
/// bundled image; an explicitly chosen path that fails to load is fatal.
fn build_compositor(config: &RecordingConfig) -> Result<Option<CursorCompositor>, RecordingError> {
    if !config.cursor_enabled {
        return Ok(None);
    }
    if !config.cursor_path.exists() && config.cursor_path.as_os_str() == DEFAULT_CURSOR_PATH {
        log::warn!(
            "{} not found; recording without a cursor overlay",
            config.cursor_path.display()
        );
        return Ok(None);
    }
    let sprite = image_cursor_loader::load_cursor(&config.cursor_path, config.cursor_size)?;
    Ok(Some(CursorCompositor::new(sprite)))
}
