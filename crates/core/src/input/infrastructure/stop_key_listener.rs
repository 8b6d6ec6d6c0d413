use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use device_query::{DeviceQuery, DeviceState, Keycode};

use crate::input::domain::stop_signal::StopSignal;
use crate::shared::constants::KEY_POLL_INTERVAL_MS;

/// Background thread that triggers the stop signal when F5 is pressed.
///
/// Polls the keyboard state at ~60 Hz. The thread exits on its own once
/// it has triggered; `stop` (also called from `Drop`) shuts it down when
/// the recording ends for any other reason, so no poll thread outlives
/// the session.
pub struct StopKeyListener {
    shutdown: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl StopKeyListener {
    pub fn spawn(signal: StopSignal) -> Self {
        let shutdown = Arc::new(AtomicBool::new(false));
        let thread_shutdown = shutdown.clone();

        let handle = thread::spawn(move || {
            let device_state = DeviceState::new();
            while !thread_shutdown.load(Ordering::Relaxed) {
                if device_state.get_keys().contains(&Keycode::F5) {
                    signal.trigger();
                    break;
                }
                thread::sleep(Duration::from_millis(KEY_POLL_INTERVAL_MS));
            }
        });

        Self {
            shutdown,
            handle: Some(handle),
        }
    }

    /// Stops the polling thread and waits for it to exit.
    pub fn stop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for StopKeyListener {
    fn drop(&mut self) {
        self.stop();
    }
}
