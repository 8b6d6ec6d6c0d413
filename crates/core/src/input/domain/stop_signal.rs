use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Single-writer stop flag shared between the key listener and the
/// recording loop.
///
/// The listener thread flips it false→true exactly once per session; the
/// loop reads a snapshot at each iteration boundary. There is no reset,
/// so a triggered signal stays triggered.
#[derive(Clone, Debug, Default)]
pub struct StopSignal {
    triggered: Arc<AtomicBool>,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        self.triggered.store(true, Ordering::Relaxed);
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::Relaxed)
    }
}
