use std::sync::atomic::{AtomicBool, Ordering};

use snaptext_types::CaptureOutcome;
use tokio::sync::RwLock;

use crate::status::CaptureStatus;

#[derive(Default)]
pub struct AppState {
    pub status: RwLock<CaptureStatus>,
    capture_running: AtomicBool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the single capture slot, false if one is already in flight
    pub fn try_begin_capture(&self) -> bool {
        self.capture_running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    pub fn is_capturing(&self) -> bool {
        self.capture_running.load(Ordering::SeqCst)
    }

    /// Record the outcome and free the capture slot
    pub async fn end_capture(&self, outcome: &CaptureOutcome) {
        self.status.write().await.record(outcome);
        self.capture_running.store(false, Ordering::SeqCst);
    }
}
