//! Pacer state and permits

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Shared pacing state
#[derive(Debug)]
pub(super) struct PacerState {
    /// When the last fixed-interval permit was dropped
    pub(super) last_release: Option<Instant>,
    /// Token count for token bucket
    pub(super) tokens: f64,
    /// Last token refill time
    pub(super) last_refill: Instant,
}

impl PacerState {
    pub(super) fn new(burst: u32) -> Self {
        Self {
            last_release: None,
            tokens: f64::from(burst),
            last_refill: Instant::now(),
        }
    }
}

/// Permission to make one submission
///
/// For fixed-interval pacing the next interval starts when this permit is
/// dropped, so the gap is measured from the end of the previous submission.
#[derive(Debug)]
#[must_use = "the pacing interval starts when the permit is dropped"]
pub struct PacingPermit {
    release: Option<Arc<Mutex<PacerState>>>,
    waited: Duration,
}

impl PacingPermit {
    pub(super) fn immediate(waited: Duration) -> Self {
        Self {
            release: None,
            waited,
        }
    }

    pub(super) fn releasing(state: Arc<Mutex<PacerState>>, waited: Duration) -> Self {
        Self {
            release: Some(state),
            waited,
        }
    }

    /// How long acquisition waited
    pub fn waited(&self) -> Duration {
        self.waited
    }
}

impl Drop for PacingPermit {
    fn drop(&mut self) {
        if let Some(state) = self.release.take() {
            state.lock().last_release = Some(Instant::now());
        }
    }
}
