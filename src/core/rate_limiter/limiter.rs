//! Submission pacer

use super::types::{PacerState, PacingPermit};
use crate::config::models::pacing::{PacingConfig, PacingStrategy};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Paces successive submissions from one signing account
#[derive(Debug, Clone)]
pub struct RateLimiter {
    /// Pacing configuration
    pub(super) config: PacingConfig,
    /// State shared with outstanding permits
    pub(super) state: Arc<Mutex<PacerState>>,
}

impl RateLimiter {
    /// Create a new pacer
    pub fn new(config: PacingConfig) -> Self {
        let state = PacerState::new(config.burst.max(1));
        Self {
            config,
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Pacer that never waits
    pub fn disabled() -> Self {
        Self::new(PacingConfig::disabled())
    }

    pub fn strategy(&self) -> PacingStrategy {
        self.config.strategy
    }

    pub fn interval(&self) -> Duration {
        self.config.interval()
    }

    /// Wait until the next submission may start
    pub async fn acquire(&self) -> PacingPermit {
        match self.config.strategy {
            PacingStrategy::Disabled => PacingPermit::immediate(Duration::ZERO),
            PacingStrategy::FixedInterval => self.acquire_fixed_interval().await,
            PacingStrategy::TokenBucket => self.acquire_token_bucket().await,
        }
    }

    /// Time until a fixed-interval permit would be granted
    pub fn time_until_ready(&self) -> Duration {
        let last_release = self.state.lock().last_release;
        match (self.config.strategy, last_release) {
            (PacingStrategy::FixedInterval, Some(released)) => {
                (released + self.interval()).saturating_duration_since(Instant::now())
            }
            _ => Duration::ZERO,
        }
    }
}
