//! Submission pacing configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Pacing between successive mint submissions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PacingConfig {
    /// Pacing strategy
    #[serde(default)]
    pub strategy: PacingStrategy,
    /// Minimum gap between submissions in milliseconds
    #[serde(default = "default_pacing_interval_ms")]
    pub interval_ms: u64,
    /// Bucket capacity for `token_bucket`
    #[serde(default = "default_burst")]
    pub burst: u32,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            strategy: PacingStrategy::default(),
            interval_ms: default_pacing_interval_ms(),
            burst: default_burst(),
        }
    }
}

impl PacingConfig {
    /// Fixed interval pacing with the given gap
    pub fn fixed(interval: Duration) -> Self {
        Self {
            strategy: PacingStrategy::FixedInterval,
            interval_ms: interval.as_millis() as u64,
            burst: default_burst(),
        }
    }

    /// No pacing at all
    pub fn disabled() -> Self {
        Self {
            strategy: PacingStrategy::Disabled,
            ..Self::default()
        }
    }

    /// Merge pacing configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.strategy != PacingStrategy::default() {
            self.strategy = other.strategy;
        }
        if other.interval_ms != default_pacing_interval_ms() {
            self.interval_ms = other.interval_ms;
        }
        if other.burst != default_burst() {
            self.burst = other.burst;
        }
        self
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Pacing strategy
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PacingStrategy {
    /// Wait `interval` after the previous submission finished
    #[default]
    FixedInterval,
    /// Allow `burst` submissions, refilling one per `interval`
    TokenBucket,
    /// Submit back to back
    Disabled,
}
