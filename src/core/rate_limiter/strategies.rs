//! Pacing strategy implementations

use super::limiter::RateLimiter;
use super::types::PacingPermit;
use tokio::time::{Instant, sleep, sleep_until};
use tracing::debug;

impl RateLimiter {
    /// Wait out the interval since the previous permit was released
    pub(super) async fn acquire_fixed_interval(&self) -> PacingPermit {
        let started = Instant::now();
        let last_release = self.state.lock().last_release;

        if let Some(released) = last_release {
            let ready_at = released + self.interval();
            if ready_at > started {
                debug!(
                    wait_ms = (ready_at - started).as_millis() as u64,
                    "Pacing before next submission"
                );
                sleep_until(ready_at).await;
            }
        }

        PacingPermit::releasing(self.state.clone(), started.elapsed())
    }

    /// Take one token, refilling one per interval up to the burst size
    pub(super) async fn acquire_token_bucket(&self) -> PacingPermit {
        let started = Instant::now();
        let interval = self.interval();
        let capacity = f64::from(self.config.burst.max(1));

        loop {
            let wait = {
                let mut state = self.state.lock();
                let now = Instant::now();

                if !interval.is_zero() {
                    let elapsed = now.duration_since(state.last_refill);
                    let refill = elapsed.as_secs_f64() / interval.as_secs_f64();
                    state.tokens = (state.tokens + refill).min(capacity);
                } else {
                    state.tokens = capacity;
                }
                state.last_refill = now;

                if state.tokens >= 1.0 {
                    state.tokens -= 1.0;
                    None
                } else {
                    Some(interval.mul_f64(1.0 - state.tokens))
                }
            };

            match wait {
                None => return PacingPermit::immediate(started.elapsed()),
                Some(wait) => {
                    debug!(wait_ms = wait.as_millis() as u64, "Token bucket empty");
                    sleep(wait).await;
                }
            }
        }
    }
}
