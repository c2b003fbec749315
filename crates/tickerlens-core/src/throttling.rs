use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use governor::clock::DefaultClock;
use governor::state::direct::NotKeyed;
use governor::state::InMemoryState;
use governor::{Quota, RateLimiter};

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Local request budget for the upstream quote API: `limit` calls per
/// `window`. A denied [`acquire`](RateGate::acquire) carries the fixed
/// interval to wait before the caller tries again; retry pacing itself is
/// owned by the lookup loop.
#[derive(Clone)]
pub struct RateGate {
    limiter: Arc<DirectRateLimiter>,
    retry_interval: Duration,
}

impl RateGate {
    pub fn new(window: Duration, limit: u32, retry_interval: Duration) -> Self {
        Self {
            limiter: Arc::new(RateLimiter::direct(quota_from_window(window, limit))),
            retry_interval,
        }
    }

    /// Try to spend one unit of budget.
    pub fn acquire(&self) -> Result<(), Duration> {
        if self.limiter.check().is_ok() {
            Ok(())
        } else {
            Err(self.retry_interval)
        }
    }

    pub const fn retry_interval(&self) -> Duration {
        self.retry_interval
    }
}

fn quota_from_window(window: Duration, limit: u32) -> Quota {
    let safe_limit = limit.max(1);
    let burst = NonZeroU32::new(safe_limit).expect("limit is clamped to at least one");

    let seconds_per_cell = (window.as_secs_f64() / f64::from(safe_limit)).max(0.001);
    let period = Duration::from_secs_f64(seconds_per_cell);

    Quota::with_period(period)
        .expect("period is always greater than zero")
        .allow_burst(burst)
}
