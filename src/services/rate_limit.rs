use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

/// Paces a sequence of operations against an external service.
///
/// The import loop acquires once per row; swapping this trait's
/// implementation changes the pacing policy without touching reconciliation.
#[async_trait::async_trait]
pub trait RateLimiter: Send + Sync {
    /// Waits until the next operation may start.
    async fn acquire(&self);
}

/// Fixed-interval limiter: successive acquisitions are spaced at least
/// `interval` apart. The first acquisition never waits.
pub struct FixedInterval {
    interval: Duration,
    next_slot: Mutex<Option<Instant>>,
}

impl FixedInterval {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_slot: Mutex::new(None),
        }
    }
}

#[async_trait::async_trait]
impl RateLimiter for FixedInterval {
    async fn acquire(&self) {
        let start = {
            let mut next_slot = self.next_slot.lock().await;
            let now = Instant::now();
            let start = match *next_slot {
                Some(at) if at > now => at,
                _ => now,
            };
            *next_slot = Some(start + self.interval);
            start
        };

        if start > Instant::now() {
            tokio::time::sleep_until(start).await;
        }
    }
}
