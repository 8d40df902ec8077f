use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

/// Fixed pause paid by each caller before it escalates to the fallback service.
///
/// There is no shared counter: concurrent tasks each sleep independently.
#[derive(Debug, Clone, Copy)]
pub struct RateLimiter {
    delay: Duration,
}

impl RateLimiter {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub async fn wait_before_fallback(&self) {
        if self.delay.is_zero() {
            return;
        }
        debug!(delay_ms = self.delay.as_millis() as u64, "Rate limiting before fallback");
        sleep(self.delay).await;
    }
}
