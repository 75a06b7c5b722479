//! Cap on requests in flight per client.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::sync::SemaphorePermit;

use crate::error::Error;

/// Requests one client may have in flight when no limit is configured.
pub const DEFAULT_MAX_IN_FLIGHT: usize = 8;

/// Hands out one slot per outgoing request.
///
/// Clones share the same slots, so every clone of a
/// [`ShiftboardClient`](crate::ShiftboardClient) counts against one limit.
/// A request keeps its slot across retries.
///
/// ```
/// use shiftboard_lib::rate_limit::ConcurrencyLimiter;
///
/// let limiter = ConcurrencyLimiter::new(0);
/// assert_eq!(limiter.limit(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ConcurrencyLimiter {
    slots: Arc<Semaphore>,
    limit: usize,
}

impl ConcurrencyLimiter {
    /// Allows `limit` requests at once; zero is treated as one.
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            slots: Arc::new(Semaphore::new(limit)),
            limit,
        }
    }

    /// Waits for a free slot. The slot is returned when the permit drops.
    pub async fn acquire(&self) -> Result<SemaphorePermit<'_>, Error> {
        self.slots
            .acquire()
            .await
            .map_err(|_| Error::InvalidOperation("request limiter closed".to_string()))
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Slots not currently held by a request.
    pub fn available(&self) -> usize {
        self.slots.available_permits()
    }
}

impl Default for ConcurrencyLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_IN_FLIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_clones_share_slots() {
        let limiter = ConcurrencyLimiter::new(2);
        let other = limiter.clone();

        let _held = limiter.acquire().await.unwrap();
        assert_eq!(other.available(), 1);
    }
}
