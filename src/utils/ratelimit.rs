//! Sliding-window request pacing for the public price API
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use tokio::time::Instant;

pub struct RateLimiter {
    /// Timestamps of requests inside the current window
    request_times: Mutex<VecDeque<Instant>>,
    max_requests: usize,
    window: Duration,
}

impl RateLimiter {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            request_times: Mutex::new(VecDeque::new()),
            max_requests: max_requests.max(1),
            window,
        }
    }

    /// Record a request at `now` if the window has room.
    /// Returns how long to wait otherwise (nothing is recorded then).
    fn check_and_record(&self, now: Instant) -> Duration {
        let mut request_times = self
            .request_times
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        // Remove old timestamps outside the window
        while let Some(&front) = request_times.front() {
            if now.duration_since(front) >= self.window {
                request_times.pop_front();
            } else {
                break;
            }
        }

        if request_times.len() >= self.max_requests {
            if let Some(&oldest) = request_times.front() {
                return self.window - now.duration_since(oldest);
            }
        }

        request_times.push_back(now);
        Duration::ZERO
    }

    /// Wait until a request slot is free, then take it
    pub async fn acquire(&self) {
        loop {
            let wait = self.check_and_record(Instant::now());
            if wait.is_zero() {
                return;
            }
            tracing::debug!("Price API rate limit: waiting {}ms", wait.as_millis());
            tokio::time::sleep(wait).await;
        }
    }
}
