//! Randomized pauses between on-chain actions
//!
//! Every pause is `base + U[0, jitter)` seconds. A disabled scheduler still
//! computes and logs delays but never sleeps, which keeps tests instant.

use crate::types::DelayWindow;
use rand::Rng;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct DelayScheduler {
    enabled: bool,
}

impl Default for DelayScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl DelayScheduler {
    pub fn new() -> Self {
        Self { enabled: true }
    }

    /// Scheduler that never actually sleeps
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    /// Draw a delay from `base + U[0, jitter)`. Negative inputs count as
    /// zero; values past `Duration::MAX` saturate.
    pub fn next_delay(&self, window: DelayWindow) -> Duration {
        let base = window.base_secs.max(0.0);
        let jitter = window.jitter_secs.max(0.0);
        let extra = if jitter > 0.0 {
            rand::thread_rng().gen::<f64>() * jitter
        } else {
            0.0
        };
        Duration::try_from_secs_f64(base + extra).unwrap_or(Duration::MAX)
    }

    /// Sleep for a freshly drawn delay. `reason` only feeds the log line.
    pub async fn pause(&self, window: DelayWindow, reason: &str) -> Duration {
        let delay = self.next_delay(window);
        debug!("Waiting {:.2}s ({})", delay.as_secs_f64(), reason);
        if self.enabled && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        delay
    }
}
