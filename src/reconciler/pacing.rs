//! # Rate Gate
//!
//! Spaces calls to the shortening service independently of the loop that
//! issues them.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep_until, Instant};
use tracing::debug;

#[async_trait]
pub trait RateGate: Send + Sync {
    /// Suspend until the next call is allowed
    async fn acquire(&self);
}

/// Grants permits at least `interval` apart. The first permit is immediate.
#[derive(Debug)]
pub struct FixedIntervalGate {
    interval: Duration,
    next_permit: Mutex<Option<Instant>>,
}

impl FixedIntervalGate {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_permit: Mutex::new(None),
        }
    }
}

#[async_trait]
impl RateGate for FixedIntervalGate {
    async fn acquire(&self) {
        let mut next_permit = self.next_permit.lock().await;
        if let Some(at) = *next_permit {
            if at > Instant::now() {
                debug!(
                    wait_ms = (at - Instant::now()).as_millis() as u64,
                    "Waiting for rate gate"
                );
                sleep_until(at).await;
            }
        }
        *next_permit = Some(Instant::now() + self.interval);
    }
}

/// Gate that never waits
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopGate;

#[async_trait]
impl RateGate for NoopGate {
    async fn acquire(&self) {}
}

/// Gate for the configured interval; a zero interval disables pacing
///
/// ```rust
/// use std::time::Duration;
/// use tinyurl_sync::reconciler::{gate_for, RateGate};
///
/// # tokio_test::block_on(async {
/// let gate = gate_for(Duration::ZERO);
/// gate.acquire().await;
/// gate.acquire().await;
/// # });
/// ```
pub fn gate_for(interval: Duration) -> Arc<dyn RateGate> {
    if interval.is_zero() {
        Arc::new(NoopGate)
    } else {
        Arc::new(FixedIntervalGate::new(interval))
    }
}
