//! Request pacing between result pages
//!
//! The pause between page fetches goes through the `Sleeper` trait so tests can
//! observe it without waiting on a real clock.

use std::future::Future;
use std::time::Duration;

/// Suspends the run for a given duration
pub trait Sleeper {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Sleeps on the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
