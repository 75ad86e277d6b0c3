// src/services/rate_limit.rs
// DOCUMENTATION: Per-client rate limiting for public write endpoints

use crate::errors::SiteError;
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU64, Ordering};

/// Checks between sweeps of fully replenished clients
const PRUNE_EVERY: u64 = 1024;

/// Keyed by client address
pub struct SubmissionLimiter {
    limiter: DefaultKeyedRateLimiter<String>,
    checks: AtomicU64,
}

impl SubmissionLimiter {
    pub fn per_minute(requests: u32) -> Self {
        let burst = NonZeroU32::new(requests.max(1)).unwrap_or(NonZeroU32::MIN);
        Self::with_quota(Quota::per_minute(burst))
    }

    pub fn with_quota(quota: Quota) -> Self {
        Self {
            limiter: RateLimiter::keyed(quota),
            checks: AtomicU64::new(0),
        }
    }

    pub fn check(&self, client: &str) -> Result<(), SiteError> {
        if self.checks.fetch_add(1, Ordering::Relaxed) % PRUNE_EVERY == PRUNE_EVERY - 1 {
            self.prune();
        }

        self.limiter.check_key(&client.to_string()).map_err(|_| {
            log::warn!("Rate limit exceeded for {}", client);
            SiteError::RateLimitExceeded
        })
    }

    /// Drop clients whose quota has fully replenished
    pub fn prune(&self) {
        let before = self.limiter.len();
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
        log::debug!(
            "Rate limiter pruned {} idle clients",
            before.saturating_sub(self.limiter.len())
        );
    }

    pub fn tracked_clients(&self) -> usize {
        self.limiter.len()
    }
}
