// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Rate limiting for outbound search provider calls

use governor::clock::{Clock, DefaultClock};
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as GovRateLimiter};
use std::num::NonZeroU32;

use super::types::SearchError;

const FALLBACK_PER_MINUTE: u32 = 60;

/// Process-wide limiter in front of the search providers
pub struct SearchRateLimiter {
    limiter: GovRateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    clock: DefaultClock,
    requests_per_minute: u32,
}

impl SearchRateLimiter {
    /// Create a limiter allowing `requests_per_minute` calls (0 falls back to 60)
    pub fn new(requests_per_minute: u32) -> Self {
        let effective = if requests_per_minute == 0 {
            FALLBACK_PER_MINUTE
        } else {
            requests_per_minute
        };
        let rpm = NonZeroU32::new(effective).unwrap_or(NonZeroU32::MIN);

        Self {
            limiter: GovRateLimiter::direct(Quota::per_minute(rpm)),
            clock: DefaultClock::default(),
            requests_per_minute: effective,
        }
    }

    /// Take one permit, or report how long the caller should wait
    pub fn check(&self) -> Result<(), SearchError> {
        self.limiter.check().map_err(|not_until| {
            let wait = not_until.wait_time_from(self.clock.now());
            SearchError::RateLimited {
                retry_after_secs: wait.as_secs().max(1),
            }
        })
    }

    /// Configured requests per minute
    pub fn requests_per_minute(&self) -> u32 {
        self.requests_per_minute
    }
}
