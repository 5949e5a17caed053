//! Rate-limit metadata reported by the service on every response.

use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub const LIMIT_HEADER: &str = "x-ratelimit-limit";
pub const REMAINING_HEADER: &str = "x-ratelimit-remaining";
pub const RESET_HEADER: &str = "x-ratelimit-reset";

/// Usage quota as reported by the `X-RateLimit-*` headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimits {
    /// Calls allowed per period.
    pub limit: Option<u64>,
    /// Calls left in the current period.
    pub remaining: Option<u64>,
    /// Unix timestamp (seconds) at which the period resets.
    pub reset: Option<u64>,
}

impl RateLimits {
    /// Parse the rate-limit headers. Returns `None` when none of them is present.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let limit = header_u64(headers, LIMIT_HEADER);
        let remaining = header_u64(headers, REMAINING_HEADER);
        let reset = header_u64(headers, RESET_HEADER);
        if limit.is_none() && remaining.is_none() && reset.is_none() {
            return None;
        }
        Some(Self {
            limit,
            remaining,
            reset,
        })
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == Some(0)
    }

    pub fn reset_at(&self) -> Option<SystemTime> {
        self.reset
            .map(|secs| UNIX_EPOCH + Duration::from_secs(secs))
    }

    /// Time left until the quota resets, relative to `now`. Zero once passed.
    pub fn reset_after(&self, now: SystemTime) -> Option<Duration> {
        let at = self.reset_at()?;
        Some(at.duration_since(now).unwrap_or(Duration::ZERO))
    }
}

fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    let v = headers.get(name)?.to_str().ok()?.trim();
    if v.is_empty() {
        return None;
    }
    v.parse::<u64>().ok()
}
