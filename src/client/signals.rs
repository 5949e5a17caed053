use crate::rate_limit::RateLimits;

/// Facts about a client's activity so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignalsSnapshot {
    /// Requests handed to the transport (successful or not).
    pub calls_made: u64,
    /// Rate-limit metadata from the most recent response that carried it.
    pub last_rate_limits: Option<RateLimits>,
}
