//! Reconnect supervisor policy.
//!
//! Exponential backoff between connection attempts, bounded by a maximum
//! number of consecutive attempts and a maximum delay. The default policy
//! makes zero attempts, leaving a closed connection closed.

use std::time::Duration;

/// Default delay before the first retry.
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(500);

/// Default upper bound on any single retry delay.
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(30);

/// Backoff policy for reconnecting after the connection closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectPolicy {
    /// Consecutive attempts before giving up. Zero disables reconnection.
    pub max_attempts: u32,
    /// Delay before the first attempt. Doubles for every further attempt.
    pub base_delay: Duration,
    /// Cap on the delay between attempts.
    pub max_delay: Duration,
}

impl ReconnectPolicy {
    /// Policy that never reconnects.
    pub const fn disabled() -> Self {
        Self { max_attempts: 0, base_delay: DEFAULT_BASE_DELAY, max_delay: DEFAULT_MAX_DELAY }
    }

    /// Policy with `max_attempts` retries and default delays.
    pub const fn with_attempts(max_attempts: u32) -> Self {
        Self { max_attempts, base_delay: DEFAULT_BASE_DELAY, max_delay: DEFAULT_MAX_DELAY }
    }

    /// Policy allows at least one attempt.
    pub fn is_enabled(&self) -> bool {
        self.max_attempts > 0
    }

    /// Delay before the 1-based `attempt`. `None` once attempts are exhausted.
    pub fn delay_for(&self, attempt: u32) -> Option<Duration> {
        if attempt == 0 || attempt > self.max_attempts {
            return None;
        }

        let exponent = attempt.saturating_sub(1);
        let factor = 1u32.checked_shl(exponent).unwrap_or(u32::MAX);
        Some(self.base_delay.saturating_mul(factor).min(self.max_delay))
    }
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self::disabled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_never_retries() {
        let policy = ReconnectPolicy::disabled();
        assert!(!policy.is_enabled());
        assert_eq!(policy.delay_for(1), None);
    }

    #[test]
    fn delay_doubles_per_attempt() {
        let policy = ReconnectPolicy {
            max_attempts: 4,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(10),
        };

        assert_eq!(policy.delay_for(1), Some(Duration::from_millis(100)));
        assert_eq!(policy.delay_for(2), Some(Duration::from_millis(200)));
        assert_eq!(policy.delay_for(3), Some(Duration::from_millis(400)));
        assert_eq!(policy.delay_for(4), Some(Duration::from_millis(800)));
        assert_eq!(policy.delay_for(5), None);
    }

    #[test]
    fn delay_is_capped() {
        let policy = ReconnectPolicy {
            max_attempts: u32::MAX,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(5),
        };

        assert_eq!(policy.delay_for(4), Some(Duration::from_secs(5)));
        assert_eq!(policy.delay_for(40), Some(Duration::from_secs(5)));
        assert_eq!(policy.delay_for(u32::MAX), Some(Duration::from_secs(5)));
    }

    #[test]
    fn attempt_zero_is_invalid() {
        assert_eq!(ReconnectPolicy::with_attempts(3).delay_for(0), None);
    }
}
