use std::time::{Duration, Instant};

use crate::error::ErrorKind;

/// Default lifetime of the error banner before it dismisses itself.
pub const DEFAULT_BANNER_TTL: Duration = Duration::from_millis(6000);

/// A transient error message shown above the form.
#[derive(Debug, Clone)]
pub struct ErrorBanner {
    message: String,
    kind: ErrorKind,
    raised_at: Instant,
    ttl: Duration,
}

impl ErrorBanner {
    pub fn new(message: impl Into<String>, kind: ErrorKind, ttl: Duration) -> Self {
        Self::raised_at(message, kind, ttl, Instant::now())
    }

    pub fn raised_at(
        message: impl Into<String>,
        kind: ErrorKind,
        ttl: Duration,
        raised_at: Instant,
    ) -> Self {
        Self {
            message: message.into(),
            kind,
            raised_at,
            ttl,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Whether the banner has outlived its TTL at `now`.
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.raised_at) >= self.ttl
    }

    /// Time left before auto-dismiss, zero once expired.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.ttl
            .saturating_sub(now.saturating_duration_since(self.raised_at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_expires_at_ttl_not_before() {
        let start = Instant::now();
        let banner = ErrorBanner::raised_at("API error", ErrorKind::Api, DEFAULT_BANNER_TTL, start);

        assert!(!banner.is_expired(start));
        assert!(!banner.is_expired(start + Duration::from_millis(5999)));
        assert!(banner.is_expired(start + Duration::from_millis(6000)));
        assert_eq!(banner.remaining(start + Duration::from_secs(2)), Duration::from_secs(4));
        assert_eq!(banner.remaining(start + Duration::from_secs(10)), Duration::ZERO);
    }

    #[test]
    fn banner_keeps_message_and_kind() {
        let banner = ErrorBanner::new("bad", ErrorKind::InvalidInput, Duration::from_secs(1));
        assert_eq!(banner.message(), "bad");
        assert_eq!(banner.kind(), ErrorKind::InvalidInput);
    }
}
