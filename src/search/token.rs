//! Bearer token lifecycle for the search API.

use std::time::{Duration, Instant};

/// A token and the instant it stops being usable.
#[derive(Debug, Clone)]
pub struct AuthToken {
    pub value: String,
    pub expires_at: Instant,
}

impl AuthToken {
    /// Token valid for `expires_in_secs` from `now`.
    pub fn issued(value: impl Into<String>, expires_in_secs: u64, now: Instant) -> Self {
        Self {
            value: value.into(),
            expires_at: now + Duration::from_secs(expires_in_secs),
        }
    }

    pub fn is_valid_at(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Absent or holding a token; expiry is checked lazily on each read.
#[derive(Debug, Default)]
pub struct TokenSlot {
    token: Option<AuthToken>,
}

impl TokenSlot {
    /// The held token if it has not expired yet.
    pub fn current(&self, now: Instant) -> Option<&str> {
        self.token
            .as_ref()
            .filter(|token| token.is_valid_at(now))
            .map(|token| token.value.as_str())
    }

    pub fn store(&mut self, token: AuthToken) {
        self.token = Some(token);
    }

    pub fn clear(&mut self) {
        self.token = None;
    }
}
