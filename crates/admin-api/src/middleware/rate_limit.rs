use std::num::NonZeroU32;

use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use tracing::warn;

use admin_core::DomainError;

/// Per-email sign-in throttle
pub struct SignInLimiter {
    limiter: DefaultKeyedRateLimiter<String>,
}

impl SignInLimiter {
    pub fn per_minute(attempts: u32) -> Self {
        let attempts = NonZeroU32::new(attempts.max(1)).unwrap_or(NonZeroU32::MIN);
        Self {
            limiter: RateLimiter::keyed(Quota::per_minute(attempts)),
        }
    }

    pub fn check(&self, email: &str) -> Result<(), DomainError> {
        let key = email.trim().to_lowercase();
        if self.limiter.check_key(&key).is_err() {
            warn!("Sign-in rate limit hit for {}", admin_shared::utils::mask_email(&key));
            return Err(DomainError::RateLimited);
        }
        Ok(())
    }

    /// Drop idle keys; called periodically by the server
    pub fn prune(&self) {
        self.limiter.retain_recent();
    }
}
