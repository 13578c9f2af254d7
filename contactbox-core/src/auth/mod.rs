//! Shared-secret access guard for the admin endpoints
//!
//! One static password, no identities, no hashing, no lockout.

use std::fmt;

use crate::config::AdminConfig;

/// Compares caller-supplied credentials against the configured admin secret
#[derive(Clone)]
pub struct AdminGuard {
    secret: String,
}

impl AdminGuard {
    /// Create a guard for `secret`
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// True iff `provided` equals the configured secret exactly
    pub fn authorize(&self, provided: &str) -> bool {
        !self.secret.is_empty() && provided == self.secret
    }
}

impl From<&AdminConfig> for AdminGuard {
    fn from(config: &AdminConfig) -> Self {
        Self::new(config.password.clone())
    }
}

impl fmt::Debug for AdminGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminGuard").finish_non_exhaustive()
    }
}
