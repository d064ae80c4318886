//! Application Configuration
//!
//! Configuration for the Auth application layer. The signing secret is
//! process-wide and loaded once at startup; the server refuses to start
//! without it (see `apps/api`).

use std::time::Duration;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC signing secret for bearer tokens (32 bytes)
    pub token_secret: [u8; 32],
    /// Token lifetime. Fixed policy: 1 hour.
    pub token_ttl: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: [0u8; 32],
            token_ttl: Duration::from_secs(3600),
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Create config with a random signing secret
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = [0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self {
            token_secret: secret,
            ..Default::default()
        }
    }

    /// Create config for development
    pub fn development() -> Self {
        Self::with_random_secret()
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}
