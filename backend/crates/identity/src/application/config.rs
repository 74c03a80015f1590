//! Application Configuration
//!
//! Configuration for token issuance. An explicit struct handed to the
//! issuer at construction; no ambient configuration object is consulted.

use std::time::Duration;

/// Token issuance configuration
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// HMAC signing secret (HS256)
    pub secret: Vec<u8>,
    /// Issuer name stamped into and required from every token
    pub issuer: String,
    /// Token lifetime from issuance
    pub token_lifetime: Duration,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: Vec::new(),
            issuer: "identity-api".to_string(),
            token_lifetime: Duration::from_secs(3600), // 1 hour
        }
    }
}

impl TokenConfig {
    /// Create config with a random signing secret (for development)
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = vec![0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self {
            secret,
            ..Default::default()
        }
    }

    /// Token lifetime in whole seconds
    pub fn token_lifetime_secs(&self) -> i64 {
        self.token_lifetime.as_secs() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lifetime_is_one_hour() {
        assert_eq!(TokenConfig::default().token_lifetime_secs(), 3600);
    }

    #[test]
    fn test_random_secret_is_nonzero() {
        let config = TokenConfig::with_random_secret();
        assert_eq!(config.secret.len(), 32);
        assert!(config.secret.iter().any(|&b| b != 0));
    }
}
