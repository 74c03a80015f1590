//! Token Issuance
//!
//! JWT generation and validation (HS256). The issuer is the only component
//! that reads [`TokenConfig`]; handlers and use cases see the
//! [`TokenIssuer`] trait.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::application::config::TokenConfig;
use crate::domain::entity::authentication::IssuedToken;
use crate::domain::entity::user::UserAccount;
use crate::domain::value_object::role::RoleName;
use crate::error::{IdentityError, IdentityResult};

/// JWT Claims for access tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Subject (account ID)
    pub sub: String,

    /// Issuer
    pub iss: String,

    /// Account email
    pub email: String,

    /// Role names attached to the account
    #[serde(default)]
    pub roles: Vec<String>,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// JWT ID (unique identifier)
    pub jti: String,
}

/// Token issuer trait
///
/// Given an account and its roles, produces a signed token and expiry
/// metadata.
#[trait_variant::make(TokenIssuer: Send)]
pub trait LocalTokenIssuer {
    async fn issue(&self, user: &UserAccount, roles: &[RoleName]) -> IdentityResult<IssuedToken>;
}

/// HS256 JWT issuer
pub struct JwtTokenIssuer {
    config: TokenConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtTokenIssuer {
    /// Create an issuer from explicit configuration
    pub fn new(config: TokenConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(&config.secret);
        let decoding_key = DecodingKey::from_secret(&config.secret);

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Validate a bearer token and extract its claims
    ///
    /// Signature, expiry, and issuer are all enforced. Every failure maps
    /// to the same rejection so callers cannot distinguish why a token was
    /// refused.
    pub fn verify(&self, token: &str) -> IdentityResult<AccessTokenClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.issuer]);

        decode::<AccessTokenClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| IdentityError::TokenRejected)
    }

    fn build_claims(
        &self,
        user: &UserAccount,
        roles: &[RoleName],
        now: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> AccessTokenClaims {
        AccessTokenClaims {
            sub: user.user_id.to_string(),
            iss: self.config.issuer.clone(),
            email: user.email.clone(),
            roles: roles.iter().map(|r| r.as_str().to_string()).collect(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
        }
    }
}

impl TokenIssuer for JwtTokenIssuer {
    async fn issue(&self, user: &UserAccount, roles: &[RoleName]) -> IdentityResult<IssuedToken> {
        let now = Utc::now();
        let expires_at = now + Duration::seconds(self.config.token_lifetime_secs());

        let claims = self.build_claims(user, roles, now, expires_at);

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| IdentityError::TokenIssuance(e.to_string()))?;

        Ok(IssuedToken { token, expires_at })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> JwtTokenIssuer {
        JwtTokenIssuer::new(TokenConfig {
            secret: b"test-signing-secret-test-signing".to_vec(),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_issue_and_verify_roundtrip() {
        let issuer = issuer();
        let user = UserAccount::new("alice@example.com");
        let roles = [RoleName::user()];

        let issued = TokenIssuer::issue(&issuer, &user, &roles).await.unwrap();
        assert!(!issued.token.is_empty());
        assert!(issued.expires_at > Utc::now());

        let claims = issuer.verify(&issued.token).unwrap();
        assert_eq!(claims.sub, user.user_id.to_string());
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.roles, ["User"]);
        assert_eq!(claims.iss, "identity-api");
    }

    #[tokio::test]
    async fn test_verify_rejects_foreign_signature() {
        let user = UserAccount::new("alice@example.com");
        let issued = TokenIssuer::issue(&issuer(), &user, &[RoleName::user()]).await.unwrap();

        let other = JwtTokenIssuer::new(TokenConfig {
            secret: b"a-completely-different-secret-key".to_vec(),
            ..Default::default()
        });

        assert!(matches!(
            other.verify(&issued.token),
            Err(IdentityError::TokenRejected)
        ));
    }

    #[test]
    fn test_verify_rejects_garbage() {
        assert!(matches!(
            issuer().verify("not.a.jwt"),
            Err(IdentityError::TokenRejected)
        ));
    }

    #[tokio::test]
    async fn test_expiry_matches_configured_lifetime() {
        let issuer = issuer();
        let user = UserAccount::new("alice@example.com");
        let before = Utc::now();
        let issued = TokenIssuer::issue(&issuer, &user, &[]).await.unwrap();

        let lifetime = Duration::seconds(3600);
        assert!(issued.expires_at >= before + lifetime - Duration::seconds(5));
        assert!(issued.expires_at <= Utc::now() + lifetime);
    }
}
