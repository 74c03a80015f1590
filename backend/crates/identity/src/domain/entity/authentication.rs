//! Authentication Result
//!
//! The tagged outcome of a registration or login attempt. Either a signed
//! token was issued, or the attempt was rejected with a non-empty, ordered
//! list of plain-language error strings. The enum makes "exactly one side
//! populated" structural. Transient, constructed per request.

use chrono::{DateTime, Utc};

/// A signed authentication token plus expiry metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Signed bearer token
    pub token: String,
    /// Instant after which the token is no longer accepted
    pub expires_at: DateTime<Utc>,
}

/// Outcome of an authentication operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthenticationResult {
    /// The attempt succeeded and a token was issued
    Authenticated(IssuedToken),
    /// The attempt was rejected; order of descriptions is preserved
    Rejected(Vec<String>),
}

impl AuthenticationResult {
    /// Successful outcome
    pub fn success(token: IssuedToken) -> Self {
        Self::Authenticated(token)
    }

    /// Rejection with a single error description
    pub fn rejection(error: impl Into<String>) -> Self {
        Self::Rejected(vec![error.into()])
    }

    /// Rejection with the caller's ordered descriptions (must be non-empty)
    pub fn rejected(errors: Vec<String>) -> Self {
        debug_assert!(!errors.is_empty(), "rejection requires at least one error");
        Self::Rejected(errors)
    }

    /// Whether a token was issued
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// Issued token, if any
    pub fn token(&self) -> Option<&IssuedToken> {
        match self {
            Self::Authenticated(token) => Some(token),
            Self::Rejected(_) => None,
        }
    }

    /// Error descriptions; empty for successful outcomes
    pub fn errors(&self) -> &[String] {
        match self {
            Self::Authenticated(_) => &[],
            Self::Rejected(errors) => errors,
        }
    }
}
